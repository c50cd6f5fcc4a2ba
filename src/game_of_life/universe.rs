//! Universe representation and cell-level utilities for Game of Life

use super::rules;
use anyhow::Result;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// Whether this cell is alive
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Single-width display glyph for this cell state
    pub fn glyph(self) -> char {
        match self {
            Cell::Dead => '◻',
            Cell::Alive => '◼',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}

/// A fixed-size toroidal Game of Life grid
///
/// Cells are stored in row-major order: the cell at row `r`, column `c`
/// occupies index `r * width + c`. Width and height are fixed at
/// construction; `tick` is the only mutation that touches every cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    generation: u64,
}

impl Universe {
    /// Create a universe seeded with the default deterministic pattern
    ///
    /// Cell `i` starts alive when `i % 2 == 0 || i % 7 == 0`, so equal
    /// dimensions always produce the same starting grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let area = Self::checked_area(width, height)?;
        let cells = (0..area)
            .map(|i| Cell::from(i % 2 == 0 || i % 7 == 0))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
            generation: 0,
        })
    }

    /// Create a universe with every cell dead
    pub fn dead(width: usize, height: usize) -> Result<Self> {
        let area = Self::checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; area],
            generation: 0,
        })
    }

    /// Build a universe from explicit rows of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Universe cannot be empty");
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            anyhow::bail!("Universe width cannot be zero");
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
            generation: 0,
        })
    }

    fn checked_area(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            anyhow::bail!("Universe dimensions must be positive, got {}x{}", width, height);
        }
        width
            .checked_mul(height)
            .ok_or_else(|| anyhow::anyhow!("Universe dimensions {}x{} overflow the cell buffer", width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Number of ticks applied since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read access to the raw cell buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert 2D coordinates to a 1D row-major index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get cell state at coordinates; out-of-range coordinates read as dead
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.height && col < self.width {
            self.cells[self.index(row, col)]
        } else {
            Cell::Dead
        }
    }

    /// Set cell state at coordinates, for initial pattern construction
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        if row >= self.height || col >= self.width {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} universe",
                row,
                col,
                self.height,
                self.width
            );
        }
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Count living cells among the 8 Moore neighbors
    ///
    /// Row and column indices wrap modulo height and width, so the grid has
    /// no edges: column `width - 1` is adjacent to column 0 and row
    /// `height - 1` is adjacent to row 0.
    pub fn live_neighbor_count(&self, row: usize, col: usize) -> u8 {
        (-1isize..=1)
            .cartesian_product(-1isize..=1)
            .filter(|&(dr, dc)| (dr, dc) != (0, 0))
            .filter(|&(dr, dc)| {
                let r = (row as isize + dr).rem_euclid(self.height as isize) as usize;
                let c = (col as isize + dc).rem_euclid(self.width as isize) as usize;
                self.cells[self.index(r, c)].is_alive()
            })
            .count() as u8
    }

    /// Advance the universe by one generation
    ///
    /// Every next state is computed from the current buffer into a fresh
    /// one, which then replaces `cells` wholesale; no cell read during a
    /// tick can observe a value written by the same tick.
    pub fn tick(&mut self) {
        let mut next = Vec::with_capacity(self.cells.len());

        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cells[self.index(row, col)];
                let neighbors = self.live_neighbor_count(row, col);
                next.push(rules::next_state(cell, neighbors));
            }
        }

        self.cells = next;
        self.generation += 1;
    }

    /// Textual snapshot of the grid
    ///
    /// `height` lines joined by a single newline, each line exactly `width`
    /// glyph characters in column order. Pure: repeated calls without an
    /// intervening tick return identical strings.
    pub fn render(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.glyph()).collect::<String>())
            .join("\n")
    }

    /// Coordinates of all living cells as (row, col) pairs
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .cartesian_product(0..self.width)
            .filter(|&(row, col)| self.cells[self.index(row, col)].is_alive())
            .collect()
    }

    /// Count total living cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the universe has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }
}

// Grid equivalence ignores the generation counter, which is incidental
// bookkeeping rather than part of the grid state.
impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Universe {}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
