//! Game of Life transition rules

use super::{Cell, Universe};

/// Maximum possible live-neighbor count in a Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Neighbor counts that keep a live cell alive
pub const SURVIVAL_COUNTS: [u8; 2] = [2, 3];

/// Neighbor count that brings a dead cell to life
pub const BIRTH_COUNT: u8 = 3;

/// Compute the next state of one cell from its current state and live-neighbor count
///
/// Conway's rule: a live cell with fewer than 2 live neighbors dies of
/// underpopulation, with 2 or 3 survives, with more than 3 dies of
/// overpopulation; a dead cell with exactly 3 live neighbors becomes alive.
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
        (Cell::Dead, BIRTH_COUNT) => Cell::Alive,
        (Cell::Alive, _) => Cell::Dead,
        (cell, _) => cell,
    }
}

/// Advance a universe by the given number of generations
pub fn advance(universe: &mut Universe, generations: usize) {
    for _ in 0..generations {
        universe.tick();
    }
}

/// Check that `initial` evolves into `expected` after exactly `generations` ticks
pub fn evolves_to(initial: &Universe, expected: &Universe, generations: usize) -> bool {
    if initial.width() != expected.width() || initial.height() != expected.height() {
        return false;
    }

    let mut evolved = initial.clone();
    advance(&mut evolved, generations);
    evolved == *expected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pattern(pattern: &[&str]) -> Universe {
        let rows = pattern
            .iter()
            .map(|line| line.chars().map(|ch| Cell::from(ch == '1')).collect())
            .collect();
        Universe::from_rows(rows).unwrap()
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(next_state(Cell::Alive, 0), Cell::Dead); // Underpopulation
        assert_eq!(next_state(Cell::Alive, 1), Cell::Dead);
        assert_eq!(next_state(Cell::Alive, 2), Cell::Alive); // Survival
        assert_eq!(next_state(Cell::Alive, 3), Cell::Alive);
        assert_eq!(next_state(Cell::Alive, 4), Cell::Dead); // Overpopulation
        assert_eq!(next_state(Cell::Alive, 8), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, 3), Cell::Alive); // Birth
        assert_eq!(next_state(Cell::Dead, 2), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, 4), Cell::Dead);

        for count in SURVIVAL_COUNTS {
            assert_eq!(next_state(Cell::Alive, count), Cell::Alive);
        }
        assert_eq!(next_state(Cell::Alive, MAX_NEIGHBORS), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, MAX_NEIGHBORS), Cell::Dead);
    }

    #[test]
    fn test_still_life_block() {
        // 2x2 block with a dead margin is unchanged by a tick
        let block = from_pattern(&["0000", "0110", "0110", "0000"]);
        let mut evolved = block.clone();
        evolved.tick();

        assert_eq!(block, evolved);
    }

    #[test]
    fn test_oscillator_blinker() {
        // 5x5 keeps the wrapped neighborhoods clear of the pattern
        let vertical = from_pattern(&["00000", "00100", "00100", "00100", "00000"]);
        let horizontal = from_pattern(&["00000", "00000", "01110", "00000", "00000"]);

        let mut evolved = vertical.clone();
        evolved.tick();
        assert_eq!(evolved, horizontal);

        evolved.tick();
        assert_eq!(evolved, vertical);
    }

    #[test]
    fn test_three_by_three_torus_saturates() {
        // On a 3x3 torus every cell neighbors every other cell, so the
        // three live cells each see 2 neighbors and every dead cell sees
        // exactly 3: one tick fills the grid, the next empties it.
        let mut blinker = from_pattern(&["010", "010", "010"]);

        blinker.tick();
        assert_eq!(blinker.live_count(), 9);

        blinker.tick();
        assert!(blinker.is_empty());
    }

    #[test]
    fn test_advance_multiple_generations() {
        let vertical = from_pattern(&["00000", "00100", "00100", "00100", "00000"]);
        let mut universe = vertical.clone();

        advance(&mut universe, 4);
        assert_eq!(universe, vertical);
        assert_eq!(universe.generation(), 4);
    }

    #[test]
    fn test_evolves_to() {
        let vertical = from_pattern(&["00000", "00100", "00100", "00100", "00000"]);
        let horizontal = from_pattern(&["00000", "00000", "01110", "00000", "00000"]);

        assert!(evolves_to(&vertical, &horizontal, 1));
        assert!(!evolves_to(&vertical, &horizontal, 2)); // Back to vertical

        let mismatched = from_pattern(&["010", "010", "010"]);
        assert!(!evolves_to(&vertical, &mismatched, 1));
    }
}
