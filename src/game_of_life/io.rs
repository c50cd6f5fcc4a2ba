//! File I/O for Game of Life patterns

use super::{Cell, Universe};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a universe from a text file
/// Format: each line is a row, with '1' for alive cells and '0' for dead cells
pub fn load_universe<P: AsRef<Path>>(path: P) -> Result<Universe> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_universe(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a universe from its text representation
pub fn parse_universe(content: &str) -> Result<Universe> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(Cell::Dead),
                '1' => row.push(Cell::Alive),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Universe::from_rows(rows)
}

/// Save a universe to a text file
pub fn save_universe<P: AsRef<Path>>(universe: &Universe, path: P) -> Result<()> {
    let content = universe_to_text(universe);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a universe to its '0'/'1' text representation
pub fn universe_to_text(universe: &Universe) -> String {
    let mut result = String::with_capacity(universe.height() * (universe.width() + 1));

    for row in 0..universe.height() {
        for col in 0..universe.width() {
            result.push(if universe.get(row, col).is_alive() { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Load every `.txt` pattern in a directory, sorted by file stem
pub fn load_universes_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Universe)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut universes = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_universe(&path) {
                Ok(universe) => universes.push((name, universe)),
                Err(e) => eprintln!("Warning: Failed to load {}: {}", path.display(), e),
            }
        }
    }

    universes.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(universes)
}

/// Create example pattern files for testing and setup
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Glider (moving pattern)
    let glider = "00100\n10100\n01100\n00000\n00000\n";
    std::fs::write(dir.join("glider.txt"), glider).context("Failed to write glider.txt")?;

    // Blinker (period-2 oscillator)
    let blinker = "00000\n00100\n00100\n00100\n00000\n";
    std::fs::write(dir.join("blinker.txt"), blinker).context("Failed to write blinker.txt")?;

    // Block (still life)
    let block = "0000\n0110\n0110\n0000\n";
    std::fs::write(dir.join("block.txt"), block).context("Failed to write block.txt")?;

    // Beacon (period-2 oscillator)
    let beacon = "110000\n110000\n001100\n001100\n";
    std::fs::write(dir.join("beacon.txt"), beacon).context("Failed to write beacon.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_universe() {
        let content = "010\n101\n010\n";
        let universe = parse_universe(content).unwrap();

        assert_eq!(universe.width(), 3);
        assert_eq!(universe.height(), 3);

        assert_eq!(universe.live_count(), 4);
        assert!(universe.get(0, 1).is_alive());
        assert!(universe.get(1, 0).is_alive());
        assert!(universe.get(1, 2).is_alive());
        assert!(universe.get(2, 1).is_alive());
    }

    #[test]
    fn test_universe_to_text() {
        let universe = parse_universe("010\n101\n010\n").unwrap();
        assert_eq!(universe_to_text(&universe), "010\n101\n010\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("pattern.txt");

        let original = parse_universe("101\n010\n").unwrap();
        save_universe(&original, &file_path).unwrap();
        let loaded = load_universe(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        // Invalid character
        assert!(parse_universe("010\n1X1\n010\n").is_err());

        // Inconsistent row lengths
        assert!(parse_universe("010\n11\n010\n").is_err());

        // Empty content
        assert!(parse_universe("").is_err());
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for name in ["glider.txt", "blinker.txt", "block.txt", "beacon.txt"] {
            assert!(temp_dir.path().join(name).exists());
        }

        let glider = load_universe(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.width(), 5);
        assert_eq!(glider.height(), 5);
        assert_eq!(glider.live_count(), 5);
    }

    #[test]
    fn test_load_directory_sorted() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("notes.md"), "ignored").unwrap();

        let universes = load_universes_from_directory(temp_dir.path()).unwrap();
        let names: Vec<&str> = universes.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["beacon", "blinker", "block", "glider"]);
    }
}
