//! Validation of claimed evolutions between two states

use crate::config::Settings;
use crate::game_of_life::{Cell, Universe};
use anyhow::Result;
use std::fmt;

/// Checks that one state evolves into another under the configured
/// generation count
pub struct EvolutionValidator {
    settings: Settings,
}

/// Result of an evolution check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub evolution_path: Vec<Universe>,
    pub error_message: Option<String>,
    pub details: ValidationDetails,
}

/// Detailed validation information
#[derive(Debug, Clone, Default)]
pub struct ValidationDetails {
    pub generations_checked: usize,
    pub final_state_matches: bool,
    pub rule_violations: Vec<RuleViolation>,
    pub metrics: ValidationMetrics,
}

/// A cell whose final state disagrees with the expected grid
#[derive(Debug, Clone)]
pub struct RuleViolation {
    pub generation: usize,
    pub row: usize,
    pub col: usize,
    pub expected: Cell,
    pub actual: Cell,
    /// Live neighbors the cell saw in the generation before the last tick
    pub live_neighbors: u8,
}

/// Performance counters for a validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationMetrics {
    pub validation_time_ms: u64,
    pub states_checked: usize,
    pub cells_checked: usize,
}

impl EvolutionValidator {
    /// Create a new validator
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Validate that `initial` evolves into `expected`
    pub fn validate(&self, initial: &Universe, expected: &Universe) -> Result<ValidationResult> {
        let start_time = std::time::Instant::now();
        let generations = self.settings.simulation.generations;

        if initial.width() != expected.width() || initial.height() != expected.height() {
            return Ok(ValidationResult {
                is_valid: false,
                evolution_path: vec![],
                error_message: Some(format!(
                    "Universe dimension mismatch: initial {}x{}, expected {}x{}",
                    initial.width(),
                    initial.height(),
                    expected.width(),
                    expected.height()
                )),
                details: ValidationDetails::default(),
            });
        }

        let mut evolution_path = Vec::with_capacity(generations + 1);
        evolution_path.push(initial.clone());

        let mut current = initial.clone();
        for _ in 0..generations {
            current.tick();
            evolution_path.push(current.clone());
        }

        let final_state_matches = current == *expected;
        let rule_violations = if final_state_matches {
            vec![]
        } else {
            Self::collect_violations(&evolution_path, expected)
        };

        let metrics = ValidationMetrics {
            validation_time_ms: start_time.elapsed().as_millis() as u64,
            states_checked: evolution_path.len(),
            cells_checked: evolution_path.len() * initial.area(),
        };

        let error_message = (!final_state_matches).then(|| {
            format!(
                "Final state differs from expected in {} cell(s) after {} generation(s)",
                rule_violations.len(),
                generations
            )
        });

        Ok(ValidationResult {
            is_valid: final_state_matches,
            evolution_path,
            error_message,
            details: ValidationDetails {
                generations_checked: generations,
                final_state_matches,
                rule_violations,
                metrics,
            },
        })
    }

    /// Diff the evolved final state against the expected grid
    fn collect_violations(evolution_path: &[Universe], expected: &Universe) -> Vec<RuleViolation> {
        let Some(final_state) = evolution_path.last() else {
            return vec![];
        };
        // The state the last tick read from, for neighbor-count context
        let before_last = &evolution_path[evolution_path.len().saturating_sub(2)];
        let generation = evolution_path.len() - 1;

        let mut violations = Vec::new();
        for row in 0..final_state.height() {
            for col in 0..final_state.width() {
                let actual = final_state.get(row, col);
                let wanted = expected.get(row, col);
                if actual != wanted {
                    violations.push(RuleViolation {
                        generation,
                        row,
                        col,
                        expected: wanted,
                        actual,
                        live_neighbors: before_last.live_neighbor_count(row, col),
                    });
                }
            }
        }
        violations
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            writeln!(
                f,
                "Validation PASSED: initial state evolves to the expected state after {} generation(s)",
                self.details.generations_checked
            )?;
        } else {
            writeln!(f, "Validation FAILED")?;
            if let Some(ref message) = self.error_message {
                writeln!(f, "  {}", message)?;
            }
            for violation in self.details.rule_violations.iter().take(10) {
                writeln!(
                    f,
                    "  Cell ({}, {}): expected {:?}, got {:?} ({} live neighbors before the last tick)",
                    violation.row,
                    violation.col,
                    violation.expected,
                    violation.actual,
                    violation.live_neighbors
                )?;
            }
            if self.details.rule_violations.len() > 10 {
                writeln!(f, "  ... and {} more", self.details.rule_violations.len() - 10)?;
            }
        }
        write!(
            f,
            "Checked {} state(s), {} cell(s) in {}ms",
            self.details.metrics.states_checked,
            self.details.metrics.cells_checked,
            self.details.metrics.validation_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::io::parse_universe;

    fn validator(generations: usize) -> EvolutionValidator {
        let mut settings = Settings::default();
        settings.simulation.generations = generations;
        EvolutionValidator::new(settings)
    }

    #[test]
    fn test_valid_evolution() {
        let vertical = parse_universe("00000\n00100\n00100\n00100\n00000\n").unwrap();
        let horizontal = parse_universe("00000\n00000\n01110\n00000\n00000\n").unwrap();

        let result = validator(1).validate(&vertical, &horizontal).unwrap();

        assert!(result.is_valid);
        assert!(result.details.final_state_matches);
        assert!(result.details.rule_violations.is_empty());
        assert_eq!(result.evolution_path.len(), 2);
    }

    #[test]
    fn test_invalid_after_two_generations() {
        // The blinker is back to vertical after two ticks
        let vertical = parse_universe("00000\n00100\n00100\n00100\n00000\n").unwrap();
        let horizontal = parse_universe("00000\n00000\n01110\n00000\n00000\n").unwrap();

        let result = validator(2).validate(&vertical, &horizontal).unwrap();

        assert!(!result.is_valid);
        assert!(!result.details.rule_violations.is_empty());

        let violation = &result.details.rule_violations[0];
        assert_eq!(violation.generation, 2);
        assert!(violation.expected != violation.actual);
    }

    #[test]
    fn test_dimension_mismatch() {
        let small = parse_universe("010\n010\n010\n").unwrap();
        let large = parse_universe("00000\n00000\n01110\n00000\n00000\n").unwrap();

        let result = validator(1).validate(&small, &large).unwrap();

        assert!(!result.is_valid);
        assert!(result.error_message.unwrap().contains("dimension mismatch"));
        assert!(result.evolution_path.is_empty());
    }

    #[test]
    fn test_display_output() {
        let vertical = parse_universe("00000\n00100\n00100\n00100\n00000\n").unwrap();
        let horizontal = parse_universe("00000\n00000\n01110\n00000\n00000\n").unwrap();

        let passed = validator(1).validate(&vertical, &horizontal).unwrap();
        assert!(passed.to_string().contains("PASSED"));

        let failed = validator(2).validate(&vertical, &horizontal).unwrap();
        assert!(failed.to_string().contains("FAILED"));
    }
}
