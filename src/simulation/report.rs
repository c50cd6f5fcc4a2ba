//! Run report for forward simulations

use crate::game_of_life::Universe;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest oscillator period the classifier searches for
const MAX_CLASSIFICATION_PERIOD: usize = 16;

/// Outcome of running a universe for a number of generations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// The starting state
    pub initial: Universe,
    /// The state after the final tick
    pub outcome: Universe,
    /// Number of generations advanced
    pub generations: usize,
    /// Snapshot per generation (initial included); empty unless recording
    /// was enabled for the run
    pub evolution_path: Vec<Universe>,
    /// Wall-clock time of the run
    #[serde(skip)]
    pub run_time: Duration,
    /// Derived statistics about the run
    pub metadata: RunMetadata,
}

/// Statistics derived from a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub initial_live_cells: usize,
    pub final_live_cells: usize,
    /// Live-cell density of the outcome (0.0 to 1.0)
    pub final_density: f64,
    pub classification: PatternClassification,
}

/// What the outcome settles into when ticked further
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternClassification {
    pub is_still_life: bool,
    pub is_oscillator: bool,
    /// Oscillation period, when periodic within the search bound
    pub period: Option<usize>,
    /// True when the grid has no living cells left
    pub vanished: bool,
}

impl PatternClassification {
    /// Classify a state by ticking a scratch copy until it repeats
    pub fn analyze(universe: &Universe) -> Self {
        if universe.is_empty() {
            return Self {
                is_still_life: false,
                is_oscillator: false,
                period: None,
                vanished: true,
            };
        }

        let mut scratch = universe.clone();
        for period in 1..=MAX_CLASSIFICATION_PERIOD {
            scratch.tick();
            if scratch == *universe {
                return Self {
                    is_still_life: period == 1,
                    is_oscillator: period > 1,
                    period: Some(period),
                    vanished: false,
                };
            }
        }

        Self {
            is_still_life: false,
            is_oscillator: false,
            period: None,
            vanished: false,
        }
    }

    /// Short label for tabular output
    pub fn label(&self) -> &'static str {
        if self.vanished {
            "Empty"
        } else if self.is_still_life {
            "Still"
        } else if self.is_oscillator {
            "Osc"
        } else {
            "Other"
        }
    }
}

impl RunReport {
    /// Assemble a report and derive its metadata
    pub fn new(
        initial: Universe,
        outcome: Universe,
        generations: usize,
        evolution_path: Vec<Universe>,
        run_time: Duration,
    ) -> Self {
        let classification = PatternClassification::analyze(&outcome);
        let metadata = RunMetadata {
            initial_live_cells: initial.live_count(),
            final_live_cells: outcome.live_count(),
            final_density: outcome.live_count() as f64 / outcome.area() as f64,
            classification,
        };

        Self {
            initial,
            outcome,
            generations,
            evolution_path,
            run_time,
            metadata,
        }
    }

    /// Snapshot at a given generation, when the path was recorded
    pub fn state_at_generation(&self, generation: usize) -> Option<&Universe> {
        self.evolution_path.get(generation)
    }

    /// Flat record for summary tables and JSON listings
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            generations: self.generations,
            initial_live_cells: self.metadata.initial_live_cells,
            final_live_cells: self.metadata.final_live_cells,
            final_density: self.metadata.final_density,
            classification: self.metadata.classification.label().to_string(),
            run_time_ms: self.run_time.as_millis() as u64,
        }
    }

    /// Convert to a pretty-printed JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save the report as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self
            .to_json()
            .context("Failed to serialize run report")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report to file: {}", path.as_ref().display()))?;

        Ok(())
    }
}

/// Compact summary of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: usize,
    pub initial_live_cells: usize,
    pub final_live_cells: usize,
    pub final_density: f64,
    pub classification: String,
    pub run_time_ms: u64,
}
