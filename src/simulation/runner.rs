//! Forward simulation driver

use super::RunReport;
use crate::config::Settings;
use crate::game_of_life::{load_universe, Universe};
use anyhow::{Context, Result};
use std::time::Instant;

/// Drives a universe through a configured number of generations
pub struct Simulation {
    settings: Settings,
    universe: Universe,
}

impl Simulation {
    /// Create a simulation from settings
    ///
    /// The starting universe comes from the configured pattern file when one
    /// is set, otherwise from the built-in seeded pattern at the configured
    /// dimensions.
    pub fn new(settings: Settings) -> Result<Self> {
        let universe = match settings.input.pattern_file {
            Some(ref path) => load_universe(path).context("Failed to load pattern file")?,
            None => Universe::new(settings.simulation.width, settings.simulation.height)
                .context("Failed to construct seeded universe")?,
        };

        Ok(Self { settings, universe })
    }

    /// Create a simulation with an explicit starting universe (useful for testing)
    pub fn with_universe(settings: Settings, universe: Universe) -> Self {
        Self { settings, universe }
    }

    /// Current state of the driven universe
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Run the configured number of generations and report the outcome
    pub fn run(&mut self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Run, invoking `observer` with the generation number after every tick
    pub fn run_with<F: FnMut(usize)>(&mut self, mut observer: F) -> Result<RunReport> {
        let generations = self.settings.simulation.generations;
        let record = self.settings.output.record_evolution;

        let start_time = Instant::now();
        let initial = self.universe.clone();

        let mut evolution_path = Vec::new();
        if record {
            evolution_path.reserve(generations + 1);
            evolution_path.push(initial.clone());
        }

        for generation in 1..=generations {
            self.universe.tick();
            if record {
                evolution_path.push(self.universe.clone());
            }
            observer(generation);
        }

        Ok(RunReport::new(
            initial,
            self.universe.clone(),
            generations,
            evolution_path,
            start_time.elapsed(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::io::parse_universe;

    fn settings(generations: usize, record: bool) -> Settings {
        let mut settings = Settings::default();
        settings.simulation.generations = generations;
        settings.output.record_evolution = record;
        settings
    }

    #[test]
    fn test_run_from_seeded_pattern() {
        let mut config = settings(3, false);
        config.simulation.width = 8;
        config.simulation.height = 8;

        let mut simulation = Simulation::new(config).unwrap();
        let report = simulation.run().unwrap();

        assert_eq!(report.generations, 3);
        assert_eq!(report.initial.width(), 8);
        assert_eq!(report.outcome.generation(), 3);
        assert!(report.evolution_path.is_empty());
    }

    #[test]
    fn test_run_records_evolution_path() {
        let blinker = parse_universe("00000\n00100\n00100\n00100\n00000\n").unwrap();
        let mut simulation = Simulation::with_universe(settings(2, true), blinker.clone());

        let report = simulation.run().unwrap();

        // Initial plus one snapshot per generation
        assert_eq!(report.evolution_path.len(), 3);
        assert_eq!(report.evolution_path[0], blinker);
        assert_eq!(report.evolution_path[2], blinker);
        assert_eq!(report.outcome, blinker);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let blinker = parse_universe("00000\n00100\n00100\n00100\n00000\n").unwrap();
        let mut simulation = Simulation::with_universe(settings(5, false), blinker);

        let mut seen = Vec::new();
        simulation.run_with(|generation| seen.push(generation)).unwrap();

        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }
}
