//! Game of Life Simulator
//!
//! This library simulates Conway's Game of Life on fixed-size toroidal
//! grids and drives multi-generation runs from declarative settings.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Cell, Universe};
pub use simulation::{RunReport, Simulation};

use anyhow::Result;

/// Main entry point for running a configured simulation
pub fn run_simulation(settings: Settings) -> Result<RunReport> {
    let mut simulation = Simulation::new(settings)?;
    simulation.run()
}
