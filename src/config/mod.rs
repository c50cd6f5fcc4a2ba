//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SimulationConfig,
};
