//! Shared display and formatting utilities

pub mod display;

pub use display::{Color, ColorOutput, ProgressIndicator, RenderCache, ReportFormatter};
