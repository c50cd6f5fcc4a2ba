//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::Universe;
use crate::simulation::{PatternClassification, RunReport};
use anyhow::Result;
use std::path::Path;

/// Formats run reports for console and file output
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format a run report for console output
    pub fn format_report(report: &RunReport, show_evolution: bool) -> String {
        let mut output = String::new();

        output.push_str("=== Simulation Run ===\n");
        output.push_str(&format!("Generations: {}\n", report.generations));
        output.push_str(&format!("Run Time: {:.3}s\n", report.run_time.as_secs_f64()));
        output.push_str(&format!(
            "Living Cells: {} → {}\n",
            report.metadata.initial_live_cells, report.metadata.final_live_cells
        ));
        output.push_str(&format!(
            "Final Density: {:.1}%\n",
            report.metadata.final_density * 100.0
        ));
        output.push_str(&format!(
            "Outcome Type: {}\n",
            Self::describe_classification(&report.metadata.classification)
        ));
        output.push('\n');

        if show_evolution && !report.evolution_path.is_empty() {
            output.push_str("Evolution:\n");
            for (i, universe) in report.evolution_path.iter().enumerate() {
                output.push_str(&format!("Generation {}:\n", i));
                output.push_str(&Self::format_universe_compact(universe));
                output.push('\n');
            }
        } else {
            output.push_str("Initial State:\n");
            output.push_str(&Self::format_universe_compact(&report.initial));
            output.push('\n');
            output.push_str(&format!("Final State (after {} generations):\n", report.generations));
            output.push_str(&Self::format_universe_compact(&report.outcome));
        }

        output
    }

    /// One-line description of a classification
    pub fn describe_classification(classification: &PatternClassification) -> String {
        if classification.vanished {
            "Died Out".to_string()
        } else if classification.is_still_life {
            "Still Life".to_string()
        } else if classification.is_oscillator {
            format!("Oscillator (period {})", classification.period.unwrap_or(0))
        } else {
            "Other".to_string()
        }
    }

    /// Format analyzed patterns as a summary table
    pub fn format_pattern_table(entries: &[(String, Universe, PatternClassification)]) -> String {
        let mut output = String::new();

        output.push_str("Pattern Summary:\n");
        output.push_str("Name         | Size    | Living | Density | Type\n");
        output.push_str("-------------|---------|--------|---------|----------\n");

        for (name, universe, classification) in entries {
            let density = universe.live_count() as f64 / universe.area() as f64 * 100.0;
            output.push_str(&format!(
                "{:12} | {:3}x{:<3} | {:6} | {:6.1}% | {}\n",
                &name[..12.min(name.len())],
                universe.width(),
                universe.height(),
                universe.live_count(),
                density,
                classification.label()
            ));
        }

        output
    }

    /// Format a universe in compact form
    pub fn format_universe_compact(universe: &Universe) -> String {
        let mut output = String::new();
        for row in 0..universe.height() {
            for col in 0..universe.width() {
                output.push(if universe.get(row, col).is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a universe with row and column coordinates
    pub fn format_universe_with_coords(universe: &Universe) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..universe.width() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..universe.height() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..universe.width() {
                output.push_str(if universe.get(row, col).is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Save a report to the output directory in the configured format
    pub fn save_report<P: AsRef<Path>>(
        report: &RunReport,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                let content = Self::format_report(report, true);
                std::fs::write(output_dir.join("report.txt"), content)?;
            }
            OutputFormat::Json => {
                report.save_to_file(output_dir.join("report.json"))?;

                let summary_json = serde_json::to_string_pretty(&report.summary())?;
                std::fs::write(output_dir.join("summary.json"), summary_json)?;
            }
            OutputFormat::Visual => {
                let content = Self::create_visual_evolution(report);
                std::fs::write(output_dir.join("evolution.txt"), content)?;
            }
        }

        Ok(())
    }

    /// Create a coordinate-grid visual of the recorded evolution
    fn create_visual_evolution(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str("Visual Evolution\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if report.evolution_path.is_empty() {
            output.push_str("\nInitial (Living: ");
            output.push_str(&format!("{}):\n", report.initial.live_count()));
            output.push_str(&Self::format_universe_with_coords(&report.initial));
            output.push_str(&format!(
                "\nFinal after {} generations (Living: {}):\n",
                report.generations,
                report.outcome.live_count()
            ));
            output.push_str(&Self::format_universe_with_coords(&report.outcome));
        } else {
            for (i, universe) in report.evolution_path.iter().enumerate() {
                output.push_str(&format!("\nGeneration {} (Living: {}):\n", i, universe.live_count()));
                output.push_str(&Self::format_universe_with_coords(universe));
            }
        }

        output.push_str("\nRun Statistics:\n");
        output.push_str(&format!(
            "Living Cells: {} → {}\n",
            report.metadata.initial_live_cells, report.metadata.final_live_cells
        ));
        output.push_str(&format!(
            "Outcome Type: {}\n",
            Self::describe_classification(&report.metadata.classification)
        ));
        output.push_str(&format!("Run Time: {:.3}s\n", report.run_time.as_secs_f64()));

        output
    }
}

/// Memoizes the last rendered snapshot of one universe
///
/// The cached text is keyed by (generation, width, height) and recomputed
/// whenever the key no longer matches, so a snapshot is never trusted
/// across a tick. Scope one cache to one universe.
#[derive(Debug, Default)]
pub struct RenderCache {
    key: Option<(u64, usize, usize)>,
    text: String,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the universe, reusing the cached text when still valid
    pub fn render(&mut self, universe: &Universe) -> &str {
        let key = (universe.generation(), universe.width(), universe.height());
        if self.key != Some(key) {
            self.text = universe.render();
            self.key = Some(key);
        }
        &self.text
    }
}

/// Progress indicator for long-running simulations
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    last_update: std::time::Instant,
    start_time: std::time::Instant,
}

impl ProgressIndicator {
    /// Create a new progress indicator
    pub fn new(total: usize) -> Self {
        let now = std::time::Instant::now();
        Self {
            total,
            current: 0,
            last_update: now,
            start_time: now,
        }
    }

    /// Update progress and optionally display
    pub fn update(&mut self, current: usize) {
        self.current = current;
        let now = std::time::Instant::now();

        // Update display every 100ms
        if now.duration_since(self.last_update).as_millis() > 100 {
            self.display();
            self.last_update = now;
        }
    }

    /// Display current progress
    pub fn display(&self) {
        let percentage = if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };

        let elapsed = self.start_time.elapsed();
        let eta = if self.current > 0 {
            let rate = self.current as f64 / elapsed.as_secs_f64();
            let remaining = (self.total - self.current) as f64 / rate;
            format!("ETA: {:.1}s", remaining)
        } else {
            "ETA: --".to_string()
        };

        print!(
            "\rGeneration: {}/{} ({:.1}%) - {}",
            self.current, self.total, percentage, eta
        );
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        println!(
            "\rCompleted: {}/{} (100.0%) - Total time: {:.1}s",
            self.total,
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::io::parse_universe;
    use crate::simulation::RunReport;
    use std::time::Duration;

    #[test]
    fn test_universe_formatting() {
        let universe = parse_universe("101\n010\n101\n").unwrap();

        let compact = ReportFormatter::format_universe_compact(&universe);
        assert!(compact.contains('█'));
        assert!(compact.contains('·'));

        let with_coords = ReportFormatter::format_universe_with_coords(&universe);
        assert!(with_coords.contains(" 0 1 2"));
    }

    #[test]
    fn test_report_formatting() {
        let block = parse_universe("0000\n0110\n0110\n0000\n").unwrap();
        let report = RunReport::new(block.clone(), block, 5, vec![], Duration::from_millis(1));

        let text = ReportFormatter::format_report(&report, false);
        assert!(text.contains("Generations: 5"));
        assert!(text.contains("Still Life"));
    }

    #[test]
    fn test_render_cache_revalidates_on_tick() {
        let mut universe = parse_universe("00000\n00100\n00100\n00100\n00000\n").unwrap();
        let mut cache = RenderCache::new();

        let first = cache.render(&universe).to_string();
        assert_eq!(cache.render(&universe), first);
        assert_eq!(first, universe.render());

        universe.tick();
        let second = cache.render(&universe).to_string();
        assert_ne!(first, second);
        assert_eq!(second, universe.render());
    }

    #[test]
    fn test_progress_indicator() {
        let mut progress = ProgressIndicator::new(100);
        progress.update(50);
        assert_eq!(progress.current, 50);
        assert_eq!(progress.total, 100);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
