//! Main CLI application for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, Settings},
    game_of_life::io::{create_example_patterns, load_universe, load_universes_from_directory},
    simulation::{EvolutionValidator, PatternClassification, Simulation},
    utils::{ColorOutput, ProgressIndicator, RenderCache, ReportFormatter},
};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Game of Life Simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation for the configured number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Starting pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Universe width for the seeded pattern (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Universe height for the seeded pattern (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every generation of the run
        #[arg(long)]
        show_evolution: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check that one state evolves into another
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Initial state file
        #[arg(short, long)]
        initial: PathBuf,

        /// Expected state file
        #[arg(short, long)]
        expected: PathBuf,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Show evolution path
        #[arg(long)]
        show_evolution: bool,
    },

    /// Analyze a pattern file or a directory of patterns
    Analyze {
        /// Pattern file, or directory of .txt patterns
        #[arg(short, long)]
        target: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            pattern,
            width,
            height,
            generations,
            output,
            show_evolution,
            verbose,
        } => run_command(
            config,
            pattern,
            width,
            height,
            generations,
            output,
            show_evolution,
            verbose,
        ),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate {
            config,
            initial,
            expected,
            generations,
            show_evolution,
        } => validate_command(config, initial, expected, generations, show_evolution),
        Commands::Analyze { target } => analyze_command(target),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_command(
    config_path: PathBuf,
    pattern_file: Option<PathBuf>,
    width: Option<usize>,
    height: Option<usize>,
    generations: Option<usize>,
    output_dir: Option<PathBuf>,
    show_evolution: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔄 Starting Game of Life simulation"));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        width,
        height,
        generations,
        pattern_file,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    // Frame-by-frame display needs the recorded path
    if show_evolution {
        settings.output.record_evolution = true;
    }

    if verbose {
        println!("Configuration:");
        println!("  Dimensions: {}x{}", settings.simulation.width, settings.simulation.height);
        println!("  Generations: {}", settings.simulation.generations);
        match settings.input.pattern_file {
            Some(ref path) => println!("  Pattern file: {}", path.display()),
            None => println!("  Pattern: built-in seeded"),
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    // Validate settings
    settings.validate().context("Configuration validation failed")?;

    let mut simulation = Simulation::new(settings.clone()).context("Failed to create simulation")?;

    let report = if verbose && !show_evolution {
        let mut progress = ProgressIndicator::new(settings.simulation.generations);
        let report = simulation.run_with(|generation| progress.update(generation))?;
        progress.finish();
        report
    } else {
        simulation.run()?
    };

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Advanced {} generation(s) in {:.3}s",
            report.generations,
            report.run_time.as_secs_f64()
        ))
    );

    if show_evolution {
        let mut cache = RenderCache::new();
        for (i, universe) in report.evolution_path.iter().enumerate() {
            println!("\nGeneration {} (Living: {}):", i, universe.live_count());
            println!("{}", cache.render(universe));
        }
        println!(
            "\nOutcome: {}",
            ReportFormatter::describe_classification(&report.metadata.classification)
        );
    } else {
        println!("\n{}", ReportFormatter::format_report(&report, false));
    }

    println!("{}", ColorOutput::info("💾 Saving report..."));
    ReportFormatter::save_report(&report, &settings.output.output_directory, &settings.output.format)
        .context("Failed to save report")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Report saved to {}",
            settings.output.output_directory.display()
        ))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    // Create directories
    let config_dir = directory.join("config");
    let patterns_dir = directory.join("input/patterns");
    let output_dir = directory.join("output/runs");

    for dir in [&config_dir, &patterns_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Create example patterns
    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    // Create example configuration variants
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Oscillator watched frame by frame
    let mut blinker_config = Settings::default();
    blinker_config.simulation.generations = 2;
    blinker_config.input.pattern_file = Some(PathBuf::from("input/patterns/blinker.txt"));
    blinker_config.output.record_evolution = true;
    blinker_config.to_file(&examples_dir.join("blinker.yaml"))?;

    // Longer glider run
    let mut glider_config = Settings::default();
    glider_config.simulation.generations = 20;
    glider_config.input.pattern_file = Some(PathBuf::from("input/patterns/glider.txt"));
    glider_config.to_file(&examples_dir.join("glider.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your patterns to {}", patterns_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn validate_command(
    config_path: PathBuf,
    initial_path: PathBuf,
    expected_path: PathBuf,
    generations: Option<usize>,
    show_evolution: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating evolution..."));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)?
    } else {
        Settings::default()
    };

    if let Some(generations) = generations {
        settings.simulation.generations = generations;
    }

    // Load states
    let initial = load_universe(&initial_path)
        .with_context(|| format!("Failed to load initial state from {}", initial_path.display()))?;

    let expected = load_universe(&expected_path)
        .with_context(|| format!("Failed to load expected state from {}", expected_path.display()))?;

    // Validate
    let validator = EvolutionValidator::new(settings);
    let result = validator.validate(&initial, &expected).context("Validation failed")?;

    println!("{}", result);

    if show_evolution && !result.evolution_path.is_empty() {
        println!("\nEvolution Path:");
        for (i, universe) in result.evolution_path.iter().enumerate() {
            println!("Generation {}:", i);
            println!("{}", ReportFormatter::format_universe_compact(universe));
        }
    }

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Evolution is valid!"));
    } else {
        println!("{}", ColorOutput::error("❌ Evolution is invalid"));
    }

    Ok(())
}

fn analyze_command(target: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing pattern(s)..."));

    if target.is_dir() {
        let universes = load_universes_from_directory(&target)
            .with_context(|| format!("Failed to load patterns from {}", target.display()))?;

        if universes.is_empty() {
            println!("{}", ColorOutput::warning("No patterns found"));
            return Ok(());
        }

        // Each universe is independent, so classification fans out per file
        let entries: Vec<_> = universes
            .into_par_iter()
            .map(|(name, universe)| {
                let classification = PatternClassification::analyze(&universe);
                (name, universe, classification)
            })
            .collect();

        println!("\n{}", ReportFormatter::format_pattern_table(&entries));
        return Ok(());
    }

    let universe = load_universe(&target)
        .with_context(|| format!("Failed to load pattern from {}", target.display()))?;

    println!("Pattern ({}x{}):", universe.width(), universe.height());
    println!("{}", ReportFormatter::format_universe_with_coords(&universe));

    println!("Pattern Statistics:");
    println!("  Living cells: {}", universe.live_count());
    println!(
        "  Density: {:.1}%",
        (universe.live_count() as f64 / universe.area() as f64) * 100.0
    );

    let classification = PatternClassification::analyze(&universe);
    println!(
        "  Type: {}",
        ReportFormatter::describe_classification(&classification)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        // Test that CLI parsing works
        let cli = Cli::try_parse_from([
            "game_of_life_sim",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/patterns/blinker.txt").exists());
    }

    #[test]
    fn test_analyze_directory() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        let result = analyze_command(temp_dir.path().to_path_buf());
        assert!(result.is_ok());
    }
}
