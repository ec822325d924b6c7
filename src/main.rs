//! Main CLI application for the Hashi SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hashi_sat::{
    config::{CliOverrides, Settings, SolverBackend},
    hashi::{run_batch, HashiProblem, PuzzleOutcome, Solution, SolutionValidator},
    puzzle::{create_example_puzzles, load_puzzle_from_file},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashi")]
#[command(about = "Hashiwokakero SAT Solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum BackendArg {
    Cadical,
    Varisat,
}

impl From<BackendArg> for SolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cadical => SolverBackend::Cadical,
            BackendArg::Varisat => SolverBackend::Varisat,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every puzzle matching a pattern
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file glob (overrides config)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Maximum puzzles to solve (overrides config)
        #[arg(short, long)]
        max_puzzles: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SAT backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<BackendArg>,

        /// Print every solved grid
        #[arg(long)]
        show: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Solve a single puzzle file and print the grid
    Check {
        /// Puzzle file
        puzzle: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a solution file against its puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Solution file
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            pattern,
            max_puzzles,
            output,
            backend,
            show,
            verbose,
        } => {
            init_tracing(verbose);
            let overrides = CliOverrides {
                puzzle_pattern: pattern,
                max_puzzles,
                output_dir: output,
                backend: backend.map(Into::into),
                timeout_seconds: None,
            };
            solve_command(config, overrides, show, verbose)
        }
        Commands::Check {
            puzzle,
            config,
            verbose,
        } => {
            init_tracing(verbose);
            check_command(puzzle, config, verbose)
        }
        Commands::Validate { puzzle, solution } => {
            init_tracing(false);
            validate_command(puzzle, solution).map(|_| ())
        }
        Commands::Setup { directory, force } => {
            init_tracing(false);
            setup_command(directory, force)
        }
    }
}

/// Install the fmt subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("{}", ColorOutput::warning(&format!("Failed to set tracing subscriber: {}", e)));
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    show: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting Hashi Solver"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Pattern: {}", settings.input.puzzle_pattern);
        println!("  Max puzzles: {}", settings.input.max_puzzles);
        println!("  Backend: {:?}", settings.solver.backend);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let report = run_batch(&settings).context("Batch run failed")?;

    if report.entries.is_empty() {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "No puzzle files match {}",
                settings.input.puzzle_pattern
            ))
        );
        return Ok(());
    }

    for entry in &report.entries {
        let name = entry.input.display();
        match &entry.outcome {
            PuzzleOutcome::Solved { output } => {
                println!("{}", ColorOutput::success(&format!("solved   {}", name)));
                if show {
                    match Solution::load_from_file(output) {
                        Ok(solution) => println!("{}", SolutionFormatter::format_grid(&solution)),
                        // text output cannot be read back as a solution
                        Err(_) => println!("{}", std::fs::read_to_string(output).unwrap_or_default()),
                    }
                }
            }
            PuzzleOutcome::Unsolved { .. } => {
                println!("{}", ColorOutput::warning(&format!("unsolved {}", name)));
            }
            PuzzleOutcome::Failed { message } => {
                println!("{}", ColorOutput::error(&format!("error    {}: {}", name, message)));
            }
        }
    }

    println!("\n{}", SolutionFormatter::format_batch_summary(&report.statistics));
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Solutions saved to {}",
            settings.output.output_directory.display()
        ))
    );

    Ok(())
}

fn check_command(puzzle_path: PathBuf, config_path: PathBuf, verbose: bool) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let file = load_puzzle_from_file(&puzzle_path)?;

    println!(
        "{}",
        ColorOutput::heading(&format!(
            "Puzzle {} ({}x{}, {} islands)",
            puzzle_path.display(),
            file.puzzle.width,
            file.puzzle.height,
            file.puzzle.island_count()
        ))
    );
    println!("{}", SolutionFormatter::format_puzzle(&file.puzzle));

    let start_time = Instant::now();
    let mut problem = HashiProblem::new(file.puzzle, settings.solver)
        .context("Failed to create Hashi problem")?;
    let solution = problem.solve().context("Failed to solve puzzle")?;
    let total_time = start_time.elapsed();

    match solution {
        Some(solution) => {
            println!(
                "{}",
                ColorOutput::success(&format!("Solved in {:.3}s", total_time.as_secs_f64()))
            );
            println!("{}", SolutionFormatter::format_solution(&solution));
        }
        None => println!("{}", ColorOutput::warning("No solution exists")),
    }

    if verbose {
        println!("\n{}", problem.encoding_statistics());
    }

    Ok(())
}

/// Returns whether the solution is valid
fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<bool> {
    println!("{}", ColorOutput::info("Validating solution..."));

    let file = load_puzzle_from_file(&puzzle_path)?;
    let solution = Solution::load_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let result = SolutionValidator::new().validate(&file.puzzle, &solution);

    if result.is_valid {
        println!("{}", SolutionFormatter::format_grid(&solution));
        println!("{}", ColorOutput::success("Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
        for violation in &result.violations {
            println!("  - {}", violation);
        }
    }

    Ok(result.is_valid)
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let examples_dir = config_dir.join("examples");
    let mut varisat = Settings::default();
    varisat.solver.backend = SolverBackend::Varisat;
    varisat.to_file(&examples_dir.join("varisat.yaml"))?;

    let mut parallel = Settings::default();
    parallel.output.parallel = true;
    parallel.solver.timeout_seconds = 60;
    parallel.to_file(&examples_dir.join("parallel.yaml"))?;
    println!("Created example configurations in: {}", examples_dir.display());

    create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Add puzzles to {}", puzzle_dir.display());
    println!("2. Run: hashi solve --config config/default.yaml");

    Ok(())
}
