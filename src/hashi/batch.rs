//! Solve many puzzle files in one run

use super::{HashiProblem, SolutionReport};
use crate::config::{OutputFormat, Settings};
use crate::puzzle::{load_puzzle_from_file, PuzzleFile};
use crate::utils::SolutionFormatter;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSetBuilder};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Totals for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStatistics {
    pub total: usize,
    pub solved: usize,
    pub unsolved: usize,
    pub errors: usize,
    pub total_time: Duration,
}

/// What happened to one puzzle file
#[derive(Debug, Clone)]
pub enum PuzzleOutcome {
    Solved { output: PathBuf },
    Unsolved { output: PathBuf },
    Failed { message: String },
}

/// Per-file result of a batch run
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub outcome: PuzzleOutcome,
}

/// Everything a batch run produced
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub statistics: BatchStatistics,
}

/// Expand the input pattern into at most `max_puzzles` files, sorted by path.
///
/// Wildcards may appear in any component; the walk starts at the longest
/// prefix without glob characters.
pub fn collect_puzzle_files(pattern: &str, max_puzzles: usize) -> Result<Vec<PathBuf>> {
    let pattern_path = Path::new(pattern);
    let mut files = Vec::new();

    if has_glob_chars(pattern) {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid puzzle pattern: {}", pattern))?;
        let mut builder = GlobSetBuilder::new();
        builder.add(glob);
        let set = builder.build().context("Failed to build glob set")?;

        let (base_dir, depth) = walk_root(pattern_path);
        let mut walker = WalkDir::new(&base_dir);
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(base = %base_dir.display(), error = %e, "skipping unreadable path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            // a pattern without a directory prefix is matched against `./`-relative paths
            let candidate = if base_dir.as_os_str() == "." && !pattern.starts_with('.') {
                entry.path().strip_prefix(".").unwrap_or(entry.path())
            } else {
                entry.path()
            };
            if set.is_match(candidate) {
                files.push(entry.path().to_path_buf());
            }
        }
    } else if pattern_path.is_file() {
        files.push(pattern_path.to_path_buf());
    }

    files.sort();
    files.truncate(max_puzzles);
    Ok(files)
}

fn has_glob_chars(text: &str) -> bool {
    text.contains(|c| matches!(c, '*' | '?' | '[' | '{'))
}

/// Longest glob-free prefix of `pattern` and how deep below it a match can sit.
///
/// `None` depth means unbounded, which `**` requires.
fn walk_root(pattern: &Path) -> (PathBuf, Option<usize>) {
    let mut base = PathBuf::new();
    let mut remaining = 0;
    let mut recursive = false;

    for component in pattern.components() {
        let text = component.as_os_str().to_string_lossy();
        if remaining == 0 && !has_glob_chars(&text) {
            base.push(component);
        } else {
            remaining += 1;
            recursive |= text.contains("**");
        }
    }

    if base.as_os_str().is_empty() {
        base.push(".");
    }
    (base, if recursive { None } else { Some(remaining) })
}

/// Solve every puzzle the settings select and write one output file per puzzle.
///
/// A file that cannot be loaded or solved is counted under `errors` and the
/// run continues.
pub fn run_batch(settings: &Settings) -> Result<BatchReport> {
    let start_time = Instant::now();

    let files = collect_puzzle_files(&settings.input.puzzle_pattern, settings.input.max_puzzles)?;
    info!(
        files = files.len(),
        pattern = %settings.input.puzzle_pattern,
        "starting batch"
    );

    let output_dir = &settings.output.output_directory;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let process = |path: &PathBuf| BatchEntry {
        input: path.clone(),
        outcome: match solve_file(path, settings) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(file = %path.display(), error = %format!("{:#}", e), "puzzle failed");
                PuzzleOutcome::Failed {
                    message: format!("{:#}", e),
                }
            }
        },
    };

    let entries: Vec<BatchEntry> = if settings.output.parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    let mut statistics = BatchStatistics {
        total: entries.len(),
        ..BatchStatistics::default()
    };
    for entry in &entries {
        match entry.outcome {
            PuzzleOutcome::Solved { .. } => statistics.solved += 1,
            PuzzleOutcome::Unsolved { .. } => statistics.unsolved += 1,
            PuzzleOutcome::Failed { .. } => statistics.errors += 1,
        }
    }
    statistics.total_time = start_time.elapsed();

    info!(
        total = statistics.total,
        solved = statistics.solved,
        unsolved = statistics.unsolved,
        errors = statistics.errors,
        "batch finished"
    );

    Ok(BatchReport {
        entries,
        statistics,
    })
}

/// Solve one puzzle file in its own session and write its output
pub fn solve_file(path: &Path, settings: &Settings) -> Result<PuzzleOutcome> {
    let file = load_puzzle_from_file(path)?;
    let mut problem = HashiProblem::new(file.puzzle.clone(), settings.solver.clone())
        .with_context(|| format!("Cannot solve {}", path.display()))?;
    let solution = problem
        .solve()
        .with_context(|| format!("Solving {} failed", path.display()))?;

    let output = output_path(path, &settings.output.output_directory, settings.output.format);
    write_output(&file, solution.as_ref(), &output, settings.output.format)?;
    debug!(file = %path.display(), output = %output.display(), "wrote solution");

    Ok(match solution {
        Some(_) => PuzzleOutcome::Solved { output },
        None => PuzzleOutcome::Unsolved { output },
    })
}

/// `<output_dir>/<stem>_solution.<ext>`
pub fn output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "puzzle".to_string());
    output_dir.join(format!("{}_solution.{}", stem, format.extension()))
}

fn write_output(
    file: &PuzzleFile,
    solution: Option<&super::Solution>,
    output: &Path,
    format: OutputFormat,
) -> Result<()> {
    let written = match format {
        OutputFormat::Json => SolutionReport::new(file, solution).save_to_file(output),
        OutputFormat::Text => {
            let content = match solution {
                Some(solution) => SolutionFormatter::format_solution(solution),
                None => format!(
                    "No solution\n\n{}",
                    SolutionFormatter::format_puzzle(&file.puzzle)
                ),
            };
            std::fs::write(output, content).map_err(anyhow::Error::from)
        }
    };
    written.with_context(|| format!("Failed to write solution to: {}", output.display()))
}
