#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use picross_solver::picross::grid::Grid;
use picross_solver::picross::parse::{parse_puzzle, parse_puzzle_file};
use picross_solver::picross::puzzle::Puzzle;
use picross_solver::solver::{SolveError, SolveEvent, Solver};
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the picross solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "picross-solver", version, about = "A nonogram (picross) solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the picross solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// Literal puzzle input as a string (e.g. "2 2\n1\n1\n1\n1").
        /// The first line is HEIGHT WIDTH, then one hint line per row and
        /// per column.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.non` puzzle file under a directory.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, printing every progress snapshot during the
    /// solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Abandon the solve once the trial count carried on progress events
    /// crosses this ceiling. The engine itself never stops; this is
    /// enforced here by ceasing to pull events. 0 disables the ceiling.
    #[arg(long, default_value_t = 10_000)]
    pub(crate) max_trials: u64,
}

/// What one solve attempt produced, for reporting.
struct SolveOutcome {
    result: Result<Grid, Vec<SolveError>>,
    count: u64,
    partials: usize,
}

/// Pulls events from the engine until a terminal event or the trial
/// ceiling, implementing the host side of the protocol.
fn run_engine(puzzle: Puzzle, common: &CommonOptions) -> SolveOutcome {
    let mut partials = 0usize;
    let mut count = 0u64;

    for event in Solver::new(puzzle).solve() {
        count = event.count();
        match event {
            SolveEvent::Partial { grid, .. } => {
                partials += 1;
                if common.debug {
                    println!("trials {count}:\n{grid}");
                }
                if common.max_trials > 0 && count > common.max_trials {
                    // The ceiling is the host's: stop pulling and
                    // synthesize the terminal error ourselves.
                    return SolveOutcome {
                        result: Err(vec![SolveError::TrialLimit {
                            limit: common.max_trials,
                        }]),
                        count,
                        partials,
                    };
                }
            }
            SolveEvent::Solution { grid, .. } => {
                return SolveOutcome {
                    result: Ok(grid),
                    count,
                    partials,
                };
            }
            SolveEvent::Error { errors, .. } => {
                return SolveOutcome {
                    result: Err(errors),
                    count,
                    partials,
                };
            }
        }
    }

    // The engine always ends with a terminal event; an empty sequence
    // cannot happen, but report it as unsolved rather than panicking.
    SolveOutcome {
        result: Err(vec![SolveError::NoSolution]),
        count,
        partials,
    }
}

/// Solves one parsed puzzle and reports results including stats.
///
/// # Errors
///
/// Returns the joined error messages when the puzzle turns out to be
/// infeasible, unsolved or over the trial ceiling.
pub(crate) fn solve_and_report(
    puzzle: Puzzle,
    common: &CommonOptions,
    label: Option<&PathBuf>,
    parse_time: Duration,
) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }
    println!("{puzzle}");

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let outcome = run_engine(puzzle, common);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            outcome.count,
            outcome.partials,
            allocated_mib,
            resident_mib,
        );
    }

    match outcome.result {
        Ok(grid) => {
            println!("Solution:\n{grid}");
            println!("SOLVED");
            Ok(())
        }
        Err(errors) => Err(errors.iter().join(" / ")),
    }
}

/// Solve a puzzle file.
///
/// # Errors
///
/// If the puzzle file doesn't exist or cannot be parsed, or the solve
/// fails.
pub(crate) fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let puzzle = parse_puzzle_file(path)
        .map_err(|e| format!("Error parsing puzzle file: {e}"))?;
    let parse_time = time.elapsed();

    solve_and_report(puzzle, common, Some(path), parse_time)
}

/// Solve a puzzle passed as literal text.
///
/// # Errors
///
/// If the text cannot be parsed, or the solve fails.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let puzzle = parse_puzzle(Cursor::new(input))
        .map_err(|e| format!("Error parsing puzzle input: {e}"))?;
    let parse_time = time.elapsed();

    solve_and_report(puzzle, common, None, parse_time)
}

/// Solves a directory of puzzle files.
/// This function iterates over all `.non` files in the directory, parses
/// each file, solves it, and reports the results.
///
/// # Errors
///
/// If the provided path is not a directory, or any puzzle fails.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "non") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(&file_path, common)?;
    }

    Ok(())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and solve statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    count: u64,
    partials: usize,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Solve Statistics ]==========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line_with_rate("Trials", count, elapsed_secs);
    stat_line("Progress events", partials);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
