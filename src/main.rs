//! # picross-solver
//!
//! `picross-solver` is a command-line nonogram (picross) solver. It reads
//! a puzzle's row and column hints, deduces what it can by constraint
//! propagation, resolves the rest by backtracking search, and prints the
//! solved grid.
//!
//! ## Usage
//!
//! ```sh
//! picross-solver <path_to_puzzle_file>
//! picross-solver file --path puzzle.non
//! picross-solver text --input "2 2\n1\n1\n1\n1"
//! picross-solver dir --path puzzles/
//! picross-solver completions bash
//! ```
//!
//! ### Common options
//!
//! -   `-d, --debug`: print every progress snapshot (default: `false`).
//! -   `-s, --stats`: print solve statistics (default: `true`).
//! -   `--max-trials <N>`: abandon the solve once the trial count crosses
//!     `N` (default: `10000`, `0` disables). The engine itself never
//!     stops; the ceiling is enforced here by ceasing to pull events.
//!
//! ### Puzzle file format
//!
//! Lines starting with `c` are comments. The first significant line is
//! `HEIGHT WIDTH`; then one hint line per row (top to bottom) and one per
//! column (left to right), each a list of block lengths separated by
//! commas and/or whitespace.

use clap::{CommandFactory, Parser};

mod command_line;

use command_line::cli::{Cli, Commands};

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the picross solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand. This defaults to solving a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            exit_on_error(command_line::cli::solve_file(&path, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => {
            exit_on_error(command_line::cli::solve_file(&path, &common));
        }
        Some(Commands::Text { input, common }) => {
            exit_on_error(command_line::cli::solve_text(&input, &common));
        }
        Some(Commands::Dir { path, common }) => {
            exit_on_error(command_line::cli::solve_dir(&path, &common));
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "picross-solver", &mut std::io::stdout());
        }
        None => {
            // Reached when no subcommand was provided and `cli.path` was
            // also None; a provided path was handled above.
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}

fn exit_on_error(result: Result<(), String>) {
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
