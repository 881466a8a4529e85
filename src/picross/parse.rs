//! A parser for the plain-text puzzle format.
//!
//! The format is line oriented:
//! - Lines starting with `c` are comments; blank lines are skipped.
//! - The first significant line is `HEIGHT WIDTH`.
//! - Then HEIGHT row-hint lines followed by WIDTH column-hint lines, each
//!   a non-empty list of block lengths separated by commas and/or
//!   whitespace.
//!
//! ```text
//! c 2x2 diagonal
//! 2 2
//! 1
//! 1
//! 1
//! 1
//! ```
//!
//! The parser only checks syntax and the declared shape; feasibility
//! checks (zero entries, overflow, sum mismatch) belong to the validator.

use crate::picross::puzzle::{Hint, Puzzle};
use crate::solver::error::SolveError;
use std::fmt::Display;
use std::io::{self, BufRead};
use std::path::Path;

/// Why a puzzle file could not be turned into a [`Puzzle`].
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A line could not be tokenized as expected.
    Syntax {
        /// One-based line number in the input.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
    /// The hint lines disagree with the declared dimensions.
    Puzzle(SolveError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Syntax { line, message } => write!(f, "line {line}: {message}"),
            Self::Puzzle(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Syntax { .. } => None,
            Self::Puzzle(err) => Some(err),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
}

fn parse_numbers(line: &str, line_no: usize) -> Result<Vec<u32>, ParseError> {
    tokens(line)
        .map(|tok| {
            tok.parse::<u32>().map_err(|_| ParseError::Syntax {
                line: line_no,
                message: format!("expected a number, found '{tok}'"),
            })
        })
        .collect()
}

/// Parses a puzzle from any buffered reader.
///
/// # Errors
///
/// Returns [`ParseError::Io`] when reading fails, [`ParseError::Syntax`]
/// for malformed lines, and [`ParseError::Puzzle`] when the number of hint
/// lines disagrees with the declared `HEIGHT WIDTH` header.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Puzzle, ParseError> {
    let mut header: Option<(usize, usize)> = None;
    let mut hints: Vec<Hint> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        match header {
            None => {
                let dims = parse_numbers(trimmed, line_no)?;
                let [height, width] = dims.as_slice() else {
                    return Err(ParseError::Syntax {
                        line: line_no,
                        message: "expected 'HEIGHT WIDTH'".to_string(),
                    });
                };
                header = Some((*height as usize, *width as usize));
            }
            Some((height, width)) => {
                if hints.len() == height + width {
                    return Err(ParseError::Syntax {
                        line: line_no,
                        message: "unexpected content after the hint lines".to_string(),
                    });
                }
                hints.push(parse_numbers(trimmed, line_no)?.into());
            }
        }
    }

    let Some((height, width)) = header else {
        return Err(ParseError::Syntax {
            line: 0,
            message: "missing 'HEIGHT WIDTH' header".to_string(),
        });
    };

    let col_hints = hints.split_off(hints.len().min(height));
    Puzzle::with_size(hints, col_hints, height, width).map_err(ParseError::Puzzle)
}

/// Parses a puzzle file from disk.
///
/// # Errors
///
/// See [`parse_puzzle`]; file-open failures surface as [`ParseError::Io`].
pub fn parse_puzzle_file<P: AsRef<Path>>(path: P) -> Result<Puzzle, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_puzzle(io::BufReader::new(file))
}
