//! Structural feasibility checks, run before any enumeration or search.
//!
//! Everything here is O(H+W): per-line shape and span checks plus the
//! global filled-cell sum comparison. A puzzle that fails any of these can
//! never have a solution, so the engine rejects it without doing any
//! combinatorial work. All problems found in one pass are collected; the
//! caller decides how many to surface.

use crate::picross::puzzle::{Axis, Puzzle};
use crate::solver::error::SolveError;

/// Checks every line of one axis, pushing problems into `errors`.
fn check_axis(puzzle: &Puzzle, axis: Axis, errors: &mut Vec<SolveError>) {
    let length = puzzle.line_length(axis);
    for (index, hint) in puzzle.hints(axis).iter().enumerate() {
        if hint.is_empty() {
            errors.push(SolveError::HintEmpty { axis, index });
            continue;
        }
        if hint.iter().any(|&entry| entry == 0) {
            errors.push(SolveError::HintValue { axis, index });
        }
        let required = hint.iter().map(|&entry| entry as usize).sum::<usize>() + hint.len() - 1;
        if required > length {
            errors.push(SolveError::HintOverflow {
                axis,
                index,
                required,
                length,
            });
        }
    }
}

fn axis_total(puzzle: &Puzzle, axis: Axis) -> u64 {
    puzzle
        .hints(axis)
        .iter()
        .flat_map(|hint| hint.iter())
        .map(|&entry| u64::from(entry))
        .sum()
}

/// Validates a puzzle's hints, returning every problem found.
///
/// An empty vector means the puzzle passed all structural checks — which
/// does not yet mean it is solvable, only that it is not provably
/// infeasible without search.
#[must_use]
pub fn check_puzzle(puzzle: &Puzzle) -> Vec<SolveError> {
    let mut errors = Vec::new();
    check_axis(puzzle, Axis::Row, &mut errors);
    check_axis(puzzle, Axis::Col, &mut errors);

    let rows = axis_total(puzzle, Axis::Row);
    let cols = axis_total(puzzle, Axis::Col);
    if rows != cols {
        errors.push(SolveError::HintSumMismatch { rows, cols });
    }

    errors
}
