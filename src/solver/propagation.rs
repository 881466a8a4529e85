//! Iterative constraint propagation over row and column possibility sets.
//!
//! The propagator never guesses: a cell is written only when every
//! remaining possibility for its line agrees on it. Each pass filters the
//! possibility sets of dirty lines against the cells already fixed by the
//! orthogonal axis, extracts the cells all survivors agree on, writes them
//! into the grid, and marks the crossing lines dirty. The loop ends at a
//! fixpoint (no line dirty after a full row+column cycle) or with a
//! contradiction when some line's possibility set empties.
//!
//! The dirty bookkeeping is the point of this module: each pass touches
//! only the lines an earlier write could actually have affected, not all
//! H+W of them. Dirty indices live in hash sets but are always drained in
//! index order, so passes are deterministic.

use crate::picross::cell::Cell;
use crate::picross::grid::Grid;
use crate::picross::line::Pattern;
use crate::picross::puzzle::{Axis, Puzzle};
use crate::solver::enumerate::{LeftmostPatterns, PatternSource};
use crate::solver::error::SolveError;
use rustc_hash::FxHashSet;

/// The outcome of running propagation to fixpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Propagation {
    /// The grid with every deduced certainty written in. May still
    /// contain `Unknown` cells; the search resolves those.
    pub grid: Grid,
    /// Per-row possibility sets, filtered down to the fixpoint state.
    pub row_candidates: Vec<Vec<Pattern>>,
    /// Per-column possibility sets, filtered down to the fixpoint state.
    pub col_candidates: Vec<Vec<Pattern>>,
    /// Number of row+column cycles run before the fixpoint.
    pub passes: u64,
}

/// A contradiction uncovered deductively, with the work done so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagationFailure {
    /// Always a [`SolveError::Contradiction`] naming the offending line.
    pub error: SolveError,
    /// Number of cycles run when the contradiction surfaced.
    pub passes: u64,
}

fn pattern_fits(pattern: &Pattern, cells: &[Cell]) -> bool {
    cells
        .iter()
        .enumerate()
        .all(|(i, cell)| cell.agrees(pattern[i]))
}

/// The value every remaining possibility agrees on at `pos`, if any.
///
/// Callers guarantee `candidates` is non-empty.
fn unanimous(candidates: &[Pattern], pos: usize) -> Option<bool> {
    let first = candidates[0][pos];
    candidates[1..]
        .iter()
        .all(|pattern| pattern[pos] == first)
        .then_some(first)
}

/// Runs propagation with the default enumeration strategy.
///
/// # Errors
///
/// Returns a [`PropagationFailure`] when some line's possibility set
/// empties: the puzzle is infeasible and the failure names the line.
pub fn propagate(puzzle: &Puzzle) -> Result<Propagation, PropagationFailure> {
    propagate_with(puzzle, &LeftmostPatterns)
}

/// Runs propagation to fixpoint with an injected enumeration strategy.
///
/// # Errors
///
/// See [`propagate`].
pub fn propagate_with<S: PatternSource>(
    puzzle: &Puzzle,
    source: &S,
) -> Result<Propagation, PropagationFailure> {
    let height = puzzle.height();
    let width = puzzle.width();

    let mut row_candidates: Vec<Vec<Pattern>> = puzzle
        .row_hints()
        .iter()
        .map(|hint| source.patterns(width, hint))
        .collect();
    let mut col_candidates: Vec<Vec<Pattern>> = puzzle
        .col_hints()
        .iter()
        .map(|hint| source.patterns(height, hint))
        .collect();

    let mut grid = Grid::unknown(height, width);
    let mut dirty_rows: FxHashSet<usize> = (0..height).collect();
    let mut dirty_cols: FxHashSet<usize> = (0..width).collect();
    let mut passes = 0u64;

    loop {
        passes += 1;

        // Rows: filter against fixed cells, write certainties, mark the
        // crossing columns dirty.
        for index in 0..height {
            if !dirty_rows.remove(&index) {
                continue;
            }
            let cells = grid.row(index).to_vec();
            let candidates = &mut row_candidates[index];
            candidates.retain(|pattern| pattern_fits(pattern, &cells));
            if candidates.is_empty() {
                return Err(PropagationFailure {
                    error: SolveError::Contradiction {
                        axis: Axis::Row,
                        index,
                    },
                    passes,
                });
            }
            for col in 0..width {
                if grid.get(index, col).is_known() {
                    continue;
                }
                if let Some(filled) = unanimous(candidates, col) {
                    grid.set(index, col, Cell::from_filled(filled));
                    dirty_cols.insert(col);
                }
            }
        }

        // Columns, symmetrically, marking rows dirty.
        for index in 0..width {
            if !dirty_cols.remove(&index) {
                continue;
            }
            let cells: Vec<Cell> = grid.column(index).collect();
            let candidates = &mut col_candidates[index];
            candidates.retain(|pattern| pattern_fits(pattern, &cells));
            if candidates.is_empty() {
                return Err(PropagationFailure {
                    error: SolveError::Contradiction {
                        axis: Axis::Col,
                        index,
                    },
                    passes,
                });
            }
            for row in 0..height {
                if grid.get(row, index).is_known() {
                    continue;
                }
                if let Some(filled) = unanimous(candidates, row) {
                    grid.set(row, index, Cell::from_filled(filled));
                    dirty_rows.insert(row);
                }
            }
        }

        if dirty_rows.is_empty() {
            return Ok(Propagation {
                grid,
                row_candidates,
                col_candidates,
                passes,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::enumerate::line_patterns;
    use smallvec::smallvec;

    #[test]
    fn test_single_cell() {
        let puzzle = Puzzle::new(vec![smallvec![1]], vec![smallvec![1]]);
        let result = propagate(&puzzle).unwrap();
        assert_eq!(result.grid.get(0, 0), Cell::Filled);
        assert!(result.grid.is_complete());
    }

    #[test]
    fn test_full_bar() {
        let puzzle = Puzzle::new(vec![smallvec![5]], vec![smallvec![1]; 5]);
        let result = propagate(&puzzle).unwrap();
        assert!(result.grid.is_complete());
        assert!(result.grid.row(0).iter().all(|&c| c == Cell::Filled));
    }

    #[test]
    fn test_overlap_deduction() {
        // [3] in 5 cells: every placement fills the middle cell, the
        // outer cells stay open.
        let candidates = line_patterns(5, &[3]);
        assert_eq!(unanimous(&candidates, 2), Some(true));
        assert_eq!(unanimous(&candidates, 0), None);
        assert_eq!(unanimous(&candidates, 4), None);
    }

    #[test]
    fn test_contradiction_reports_line() {
        // Every row forces its middle cell, so the middle column becomes
        // three filled cells and its [2] hint has no survivors.
        let puzzle = Puzzle::new(
            vec![smallvec![2]; 3],
            vec![smallvec![2], smallvec![2], smallvec![2]],
        );
        let failure = propagate(&puzzle).unwrap_err();
        assert_eq!(
            failure.error,
            SolveError::Contradiction {
                axis: Axis::Col,
                index: 1
            }
        );
        assert!(failure.passes >= 1);
    }

    #[test]
    fn test_no_progress_is_one_pass() {
        // A permutation puzzle: nothing is forced, fixpoint after the
        // first full cycle.
        let puzzle = Puzzle::new(vec![smallvec![1]; 3], vec![smallvec![1]; 3]);
        let result = propagate(&puzzle).unwrap();
        assert_eq!(result.passes, 1);
        assert_eq!(result.grid.unknown_cells(), 9);
    }

    #[test]
    fn test_sets_only_shrink() {
        let puzzle = Puzzle::new(
            vec![smallvec![5], smallvec![1, 1], smallvec![5], smallvec![1], smallvec![1]],
            vec![
                smallvec![5],
                smallvec![1, 1],
                smallvec![1, 1],
                smallvec![1, 1],
                smallvec![3],
            ],
        );
        let result = propagate(&puzzle).unwrap();
        for (i, hint) in puzzle.row_hints().iter().enumerate() {
            let initial = line_patterns(puzzle.width(), hint).len();
            assert!(result.row_candidates[i].len() <= initial);
            assert!(!result.row_candidates[i].is_empty());
        }
    }

    #[test]
    fn test_fixpoint_is_idempotent() {
        let puzzle = Puzzle::new(
            vec![smallvec![5], smallvec![1, 1], smallvec![5], smallvec![1], smallvec![1]],
            vec![
                smallvec![5],
                smallvec![1, 1],
                smallvec![1, 1],
                smallvec![1, 1],
                smallvec![3],
            ],
        );
        let result = propagate(&puzzle).unwrap();

        // Re-sweep every line by hand: nothing further may change.
        let grid = result.grid.clone();
        let mut row_candidates = result.row_candidates.clone();
        for index in 0..puzzle.height() {
            let cells = grid.row(index).to_vec();
            let before = row_candidates[index].len();
            row_candidates[index].retain(|p| pattern_fits(p, &cells));
            assert_eq!(row_candidates[index].len(), before);
            for col in 0..puzzle.width() {
                if !grid.get(index, col).is_known() {
                    assert_eq!(unanimous(&row_candidates[index], col), None);
                }
            }
        }
        let mut col_candidates = result.col_candidates.clone();
        for index in 0..puzzle.width() {
            let cells: Vec<Cell> = grid.column(index).collect();
            let before = col_candidates[index].len();
            col_candidates[index].retain(|p| pattern_fits(p, &cells));
            assert_eq!(col_candidates[index].len(), before);
            for row in 0..puzzle.height() {
                if !grid.get(row, index).is_known() {
                    assert_eq!(unanimous(&col_candidates[index], row), None);
                }
            }
        }
    }

    #[test]
    fn test_propagation_solves_unique_puzzle() {
        // The "P" pentomino-ish shape is fully forced by deduction.
        let puzzle = Puzzle::new(
            vec![smallvec![5], smallvec![1, 1], smallvec![5], smallvec![1], smallvec![1]],
            vec![
                smallvec![5],
                smallvec![1, 1],
                smallvec![1, 1],
                smallvec![1, 1],
                smallvec![3],
            ],
        );
        let result = propagate(&puzzle).unwrap();
        assert!(result.grid.is_complete());
        assert_eq!(result.grid.to_string(), "#####\n#...#\n#####\n#....\n#....\n");
    }
}
