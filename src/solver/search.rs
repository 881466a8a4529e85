//! Depth-first assignment of rows with incremental column pruning.
//!
//! The search picks up where propagation stopped: each row has a filtered
//! candidate list, and the grid may still contain `Unknown` cells. Rows
//! are assigned top to bottom, candidates tried in enumeration order so
//! identical hints always search identically. After each tentative row
//! assignment every column's prefix is checked with the weak-but-sound
//! rule from [`crate::picross::line::is_valid_prefix`]; branches that fail
//! it are discarded without recursing. A full assignment is accepted only
//! when every column matches its hint exactly.
//!
//! Instead of native coroutines the search is an explicit frame stack:
//! each frame owns the row index, a cursor into that row's candidates and
//! its grid snapshot, so [`Search::resume`] can return at every yield
//! point and continue later from exactly where it left off. Each branch
//! clones the grid it mutates; nothing is shared across branches.

use crate::picross::grid::Grid;
use crate::picross::line::{Pattern, is_valid_prefix, matches_hint};
use crate::picross::puzzle::Hint;
use crate::solver::error::SolveError;
use crate::solver::event::SolveEvent;

/// How many accepted expansions pass between `Partial` events by default.
/// A responsiveness/overhead trade-off, not part of any contract.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10;

/// One suspended point of the depth-first walk: about to try candidates
/// for `row`, on a grid with rows `0..row` already assigned.
#[derive(Clone, Debug)]
struct Frame {
    row: usize,
    next: usize,
    grid: Grid,
}

/// The resumable backtracking machine.
#[derive(Clone, Debug)]
pub struct Search {
    col_hints: Vec<Hint>,
    row_candidates: Vec<Vec<Pattern>>,
    stack: Vec<Frame>,
    nodes: u64,
    passes: u64,
    interval: u64,
    finished: bool,
}

impl Search {
    /// Builds a search from the propagator's output.
    ///
    /// `grid` carries the deduced certainties, `row_candidates` the
    /// filtered per-row possibility sets, and `passes` the propagation
    /// cycle count that seeds the cumulative work counter.
    #[must_use]
    pub fn new(
        grid: Grid,
        row_candidates: Vec<Vec<Pattern>>,
        col_hints: Vec<Hint>,
        passes: u64,
        interval: u64,
    ) -> Self {
        Self {
            col_hints,
            row_candidates,
            stack: vec![Frame {
                row: 0,
                next: 0,
                grid,
            }],
            nodes: 0,
            passes,
            interval: interval.max(1),
            finished: false,
        }
    }

    /// Accepted (non-pruned) candidate expansions so far.
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Whether a terminal event has already been produced.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    const fn count(&self) -> u64 {
        self.passes + self.nodes
    }

    fn columns_match(grid: &Grid, col_hints: &[Hint]) -> bool {
        col_hints
            .iter()
            .enumerate()
            .all(|(col, hint)| matches_hint(grid.column(col), hint))
    }

    fn prefixes_valid(grid: &Grid, col_hints: &[Hint], rows: usize) -> bool {
        col_hints
            .iter()
            .enumerate()
            .all(|(col, hint)| is_valid_prefix(grid.column_prefix(col, rows), hint))
    }

    /// Runs until the next yield point and returns its event.
    ///
    /// Yield points are: every `interval`-th accepted expansion
    /// (`Partial`), the first fully consistent grid (`Solution`), and
    /// exhaustion of the whole tree (`Error` with
    /// [`SolveError::NoSolution`]). After a terminal event the search is
    /// finished and must not be resumed again.
    pub fn resume(&mut self) -> SolveEvent {
        debug_assert!(!self.finished);
        let height = self.row_candidates.len();

        loop {
            let Some(frame) = self.stack.last_mut() else {
                self.finished = true;
                return SolveEvent::Error {
                    errors: vec![SolveError::NoSolution],
                    count: self.count(),
                };
            };

            if frame.row == height {
                if Self::columns_match(&frame.grid, &self.col_hints) {
                    let grid = frame.grid.clone();
                    self.finished = true;
                    return SolveEvent::Solution {
                        grid,
                        count: self.passes + self.nodes,
                    };
                }
                self.stack.pop();
                continue;
            }

            let row = frame.row;
            let candidates = &self.row_candidates[row];
            if frame.next >= candidates.len() {
                self.stack.pop();
                continue;
            }

            let candidate = &candidates[frame.next];
            frame.next += 1;

            let mut grid = frame.grid.clone();
            grid.set_row(row, candidate);
            if !Self::prefixes_valid(&grid, &self.col_hints, row + 1) {
                continue;
            }

            self.nodes += 1;
            let progress_due = self.nodes % self.interval == 0;
            let snapshot = if progress_due { Some(grid.clone()) } else { None };
            self.stack.push(Frame {
                row: row + 1,
                next: 0,
                grid,
            });
            if let Some(grid) = snapshot {
                return SolveEvent::Partial {
                    grid,
                    count: self.passes + self.nodes,
                };
            }
        }
    }
}
