//! The solve entry points and the pull-based event sequence.
//!
//! A [`Solver`] bundles a puzzle with its enumeration strategy and
//! progress cadence; [`Solver::solve`] hands back a [`Solve`], an iterator
//! over [`SolveEvent`]s. All work happens inside `next()`: validation and
//! propagation to fixpoint run in the first pull (propagation is not
//! interruptible mid-pass), after which each pull drives the backtracking
//! machine to its next yield point. Between pulls the engine does nothing,
//! so a host cancels a solve by simply dropping the iterator, and bounds
//! it by watching the count carried on every event.

use crate::picross::line::matches_hint;
use crate::picross::puzzle::{Hint, Puzzle};
use crate::solver::enumerate::{LeftmostPatterns, PatternSource};
use crate::solver::error::SolveError;
use crate::solver::event::SolveEvent;
use crate::solver::propagation::propagate_with;
use crate::solver::search::{DEFAULT_PROGRESS_INTERVAL, Search};
use crate::solver::validate;

/// A configured solve of one puzzle.
#[derive(Clone, Debug)]
pub struct Solver<S: PatternSource = LeftmostPatterns> {
    puzzle: Puzzle,
    patterns: S,
    progress_interval: u64,
}

impl Solver {
    /// Creates a solver with the default enumeration strategy.
    #[must_use]
    pub const fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            patterns: LeftmostPatterns,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl<S: PatternSource> Solver<S> {
    /// Creates a solver with an injected enumeration strategy.
    #[must_use]
    pub const fn with_patterns(puzzle: Puzzle, patterns: S) -> Self {
        Self {
            puzzle,
            patterns,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Sets how many accepted expansions pass between `Partial` events.
    ///
    /// Purely a responsiveness/overhead trade-off; values are clamped to
    /// at least 1.
    #[must_use]
    pub const fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Starts the solve, returning its event sequence.
    ///
    /// No work happens until the first `next()` call.
    #[must_use]
    pub fn solve(self) -> Solve<S> {
        Solve {
            stage: Stage::Pending(self),
        }
    }
}

/// Solves a puzzle given raw per-row and per-column hints.
///
/// Equivalent to `Solver::new(Puzzle::new(row_hints, col_hints)).solve()`.
#[must_use]
pub fn solve(row_hints: Vec<Hint>, col_hints: Vec<Hint>) -> Solve {
    Solver::new(Puzzle::new(row_hints, col_hints)).solve()
}

enum Stage<S: PatternSource> {
    Pending(Solver<S>),
    Running(Search),
    Finished,
}

/// The lazy event sequence of one solve.
///
/// Yields zero or more `Partial` events and then exactly one `Solution`
/// or `Error`; after the terminal event the iterator is fused. The
/// sequence is not restartable — build a new [`Solver`] to solve again.
pub struct Solve<S: PatternSource = LeftmostPatterns> {
    stage: Stage<S>,
}

impl<S: PatternSource> Solve<S> {
    fn begin(&mut self, solver: Solver<S>) -> SolveEvent {
        let errors = validate::check_puzzle(&solver.puzzle);
        if !errors.is_empty() {
            return SolveEvent::Error { errors, count: 0 };
        }

        let propagated = match propagate_with(&solver.puzzle, &solver.patterns) {
            Ok(propagated) => propagated,
            Err(failure) => {
                return SolveEvent::Error {
                    errors: vec![failure.error],
                    count: failure.passes,
                };
            }
        };

        if propagated.grid.is_complete() {
            // Deduction alone finished the grid; verify both axes and
            // skip the search entirely so the count stays at the pass
            // count.
            let (row_hints, col_hints) = solver.puzzle.into_hints();
            let grid = propagated.grid;
            let rows_ok = row_hints
                .iter()
                .enumerate()
                .all(|(row, hint)| matches_hint(grid.row(row).iter().copied(), hint));
            let cols_ok = col_hints
                .iter()
                .enumerate()
                .all(|(col, hint)| matches_hint(grid.column(col), hint));
            if rows_ok && cols_ok {
                return SolveEvent::Solution {
                    grid,
                    count: propagated.passes,
                };
            }
            return SolveEvent::Error {
                errors: vec![SolveError::NoSolution],
                count: propagated.passes,
            };
        }

        let (_, col_hints) = solver.puzzle.into_hints();
        let mut search = Search::new(
            propagated.grid,
            propagated.row_candidates,
            col_hints,
            propagated.passes,
            solver.progress_interval,
        );
        let event = search.resume();
        if !event.is_terminal() {
            self.stage = Stage::Running(search);
        }
        event
    }
}

impl<S: PatternSource> Iterator for Solve<S> {
    type Item = SolveEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.stage, Stage::Finished) {
            Stage::Pending(solver) => Some(self.begin(solver)),
            Stage::Running(mut search) => {
                let event = search.resume();
                if !event.is_terminal() {
                    self.stage = Stage::Running(search);
                }
                Some(event)
            }
            Stage::Finished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picross::cell::Cell;
    use crate::picross::puzzle::Axis;
    use smallvec::smallvec;

    fn hints(lines: &[&[u32]]) -> Vec<Hint> {
        lines.iter().map(|&line| Hint::from_slice(line)).collect()
    }

    #[test]
    fn test_single_cell_puzzle() {
        let events: Vec<SolveEvent> = solve(hints(&[&[1]]), hints(&[&[1]])).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SolveEvent::Solution { grid, .. } => {
                assert_eq!(grid.encode(), vec![vec![1]]);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn test_one_by_five_bar() {
        let events: Vec<SolveEvent> =
            solve(hints(&[&[5]]), hints(&[&[1], &[1], &[1], &[1], &[1]])).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SolveEvent::Solution { grid, .. } => {
                assert_eq!(grid.encode(), vec![vec![1, 1, 1, 1, 1]]);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_short_circuits() {
        // Sum mismatch: reported before any enumeration, count 0.
        let events: Vec<SolveEvent> = solve(hints(&[&[3]]), hints(&[&[1]])).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SolveEvent::Error { errors, count } => {
                assert_eq!(*count, 0);
                assert!(
                    errors.contains(&SolveError::HintSumMismatch { rows: 3, cols: 1 })
                );
            }
            other => panic!("expected an error, got {other:?}"),
        }
    }

    #[test]
    fn test_contradiction_ends_sequence() {
        let events: Vec<SolveEvent> = solve(
            hints(&[&[2], &[2], &[2]]),
            hints(&[&[2], &[2], &[2]]),
        )
        .collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SolveEvent::Error { errors, .. } => {
                assert_eq!(
                    errors.as_slice(),
                    &[SolveError::Contradiction {
                        axis: Axis::Col,
                        index: 1
                    }]
                );
            }
            other => panic!("expected an error, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_solution_events_and_counts() {
        // Unique 5x5 shape; counts must be non-decreasing and the
        // sequence must end with exactly one solution.
        let events: Vec<SolveEvent> = solve(
            hints(&[&[5], &[1, 1], &[5], &[1], &[1]]),
            hints(&[&[5], &[1, 1], &[1, 1], &[1, 1], &[3]]),
        )
        .collect();

        let mut last_count = 0;
        for event in &events {
            assert!(event.count() >= last_count);
            last_count = event.count();
        }
        let solutions = events
            .iter()
            .filter(|e| matches!(e, SolveEvent::Solution { .. }))
            .count();
        assert_eq!(solutions, 1);
        assert!(events.last().unwrap().is_terminal());
    }

    #[test]
    fn test_propagation_only_solve_counts_no_nodes() {
        // Fully deduced: the count at the solution is exactly the
        // propagation pass count, with zero search nodes.
        let mut solve = Solver::new(Puzzle::new(
            hints(&[&[5], &[1, 1], &[5], &[1], &[1]]),
            hints(&[&[5], &[1, 1], &[1, 1], &[1, 1], &[3]]),
        ))
        .solve();

        match solve.next() {
            Some(SolveEvent::Solution { grid, count }) => {
                assert!(grid.is_complete());
                assert_eq!(count, 2);
            }
            other => panic!("expected an immediate solution, got {other:?}"),
        }
        assert_eq!(solve.next(), None);
    }

    #[test]
    fn test_first_solution_is_deterministic() {
        // Two valid fills; the engine must return the identity diagonal.
        let events: Vec<SolveEvent> =
            solve(hints(&[&[1], &[1]]), hints(&[&[1], &[1]])).collect();
        match events.last() {
            Some(SolveEvent::Solution { grid, .. }) => {
                assert_eq!(grid.get(0, 0), Cell::Filled);
                assert_eq!(grid.get(1, 1), Cell::Filled);
                assert_eq!(grid.get(0, 1), Cell::Empty);
                assert_eq!(grid.get(1, 0), Cell::Empty);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_cadence_through_engine() {
        // 12x12 permutation: one partial at the 10th accepted expansion,
        // then the solution at the 12th.
        let hint_row: Vec<Hint> = vec![smallvec![1]; 12];
        let events: Vec<SolveEvent> = solve(hint_row.clone(), hint_row).collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].count(), 11); // 1 pass + 10 nodes
        assert!(!events[0].is_terminal());
        assert_eq!(events[1].count(), 13); // 1 pass + 12 nodes
        assert!(matches!(events[1], SolveEvent::Solution { .. }));
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut solve = solve(hints(&[&[1]]), hints(&[&[1]]));
        assert!(solve.next().is_some());
        assert_eq!(solve.next(), None);
        assert_eq!(solve.next(), None);
    }

    #[test]
    fn test_solved_grids_reproduce_hints() {
        // The defining correctness property, checked on a couple of
        // solved grids.
        let row_hints = hints(&[&[2], &[1], &[1, 1]]);
        let col_hints = hints(&[&[1, 1], &[1], &[2]]);
        let events: Vec<SolveEvent> = solve(row_hints.clone(), col_hints.clone()).collect();
        match events.last() {
            Some(SolveEvent::Solution { grid, .. }) => {
                for (row, hint) in row_hints.iter().enumerate() {
                    assert!(matches_hint(grid.row(row).iter().copied(), hint));
                }
                for (col, hint) in col_hints.iter().enumerate() {
                    assert!(matches_hint(grid.column(col), hint));
                }
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }
}
