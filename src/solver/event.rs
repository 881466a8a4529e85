use crate::picross::grid::Grid;
use crate::solver::error::SolveError;

/// One step of a solve's observable progress.
///
/// A solve produces a finite sequence of these: zero or more `Partial`
/// events followed by exactly one terminal `Solution` or `Error`. Every
/// event carries the cumulative work count (propagation passes plus
/// accepted search expansions), which is non-decreasing across the
/// sequence — hosts enforce trial ceilings by watching it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveEvent {
    /// The solve failed; terminal.
    Error {
        /// Everything that went wrong, in detection order. Never empty.
        errors: Vec<SolveError>,
        /// Cumulative work count at failure.
        count: u64,
    },
    /// A snapshot of the search in flight.
    Partial {
        /// The current branch's grid; may contain `Unknown` cells.
        grid: Grid,
        /// Cumulative work count so far.
        count: u64,
    },
    /// The first fully consistent grid; terminal.
    Solution {
        /// The solved grid, every cell determined.
        grid: Grid,
        /// Cumulative work count at the solution.
        count: u64,
    },
}

impl SolveEvent {
    /// The cumulative work count this event carries.
    #[must_use]
    pub const fn count(&self) -> u64 {
        match self {
            Self::Error { count, .. }
            | Self::Partial { count, .. }
            | Self::Solution { count, .. } => *count,
        }
    }

    /// Whether this event ends the sequence.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Partial { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kinds() {
        let partial = SolveEvent::Partial {
            grid: Grid::unknown(1, 1),
            count: 3,
        };
        assert!(!partial.is_terminal());
        assert_eq!(partial.count(), 3);

        let error = SolveEvent::Error {
            errors: vec![SolveError::NoSolution],
            count: 7,
        };
        assert!(error.is_terminal());
        assert_eq!(error.count(), 7);
    }
}
