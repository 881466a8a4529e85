use crate::picross::puzzle::Axis;
use std::fmt::Display;

/// Every way a solve can fail.
///
/// The first five variants are structural and detected by the validator
/// before any enumeration; `Contradiction` and `NoSolution` surface
/// mid-computation as the terminal event of a solve; `TrialLimit` is never
/// raised by the engine itself — hosts synthesize it when the node count
/// carried on progress events crosses their own ceiling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The number of hint lines disagrees with the declared grid size.
    HintShape {
        /// The axis whose hint count is wrong.
        axis: Axis,
        /// The declared number of lines.
        expected: usize,
        /// The number of hint lines actually supplied.
        found: usize,
    },
    /// A hint sequence is empty.
    HintEmpty {
        /// The axis of the offending line.
        axis: Axis,
        /// The zero-based line index.
        index: usize,
    },
    /// A hint entry is zero; block lengths must be positive.
    HintValue {
        /// The axis of the offending line.
        axis: Axis,
        /// The zero-based line index.
        index: usize,
    },
    /// A line's blocks plus mandatory gaps cannot fit.
    HintOverflow {
        /// The axis of the offending line.
        axis: Axis,
        /// The zero-based line index.
        index: usize,
        /// Minimum span the hint needs.
        required: usize,
        /// The actual line length.
        length: usize,
    },
    /// Row hints and column hints imply different filled-cell totals.
    HintSumMismatch {
        /// Total filled cells implied by the row hints.
        rows: u64,
        /// Total filled cells implied by the column hints.
        cols: u64,
    },
    /// A line's possibility set emptied during propagation.
    Contradiction {
        /// The axis of the line whose possibilities ran out.
        axis: Axis,
        /// The zero-based line index.
        index: usize,
    },
    /// The search exhausted every candidate without finding a solution.
    NoSolution,
    /// A host-imposed ceiling on the trial count was reached.
    TrialLimit {
        /// The ceiling the host enforced.
        limit: u64,
    },
}

impl SolveError {
    /// The line this error is tagged to, if it targets one.
    ///
    /// `HintSumMismatch`, `NoSolution` and `TrialLimit` describe the
    /// puzzle as a whole and have no target.
    #[must_use]
    pub const fn target(&self) -> Option<(Axis, usize)> {
        match *self {
            Self::HintEmpty { axis, index }
            | Self::HintValue { axis, index }
            | Self::HintOverflow { axis, index, .. }
            | Self::Contradiction { axis, index } => Some((axis, index)),
            _ => None,
        }
    }
}

impl Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HintShape {
                axis,
                expected,
                found,
            } => write!(
                f,
                "expected {expected} {axis} hint lines, found {found}"
            ),
            Self::HintEmpty { axis, index } => {
                write!(f, "{axis} {} has no hint", index + 1)
            }
            Self::HintValue { axis, index } => {
                write!(f, "{axis} {} has an invalid hint entry", index + 1)
            }
            Self::HintOverflow {
                axis,
                index,
                required,
                length,
            } => write!(
                f,
                "{axis} {} needs {required} cells but only has {length}",
                index + 1
            ),
            Self::HintSumMismatch { rows, cols } => write!(
                f,
                "row hints fill {rows} cells but column hints fill {cols}"
            ),
            Self::Contradiction { axis, index } => {
                write!(f, "{axis} {} has no remaining possibilities", index + 1)
            }
            Self::NoSolution => write!(f, "no solution found"),
            Self::TrialLimit { limit } => {
                write!(f, "trial limit of {limit} exceeded")
            }
        }
    }
}

impl std::error::Error for SolveError {}
