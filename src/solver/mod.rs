#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solving engine: validation, enumeration, propagation, search and
//! the event protocol that ties them together.

/// The solve entry points and the pull-based event iterator.
pub mod engine;
/// Per-line possibility enumeration and the injectable strategy trait.
pub mod enumerate;
/// The error taxonomy for everything a solve can report.
pub mod error;
/// The tagged event union produced by a solve.
pub mod event;
/// Dirty-queue constraint propagation to fixpoint.
pub mod propagation;
/// The explicit-stack backtracking machine.
pub mod search;
/// Structural hint feasibility checks.
pub mod validate;

pub use engine::{Solve, Solver, solve};
pub use error::SolveError;
pub use event::SolveEvent;
