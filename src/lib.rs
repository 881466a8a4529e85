#![deny(missing_docs)]
//! This crate solves nonogram (picross) puzzles: given block-length hints
//! for every row and column, it deduces what it can by constraint
//! propagation and resolves the rest by backtracking search, reporting
//! progress through a cooperative, pull-based event sequence.

/// The `picross` module holds the data model: cells, grids, hints, line
/// predicates and the plain-text puzzle file format.
pub mod picross;

/// The `solver` module holds the engine: validation, possibility
/// enumeration, constraint propagation, backtracking search and the
/// event protocol.
pub mod solver;
