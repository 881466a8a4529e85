//! Command-line plumbing for the picross solver binary.

pub(crate) mod cli;
