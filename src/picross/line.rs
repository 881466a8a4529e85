//! Line-level predicates shared by the validator, propagator and search.
//!
//! A line is one row or column viewed as a 1-D sequence of cells. A fully
//! determined line is stored as a [`Pattern`] (one bit per cell, set =
//! filled); partially determined lines are slices or iterators of
//! [`Cell`]. The predicates here all stream over the cells once, so
//! column views never need to be materialised.

use crate::picross::cell::Cell;
use bit_vec::BitVec;
use smallvec::SmallVec;

/// A fully determined line: bit set = filled.
///
/// Possibility sets are `Vec<Pattern>`; they are created once per line and
/// only ever filtered afterwards.
pub type Pattern = BitVec;

/// Extracts the maximal runs of filled cells, in order.
///
/// Any non-`Filled` cell (including `Unknown`) terminates a run; callers
/// comparing against hints should only pass fully determined lines.
#[must_use]
pub fn runs<I>(cells: I) -> SmallVec<[u32; 8]>
where
    I: IntoIterator<Item = Cell>,
{
    let mut segments = SmallVec::new();
    let mut run = 0u32;
    for cell in cells {
        if cell == Cell::Filled {
            run += 1;
        } else if run > 0 {
            segments.push(run);
            run = 0;
        }
    }
    if run > 0 {
        segments.push(run);
    }
    segments
}

/// Whether a fully determined line satisfies its hint exactly.
///
/// The run decomposition of the line must equal the hint sequence — this is
/// the defining correctness property of a solved grid.
#[must_use]
pub fn matches_hint<I>(cells: I, hint: &[u32]) -> bool
where
    I: IntoIterator<Item = Cell>,
{
    runs(cells).as_slice() == hint
}

/// Prefix validity: a sound pruning test for partially assigned columns.
///
/// Scanning left to right, every run of filled cells (closed or still
/// growing) must fit under the hint entry at its position, and the number
/// of runs must not exceed the hint count. A closed run shorter than its
/// hint entry is still accepted — this test is deliberately weaker than
/// full-line validity and is never used for final acceptance.
#[must_use]
pub fn is_valid_prefix<I>(cells: I, hint: &[u32]) -> bool
where
    I: IntoIterator<Item = Cell>,
{
    let mut idx = 0;
    let mut run = 0u32;
    for cell in cells {
        if cell == Cell::Filled {
            run += 1;
            if idx >= hint.len() || run > hint[idx] {
                return false;
            }
        } else if run > 0 {
            idx += 1;
            run = 0;
        }
    }
    true
}
