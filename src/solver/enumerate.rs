//! Per-line possibility enumeration.
//!
//! For a line of a given length and a hint sequence, this produces every
//! fully determined line whose run decomposition equals the hint, in
//! leftmost block-placement order. No pruning against fixed cells happens
//! here; that is the propagator's job. The number of possibilities is
//! combinatorial in the slack `length - sum(hint) - (len(hint) - 1)`.

use crate::picross::line::Pattern;
use bit_vec::BitVec;

/// A source of line possibilities.
///
/// The engine takes its enumeration strategy as an explicit dependency so
/// alternative orderings (or caching layers) can be plugged in without
/// touching the propagator or search.
pub trait PatternSource {
    /// All fully determined lines of `length` cells satisfying `hint`.
    fn patterns(&self, length: usize, hint: &[u32]) -> Vec<Pattern>;
}

/// The default enumeration strategy: leftmost block placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeftmostPatterns;

impl PatternSource for LeftmostPatterns {
    fn patterns(&self, length: usize, hint: &[u32]) -> Vec<Pattern> {
        line_patterns(length, hint)
    }
}

/// Enumerates every placement of `hint` into a line of `length` cells.
///
/// Entries must be positive; the validator rejects zeroes before the
/// engine gets here. An empty hint yields exactly the all-empty line; a
/// hint whose minimum span exceeds `length` yields no possibilities at
/// all.
#[must_use]
pub fn line_patterns(length: usize, hint: &[u32]) -> Vec<Pattern> {
    if hint.is_empty() {
        return vec![BitVec::from_elem(length, false)];
    }

    let filled: usize = hint.iter().map(|&block| block as usize).sum();
    let min_span = filled + hint.len() - 1;
    if min_span > length {
        return Vec::new();
    }

    let mut patterns = Vec::new();
    let mut scratch = BitVec::from_elem(length, false);
    place(hint, 0, length, &mut scratch, &mut patterns);
    patterns
}

/// Places the first block of `hint` at every feasible offset at or after
/// `start`, recursing for the rest; the fully placed scratch line is
/// cloned into `out` at each leaf.
fn place(hint: &[u32], start: usize, length: usize, scratch: &mut BitVec, out: &mut Vec<Pattern>) {
    let Some((&block, rest)) = hint.split_first() else {
        out.push(scratch.clone());
        return;
    };

    let block = block as usize;
    // Space the remaining blocks need: one separating gap plus their size.
    let tail: usize = rest.iter().map(|&b| b as usize).sum::<usize>() + rest.len();
    let last_start = length - tail - block;

    for offset in start..=last_start {
        for i in offset..offset + block {
            scratch.set(i, true);
        }
        place(rest, offset + block + 1, length, scratch, out);
        for i in offset..offset + block {
            scratch.set(i, false);
        }
    }
}
