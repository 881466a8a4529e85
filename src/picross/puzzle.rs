use crate::solver::error::SolveError;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::Display;

/// Block-length clues for one row or column, in placement order.
pub type Hint = SmallVec<[u32; 8]>;

/// Which dimension a line or error target belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A row, read left to right.
    Row,
    /// A column, read top to bottom.
    Col,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Col => write!(f, "column"),
        }
    }
}

/// A puzzle instance: one hint sequence per row and per column.
///
/// The grid dimensions are implied by the hint counts; use
/// [`Puzzle::with_size`] when the caller declares dimensions separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    row_hints: Vec<Hint>,
    col_hints: Vec<Hint>,
}

impl Puzzle {
    /// Creates a puzzle from per-row and per-column hints.
    #[must_use]
    pub const fn new(row_hints: Vec<Hint>, col_hints: Vec<Hint>) -> Self {
        Self {
            row_hints,
            col_hints,
        }
    }

    /// Creates a puzzle, checking the hint counts against declared
    /// dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::HintShape`] when the number of hint lines on
    /// either axis disagrees with the declared grid size.
    pub fn with_size(
        row_hints: Vec<Hint>,
        col_hints: Vec<Hint>,
        height: usize,
        width: usize,
    ) -> Result<Self, SolveError> {
        if row_hints.len() != height {
            return Err(SolveError::HintShape {
                axis: Axis::Row,
                expected: height,
                found: row_hints.len(),
            });
        }
        if col_hints.len() != width {
            return Err(SolveError::HintShape {
                axis: Axis::Col,
                expected: width,
                found: col_hints.len(),
            });
        }
        Ok(Self::new(row_hints, col_hints))
    }

    /// Grid height (number of row hints).
    #[must_use]
    pub fn height(&self) -> usize {
        self.row_hints.len()
    }

    /// Grid width (number of column hints).
    #[must_use]
    pub fn width(&self) -> usize {
        self.col_hints.len()
    }

    /// The row hint sequences, top to bottom.
    #[must_use]
    pub fn row_hints(&self) -> &[Hint] {
        &self.row_hints
    }

    /// The column hint sequences, left to right.
    #[must_use]
    pub fn col_hints(&self) -> &[Hint] {
        &self.col_hints
    }

    /// The hints along one axis.
    #[must_use]
    pub fn hints(&self, axis: Axis) -> &[Hint] {
        match axis {
            Axis::Row => &self.row_hints,
            Axis::Col => &self.col_hints,
        }
    }

    /// The length of a line along one axis (the opposite dimension).
    #[must_use]
    pub fn line_length(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.width(),
            Axis::Col => self.height(),
        }
    }

    /// Consumes the puzzle, returning both hint vectors.
    #[must_use]
    pub fn into_hints(self) -> (Vec<Hint>, Vec<Hint>) {
        (self.row_hints, self.col_hints)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}x{}", self.height(), self.width())?;
        let fmt_axis = |hints: &[Hint]| {
            hints
                .iter()
                .map(|hint| hint.iter().join(","))
                .join(" | ")
        };
        writeln!(f, "rows: {}", fmt_axis(&self.row_hints))?;
        write!(f, "cols: {}", fmt_axis(&self.col_hints))
    }
}
