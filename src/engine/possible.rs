#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use std::fmt;

/// Rows, columns and digits all range over `1..=9`.
pub const GRID_SIZE: u8 = 9;

/// Number of cells in the grid.
pub const NUM_CELLS: usize = 81;

/// Number of genuine candidate assignments: 81 cells x 9 digits.
pub const NUM_POSSIBLES: usize = 729;

/// Index of the sentinel slot used to pad coveree groups. It is never a
/// candidate: its possible bit is permanently false and it participates in
/// no contradiction.
pub const SENTINEL: usize = NUM_POSSIBLES;

/// Width of the candidate vectors: every true possible plus the sentinel.
pub const STORE_WIDTH: usize = NUM_POSSIBLES + 1;

/// A cell position as `(row, column)`, both `1..=9`.
pub type Cell = (u8, u8);

/// A candidate assignment of one digit to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possible {
    pub row: u8,
    pub col: u8,
    pub digit: u8,
}

impl Possible {
    /// Creates a candidate assignment.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside `1..=9`.
    #[must_use]
    pub const fn new(row: u8, col: u8, digit: u8) -> Self {
        assert!(1 <= row && row <= GRID_SIZE, "row out of range");
        assert!(1 <= col && col <= GRID_SIZE, "column out of range");
        assert!(1 <= digit && digit <= GRID_SIZE, "digit out of range");
        Self { row, col, digit }
    }

    /// Linear index of this candidate in `[0, 729)`.
    #[must_use]
    pub const fn index(self) -> usize {
        index_of(self.row, self.col, self.digit)
    }

    /// Recovers the candidate behind a linear index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the sentinel or out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_POSSIBLES, "not a candidate index: {index}");
        Self {
            row: u8::try_from(index / 81).expect("row fits in u8") + 1,
            col: u8::try_from((index / 9) % 9).expect("column fits in u8") + 1,
            digit: u8::try_from(index % 9).expect("digit fits in u8") + 1,
        }
    }
}

impl fmt::Display for Possible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{} = {}", self.row, self.col, self.digit)
    }
}

/// Linear index of the candidate `(row, col, digit)`.
#[must_use]
pub const fn index_of(row: u8, col: u8, digit: u8) -> usize {
    (row as usize - 1) * 81 + (col as usize - 1) * 9 + (digit as usize - 1)
}

/// The nine candidate indices of one cell, in digit order.
#[must_use]
pub fn cell_indices(row: u8, col: u8) -> [usize; 9] {
    let start = index_of(row, col, 1);
    std::array::from_fn(|d| start + d)
}

/// Iterates over all 81 cell positions in row-major order.
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (1..=GRID_SIZE).flat_map(|row| (1..=GRID_SIZE).map(move |col| (row, col)))
}
