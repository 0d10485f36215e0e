#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::check_cells;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::possible::{Cell, index_of};
use itertools::Itertools;
use smallvec::SmallVec;

/// No digit appears twice among the listed cells.
///
/// The `row`, `column` and `block` constructors additionally register one
/// coveree per digit over their nine cells, since a full house must contain
/// every digit. The generic [`NoRepeats::new`] form (used by cages) imposes
/// distinctness only.
#[derive(Debug, Clone)]
pub struct NoRepeats {
    label: &'static str,
    cells: Vec<Cell>,
    covering: bool,
}

impl NoRepeats {
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        check_cells(&cells);
        Self {
            label: "no repeats",
            cells,
            covering: false,
        }
    }

    /// The nine cells of row `row`.
    #[must_use]
    pub fn row(row: u8) -> Self {
        let cells: Vec<Cell> = (1..=9).map(|col| (row, col)).collect();
        check_cells(&cells);
        Self {
            label: "row uniqueness",
            cells,
            covering: true,
        }
    }

    /// The nine cells of column `col`.
    #[must_use]
    pub fn column(col: u8) -> Self {
        let cells: Vec<Cell> = (1..=9).map(|row| (row, col)).collect();
        check_cells(&cells);
        Self {
            label: "column uniqueness",
            cells,
            covering: true,
        }
    }

    /// The nine cells of 3x3 block `block`, numbered 1..=9 in reading order.
    ///
    /// # Panics
    ///
    /// Panics when `block` is out of range.
    #[must_use]
    pub fn block(block: u8) -> Self {
        assert!((1..=9).contains(&block), "block {block} is off the grid");
        let base_row = (block - 1) / 3 * 3;
        let base_col = (block - 1) % 3 * 3;
        let cells = (1..=3)
            .flat_map(|dr| (1..=3).map(move |dc| (base_row + dr, base_col + dc)))
            .collect();
        Self {
            label: "block uniqueness",
            cells,
            covering: true,
        }
    }
}

impl Constraint for NoRepeats {
    fn name(&self) -> &'static str {
        self.label
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, coverees: &mut CovereeSet) {
        for (&(r1, c1), &(r2, c2)) in self.cells.iter().tuple_combinations() {
            for digit in 1..=9 {
                graph.add(index_of(r1, c1, digit), index_of(r2, c2, digit));
            }
        }
        if self.covering {
            for digit in 1..=9 {
                let slot: SmallVec<[usize; 9]> = self
                    .cells
                    .iter()
                    .map(|&(row, col)| index_of(row, col, digit))
                    .collect();
                coverees.add(&slot);
            }
        }
    }
}
