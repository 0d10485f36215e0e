#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::check_cells;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::possible::{Cell, index_of};
use smallvec::SmallVec;

/// A pencil-mark hint: `digit` sits in one of the listed cells. Registers a
/// single coveree and nothing else.
#[derive(Debug, Clone)]
pub struct CornerMark {
    cells: Vec<Cell>,
    digit: u8,
}

impl CornerMark {
    /// # Panics
    ///
    /// Panics on an off-grid cell or digit.
    #[must_use]
    pub fn new(cells: Vec<Cell>, digit: u8) -> Self {
        check_cells(&cells);
        assert!((1..=9).contains(&digit), "digit {digit} is out of range");
        Self { cells, digit }
    }
}

impl Constraint for CornerMark {
    fn name(&self) -> &'static str {
        "corner mark"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn add_contradictions(&self, _graph: &mut ContradictionGraph, coverees: &mut CovereeSet) {
        let group: SmallVec<[usize; 9]> = self
            .cells
            .iter()
            .map(|&(row, col)| index_of(row, col, self.digit))
            .collect();
        coverees.add(&group);
    }
}
