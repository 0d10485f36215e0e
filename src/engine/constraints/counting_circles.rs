#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::check_cells;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::error::Contradiction;
use crate::engine::possible::{Cell, all_cells, index_of};
use crate::engine::store::CandidateStore;
use itertools::Itertools;

/// Counting circles: a digit appearing in any circled cell must appear in
/// exactly that many circles.
///
/// Two consequences are static and become graph edges: two circles can never
/// both hold 1, and a circled 9 forces all nine 9s into circles, so a
/// circled 9 contradicts a 9 in every uncircled cell. The per-digit counting
/// itself is checked dynamically.
#[derive(Debug, Clone)]
pub struct CountingCircles {
    circles: Vec<Cell>,
}

impl CountingCircles {
    #[must_use]
    pub fn new(circles: Vec<Cell>) -> Self {
        check_cells(&circles);
        Self { circles }
    }
}

impl Constraint for CountingCircles {
    fn name(&self) -> &'static str {
        "counting circles"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        for (&(r1, c1), &(r2, c2)) in self.circles.iter().tuple_combinations() {
            graph.add(index_of(r1, c1, 1), index_of(r2, c2, 1));
        }
        for cell in all_cells() {
            if self.circles.contains(&cell) {
                continue;
            }
            let (urow, ucol) = cell;
            for &(crow, ccol) in &self.circles {
                graph.add(index_of(crow, ccol, 9), index_of(urow, ucol, 9));
            }
        }
    }

    fn act_on_grid(&self, store: &CandidateStore) -> Result<(), Contradiction> {
        for digit in 1..=9u8 {
            let mut finalised = 0usize;
            let mut possible = 0usize;
            for &(row, col) in &self.circles {
                let i = index_of(row, col, digit);
                if store.is_finalised(i) {
                    finalised += 1;
                }
                if store.is_possible(i) {
                    possible += 1;
                }
            }
            if finalised > usize::from(digit) {
                return Err(Contradiction("too many circles hold the same digit"));
            }
            if finalised > 0 && possible < usize::from(digit) {
                return Err(Contradiction(
                    "not enough circles left for a circled digit",
                ));
            }
        }
        Ok(())
    }
}
