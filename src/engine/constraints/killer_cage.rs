#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::check_cells;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::error::Contradiction;
use crate::engine::possible::{Cell, index_of};
use crate::engine::store::CandidateStore;
use itertools::Itertools;

/// A killer cage: the cells hold pairwise distinct digits summing to `total`.
///
/// Distinctness becomes pairwise graph edges. At registration every digit
/// that cannot belong to any distinct-digit combination hitting the total is
/// pruned from the whole cage. On every propagation pass the achievable sum
/// range of the surviving candidates is checked against the target.
#[derive(Debug, Clone)]
pub struct KillerCage {
    cells: Vec<Cell>,
    total: u32,
}

impl KillerCage {
    /// # Panics
    ///
    /// Panics on an empty cage or one of more than nine cells, which could
    /// never hold distinct digits.
    #[must_use]
    pub fn new(cells: Vec<Cell>, total: u32) -> Self {
        assert!(
            (1..=9).contains(&cells.len()),
            "cage of {} cells cannot hold distinct digits",
            cells.len()
        );
        check_cells(&cells);
        Self { cells, total }
    }

    /// Whether `digit` can sit in a set of `self.cells.len()` distinct digits
    /// summing to the target. Sums of k distinct digits containing a fixed
    /// one form a contiguous range, so the two extremes suffice.
    fn digit_feasible(&self, digit: u8) -> bool {
        let companions = self.cells.len() - 1;
        let others = || (1..=9u32).filter(|&d| d != u32::from(digit));
        let min: u32 = u32::from(digit) + others().take(companions).sum::<u32>();
        let max: u32 = u32::from(digit) + others().rev().take(companions).sum::<u32>();
        (min..=max).contains(&self.total)
    }
}

impl Constraint for KillerCage {
    fn name(&self) -> &'static str {
        "killer cage"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        for (&(r1, c1), &(r2, c2)) in self.cells.iter().tuple_combinations() {
            for digit in 1..=9 {
                graph.add(index_of(r1, c1, digit), index_of(r2, c2, digit));
            }
        }
    }

    fn initialise_on_grid(&self, store: &mut CandidateStore) -> Result<(), Contradiction> {
        for digit in 1..=9u8 {
            if self.digit_feasible(digit) {
                continue;
            }
            for &(row, col) in &self.cells {
                store.clear_possible(index_of(row, col, digit))?;
            }
        }
        Ok(())
    }

    fn act_on_grid(&self, store: &CandidateStore) -> Result<(), Contradiction> {
        let digits: Vec<u32> = (1..=9u8)
            .filter(|&d| {
                self.cells
                    .iter()
                    .any(|&(row, col)| store.is_possible(index_of(row, col, d)))
            })
            .map(u32::from)
            .collect();
        let k = self.cells.len();
        if digits.len() < k {
            return Err(Contradiction("cage has fewer digits left than cells"));
        }
        let min: u32 = digits.iter().take(k).sum();
        let max: u32 = digits.iter().rev().take(k).sum();
        if !(min..=max).contains(&self.total) {
            return Err(Contradiction("cage total is out of reach"));
        }
        Ok(())
    }
}
