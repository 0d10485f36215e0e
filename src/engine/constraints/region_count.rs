#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::check_cells;
use crate::engine::error::Contradiction;
use crate::engine::possible::{Cell, index_of};
use crate::engine::store::CandidateStore;

/// Caps how often each digit may appear inside a marked region.
///
/// Digits capped at zero are pruned outright at registration; the remaining
/// caps are enforced dynamically against the finalised counts.
#[derive(Debug, Clone)]
pub struct RegionCount {
    cells: Vec<Cell>,
    limits: [u8; 9],
}

impl RegionCount {
    /// `limits[d - 1]` is the maximum number of cells in the region that may
    /// hold digit `d`.
    #[must_use]
    pub fn new(cells: Vec<Cell>, limits: [u8; 9]) -> Self {
        check_cells(&cells);
        Self { cells, limits }
    }
}

impl Constraint for RegionCount {
    fn name(&self) -> &'static str {
        "region count"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn initialise_on_grid(&self, store: &mut CandidateStore) -> Result<(), Contradiction> {
        for digit in 1..=9u8 {
            if self.limits[usize::from(digit) - 1] > 0 {
                continue;
            }
            for &(row, col) in &self.cells {
                store.clear_possible(index_of(row, col, digit))?;
            }
        }
        Ok(())
    }

    fn act_on_grid(&self, store: &CandidateStore) -> Result<(), Contradiction> {
        for digit in 1..=9u8 {
            let finalised = self
                .cells
                .iter()
                .filter(|&&(row, col)| store.is_finalised(index_of(row, col, digit)))
                .count();
            if finalised > usize::from(self.limits[usize::from(digit) - 1]) {
                return Err(Contradiction("too many of one digit in a counted region"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::contradiction::ContradictionGraph;

    const fn limits_all(n: u8) -> [u8; 9] {
        [n; 9]
    }

    #[test]
    fn test_zero_capped_digits_are_pruned() {
        let mut limits = limits_all(1);
        limits[6] = 0; // no 7s
        let region = RegionCount::new(vec![(1, 1), (1, 2)], limits);
        let mut store = CandidateStore::new();
        region.initialise_on_grid(&mut store).unwrap();
        assert!(!store.is_possible(index_of(1, 1, 7)));
        assert!(!store.is_possible(index_of(1, 2, 7)));
        assert!(store.is_possible(index_of(1, 1, 6)));
    }

    #[test]
    fn test_exceeding_a_cap_fails() {
        let region = RegionCount::new(vec![(1, 1), (2, 4)], limits_all(1));
        let graph = ContradictionGraph::new();
        let mut store = CandidateStore::new();
        store.finalise(&graph, &[index_of(1, 1, 3)]).unwrap();
        assert!(region.act_on_grid(&store).is_ok());
        store.finalise(&graph, &[index_of(2, 4, 3)]).unwrap();
        assert_eq!(
            region.act_on_grid(&store),
            Err(Contradiction("too many of one digit in a counted region"))
        );
    }
}
