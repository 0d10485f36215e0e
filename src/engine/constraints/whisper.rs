#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::check_cells;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::error::Contradiction;
use crate::engine::possible::{Cell, index_of};
use crate::engine::store::CandidateStore;
use itertools::Itertools;

/// A german whisper line: every two consecutive cells on the chain differ by
/// at least 5. No cell on the line can hold 5, since nothing differs from 5
/// by 5 or more inside 1..=9.
#[derive(Debug, Clone)]
pub struct GermanWhisper {
    cells: Vec<Cell>,
}

impl GermanWhisper {
    /// # Panics
    ///
    /// Panics on a chain of fewer than two cells or an off-grid cell.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        assert!(cells.len() >= 2, "whisper line needs at least two cells");
        check_cells(&cells);
        Self { cells }
    }
}

impl Constraint for GermanWhisper {
    fn name(&self) -> &'static str {
        "german whisper"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        for (&(r1, c1), &(r2, c2)) in self.cells.iter().tuple_windows() {
            for d1 in 1..=9u8 {
                for d2 in 1..=9u8 {
                    if d1.abs_diff(d2) < 5 {
                        graph.add(index_of(r1, c1, d1), index_of(r2, c2, d2));
                    }
                }
            }
        }
    }

    fn initialise_on_grid(&self, store: &mut CandidateStore) -> Result<(), Contradiction> {
        for &(row, col) in &self.cells {
            store.clear_possible(index_of(row, col, 5))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_digits_on_adjacent_cells_contradict() {
        let mut graph = ContradictionGraph::new();
        let mut coverees = CovereeSet::new();
        let whisper = GermanWhisper::new(vec![(1, 1), (1, 2), (1, 3)]);
        whisper.add_contradictions(&mut graph, &mut coverees);

        assert!(graph.contradicts(index_of(1, 1, 4), index_of(1, 2, 5)));
        assert!(graph.contradicts(index_of(1, 1, 6), index_of(1, 2, 6)));
        assert!(!graph.contradicts(index_of(1, 1, 1), index_of(1, 2, 6)));
        assert!(!graph.contradicts(index_of(1, 1, 9), index_of(1, 2, 4)));
        // Only consecutive chain cells are linked.
        assert!(!graph.contradicts(index_of(1, 1, 4), index_of(1, 3, 4)));
    }

    #[test]
    fn test_fives_are_cleared() {
        let mut store = CandidateStore::new();
        let whisper = GermanWhisper::new(vec![(2, 2), (3, 3)]);
        whisper.initialise_on_grid(&mut store).unwrap();
        assert!(!store.is_possible(index_of(2, 2, 5)));
        assert!(!store.is_possible(index_of(3, 3, 5)));
        assert!(store.is_possible(index_of(2, 2, 4)));
    }

    #[test]
    #[should_panic(expected = "at least two cells")]
    fn test_short_chain_panics() {
        let _ = GermanWhisper::new(vec![(1, 1)]);
    }
}
