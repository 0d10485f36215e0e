#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::possible::{GRID_SIZE, all_cells, index_of};

/// Grid-wide negative X-sum rule: no two orthogonally adjacent cells hold
/// distinct digits summing to 10. Two adjacent 5s are already impossible in
/// any row or column, so the pair (5, 5) needs no edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoX;

impl NoX {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Constraint for NoX {
    fn name(&self) -> &'static str {
        "no x"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        for (row, col) in all_cells() {
            let mut neighbours = Vec::new();
            if col < GRID_SIZE {
                neighbours.push((row, col + 1));
            }
            if row < GRID_SIZE {
                neighbours.push((row + 1, col));
            }
            for (nrow, ncol) in neighbours {
                for low in 1..=4u8 {
                    let high = 10 - low;
                    graph.add(index_of(row, col, low), index_of(nrow, ncol, high));
                    graph.add(index_of(row, col, high), index_of(nrow, ncol, low));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complementary_neighbours_contradict() {
        let mut graph = ContradictionGraph::new();
        let mut coverees = CovereeSet::new();
        NoX.add_contradictions(&mut graph, &mut coverees);

        assert!(graph.contradicts(index_of(3, 3, 4), index_of(3, 4, 6)));
        assert!(graph.contradicts(index_of(3, 3, 6), index_of(3, 4, 4)));
        assert!(graph.contradicts(index_of(3, 3, 1), index_of(4, 3, 9)));
        // Fives, non-complements and diagonals stay untouched.
        assert!(!graph.contradicts(index_of(3, 3, 5), index_of(3, 4, 5)));
        assert!(!graph.contradicts(index_of(3, 3, 4), index_of(3, 4, 5)));
        assert!(!graph.contradicts(index_of(3, 3, 4), index_of(4, 4, 6)));
    }
}
