#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::possible::{GRID_SIZE, all_cells, index_of};

/// Grid-wide anti-king rule: diagonally adjacent cells never share a digit.
/// Orthogonal neighbours are already covered by row and column uniqueness.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntiKing;

impl AntiKing {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Constraint for AntiKing {
    fn name(&self) -> &'static str {
        "anti-king"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        for (row, col) in all_cells() {
            if row == GRID_SIZE {
                continue;
            }
            let mut diagonals = Vec::new();
            if col > 1 {
                diagonals.push((row + 1, col - 1));
            }
            if col < GRID_SIZE {
                diagonals.push((row + 1, col + 1));
            }
            for (nrow, ncol) in diagonals {
                for digit in 1..=9 {
                    graph.add(index_of(row, col, digit), index_of(nrow, ncol, digit));
                }
            }
        }
    }
}
