#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::possible::{Cell, GRID_SIZE, all_cells, index_of};

/// Grid-wide touching-sum ban: no two cells within a king's move of each
/// other hold distinct digits summing to `total`.
#[derive(Debug, Clone, Copy)]
pub struct NoTouchingSum {
    total: u8,
}

impl NoTouchingSum {
    #[must_use]
    pub const fn new(total: u8) -> Self {
        Self { total }
    }

    fn neighbours((row, col): Cell) -> impl Iterator<Item = Cell> {
        const STEPS: [(i8, i8); 4] = [(0, 1), (1, -1), (1, 0), (1, 1)];
        STEPS.into_iter().filter_map(move |(dr, dc)| {
            let nrow = i8::try_from(row).ok()? + dr;
            let ncol = i8::try_from(col).ok()? + dc;
            if (1..=GRID_SIZE as i8).contains(&nrow) && (1..=GRID_SIZE as i8).contains(&ncol) {
                Some((nrow as u8, ncol as u8))
            } else {
                None
            }
        })
    }
}

impl Constraint for NoTouchingSum {
    fn name(&self) -> &'static str {
        "no touching sum"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        for cell in all_cells() {
            for (nrow, ncol) in Self::neighbours(cell) {
                let (row, col) = cell;
                for d1 in 1..=9u8 {
                    for d2 in 1..=9u8 {
                        if d1 != d2 && d1 + d2 == self.total {
                            graph.add(index_of(row, col, d1), index_of(nrow, ncol, d2));
                        }
                    }
                }
            }
        }
    }
}
