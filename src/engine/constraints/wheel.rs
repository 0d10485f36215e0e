#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::error::Contradiction;
use crate::engine::possible::{Cell, GRID_SIZE, index_of};
use crate::engine::store::CandidateStore;
use itertools::Itertools;

/// A wheel: the four declared values sit on the cells directly above, right
/// of, below and left of the centre, in that cyclic order up to rotation.
///
/// Registration restricts the four cells to the declared values and adds an
/// edge between every pair of placements no single rotation can produce.
#[derive(Debug, Clone)]
pub struct Wheel {
    centre: Cell,
    values: [u8; 4],
}

impl Wheel {
    /// # Panics
    ///
    /// Panics when the centre lies on the grid border, where the wheel would
    /// fall off the edge, or when a value is out of range.
    #[must_use]
    pub fn new(centre: Cell, values: [u8; 4]) -> Self {
        let (row, col) = centre;
        assert!(
            (2..GRID_SIZE).contains(&row) && (2..GRID_SIZE).contains(&col),
            "wheel centred at R{row}C{col} falls off the grid"
        );
        assert!(
            values.iter().all(|d| (1..=9).contains(d)),
            "wheel value out of range"
        );
        Self { centre, values }
    }

    /// North, east, south, west of the centre.
    fn cells(&self) -> [Cell; 4] {
        let (row, col) = self.centre;
        [
            (row - 1, col),
            (row, col + 1),
            (row + 1, col),
            (row, col - 1),
        ]
    }

    /// Whether one rotation puts `u` on spoke `i` and `v` on spoke `j`.
    fn rotation_compatible(&self, u: u8, i: usize, v: u8, j: usize) -> bool {
        (0..4).any(|a| {
            (0..4).any(|b| {
                self.values[a] == u && self.values[b] == v && (4 + b - a) % 4 == (4 + j - i) % 4
            })
        })
    }
}

impl Constraint for Wheel {
    fn name(&self) -> &'static str {
        "wheel"
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn add_contradictions(&self, graph: &mut ContradictionGraph, _coverees: &mut CovereeSet) {
        let cells = self.cells();
        for (i, j) in (0..4).tuple_combinations() {
            let (r1, c1) = cells[i];
            let (r2, c2) = cells[j];
            for &u in self.values.iter().unique() {
                for &v in self.values.iter().unique() {
                    if !self.rotation_compatible(u, i, v, j) {
                        graph.add(index_of(r1, c1, u), index_of(r2, c2, v));
                    }
                }
            }
        }
    }

    fn initialise_on_grid(&self, store: &mut CandidateStore) -> Result<(), Contradiction> {
        for (row, col) in self.cells() {
            for digit in 1..=9 {
                if !self.values.contains(&digit) {
                    store.clear_possible(index_of(row, col, digit))?;
                }
            }
        }
        Ok(())
    }
}
