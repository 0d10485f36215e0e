#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::constraints::NoRepeats;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::error::Contradiction;
use crate::engine::possible::{NUM_POSSIBLES, all_cells, cell_indices, index_of};
use crate::engine::propagation::{Fixpoint, Propagator};
use crate::engine::render;
use crate::engine::search::{ProgressSink, SearchStats, Searcher, select_branch};
use crate::engine::solution::SolutionSet;
use crate::engine::store::CandidateStore;
use itertools::Itertools;
use smallvec::SmallVec;

/// One puzzle: the candidate state plus everything derived from its rules.
///
/// A fresh puzzle already knows classic sudoku. Each cell holds exactly one
/// digit (a coveree over the cell's nine candidates, pairwise exclusions
/// between them) and each row, column and 3x3 block holds every digit (27
/// uniqueness constraints, each bringing nine coverees of its own). Variant
/// rules are layered on with [`Self::add_constraint`].
///
/// The puzzle is a deep value: cloning it gives an independent grid, which
/// is how worker threads get their own copy.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub(crate) store: CandidateStore,
    pub(crate) graph: ContradictionGraph,
    pub(crate) coverees: CovereeSet,
    pub(crate) constraints: Vec<Box<dyn Constraint>>,
    pub(crate) solutions: SolutionSet,
    pub(crate) stats: SearchStats,
}

impl Puzzle {
    #[must_use]
    pub fn new() -> Self {
        let mut puzzle = Self {
            store: CandidateStore::new(),
            graph: ContradictionGraph::new(),
            coverees: CovereeSet::new(),
            constraints: Vec::new(),
            solutions: SolutionSet::new(),
            stats: SearchStats::default(),
        };
        for (row, col) in all_cells() {
            let indices = cell_indices(row, col);
            puzzle.coverees.add(&indices);
            for (&a, &b) in indices.iter().tuple_combinations() {
                puzzle.graph.add(a, b);
            }
        }
        for house in 1..=9 {
            puzzle.register(Box::new(NoRepeats::row(house)));
            puzzle.register(Box::new(NoRepeats::column(house)));
            puzzle.register(Box::new(NoRepeats::block(house)));
        }
        puzzle
    }

    /// Registration without grid interaction, for rules that exist before
    /// any digit is placed.
    fn register(&mut self, constraint: Box<dyn Constraint>) {
        constraint.add_contradictions(&mut self.graph, &mut self.coverees);
        self.constraints.push(constraint);
    }

    /// Places a given digit. Fails when the placement contradicts the state
    /// built up so far.
    pub fn set_digit(&mut self, row: u8, col: u8, digit: u8) -> Result<(), Contradiction> {
        self.restrict(row, col, &[digit])
    }

    /// Narrows a cell down to the listed digits.
    ///
    /// # Panics
    ///
    /// Panics on an off-grid cell, an out-of-range digit, or an empty list,
    /// all of which are configuration errors.
    pub fn restrict(&mut self, row: u8, col: u8, digits: &[u8]) -> Result<(), Contradiction> {
        assert!(
            (1..=9).contains(&row) && (1..=9).contains(&col),
            "cell R{row}C{col} is off the grid"
        );
        assert!(!digits.is_empty(), "a cell cannot be narrowed to nothing");
        assert!(
            digits.iter().all(|d| (1..=9).contains(d)),
            "digit out of range"
        );
        for digit in 1..=9 {
            if !digits.contains(&digit) {
                self.store.clear_possible(index_of(row, col, digit))?;
            }
        }
        self.propagator().resolve_singletons()
    }

    /// Layers a variant rule onto the puzzle. Fails when its static pruning
    /// clashes with digits already placed.
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) -> Result<(), Contradiction> {
        log::debug!("adding {} constraint", constraint.name());
        constraint.add_contradictions(&mut self.graph, &mut self.coverees);
        constraint.initialise_on_grid(&mut self.store)?;
        // Fresh edges may touch digits that are already in place; enforce
        // them as if those digits had just been finalised.
        for i in 0..NUM_POSSIBLES {
            if !self.store.is_finalised(i) {
                continue;
            }
            for j in self.graph.contradictors(i) {
                self.store.clear_possible(j)?;
            }
        }
        self.constraints.push(constraint);
        self.propagator().resolve_singletons()
    }

    /// Runs propagation alone to its fixed point.
    pub fn propagate(&mut self) -> Result<Fixpoint, Contradiction> {
        self.propagator().run()
    }

    /// Finds every solution. A contradiction at the root means the puzzle
    /// has none; it is logged rather than returned, and the set says the
    /// rest.
    pub fn solve(&mut self) -> &SolutionSet {
        let mut searcher = Searcher::new(
            &mut self.store,
            &self.graph,
            &self.coverees,
            &self.constraints,
            &mut self.solutions,
        );
        let outcome = searcher.search();
        self.stats = searcher.stats();
        if let Err(contradiction) = outcome {
            log::info!("search ended at the root: {contradiction}");
        }
        log::info!(
            "search finished: {} solutions, {} branch points, {} candidates tried",
            self.solutions.len(),
            self.stats.branch_points,
            self.stats.candidates_tried
        );
        &self.solutions
    }

    pub(crate) fn solve_with_progress(&mut self, sink: &dyn ProgressSink) {
        let mut searcher = Searcher::new(
            &mut self.store,
            &self.graph,
            &self.coverees,
            &self.constraints,
            &mut self.solutions,
        )
        .with_progress(sink);
        if let Err(contradiction) = searcher.search() {
            log::debug!("subtree exhausted: {contradiction}");
        }
        self.stats = searcher.stats();
    }

    /// Finalises a pre-chosen chain of candidates, then propagates. Used to
    /// seed a worker with its branch prefix.
    pub(crate) fn apply_prefix(&mut self, prefix: &[usize]) -> Result<Fixpoint, Contradiction> {
        for &candidate in prefix {
            self.propagator().finalise(&[candidate])?;
        }
        self.propagator().run()
    }

    pub(crate) fn branch_members(&self) -> Option<SmallVec<[usize; 9]>> {
        select_branch(&self.store, &self.graph, &self.coverees)
    }

    /// The digits still open for a cell.
    #[must_use]
    pub fn candidates(&self, row: u8, col: u8) -> SmallVec<[u8; 9]> {
        self.store.possible_digits(row, col)
    }

    /// The placed digit of a cell, if any.
    #[must_use]
    pub fn value(&self, row: u8, col: u8) -> Option<u8> {
        self.store.finalised_digit(row, col)
    }

    #[must_use]
    pub const fn solutions(&self) -> &SolutionSet {
        &self.solutions
    }

    #[must_use]
    pub const fn search_stats(&self) -> SearchStats {
        self.stats
    }

    /// The current candidate grid as text.
    #[must_use]
    pub fn render(&self) -> String {
        render::grid(|i| self.store.is_possible(i))
    }

    fn propagator(&mut self) -> Propagator<'_> {
        Propagator {
            store: &mut self.store,
            graph: &self.graph,
            coverees: &self.coverees,
            constraints: &self.constraints,
            solutions: &mut self.solutions,
        }
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Puzzle;

    /// The worked example from the project docs; a classic newspaper grid.
    pub(crate) const CLASSIC: [[u8; 9]; 9] = [
        [0, 2, 0, 0, 0, 6, 0, 8, 0],
        [0, 9, 6, 0, 1, 5, 0, 0, 2],
        [5, 0, 7, 0, 3, 0, 4, 0, 0],
        [0, 3, 0, 5, 0, 0, 0, 0, 4],
        [2, 0, 1, 4, 0, 8, 9, 0, 3],
        [8, 0, 0, 0, 0, 9, 0, 1, 0],
        [0, 0, 5, 0, 9, 0, 2, 0, 8],
        [9, 0, 0, 1, 8, 0, 3, 5, 0],
        [0, 6, 0, 2, 0, 0, 0, 9, 0],
    ];

    /// A full valid grid whose four corners at R1/R2 x C1/C4 form a deadly
    /// rectangle on {1, 2}: blanking them leaves exactly two completions.
    pub(crate) const RECTANGLE: [[u8; 9]; 9] = [
        [1, 3, 4, 2, 5, 6, 7, 8, 9],
        [2, 7, 5, 1, 8, 9, 3, 4, 6],
        [6, 8, 9, 3, 4, 7, 1, 2, 5],
        [7, 4, 1, 6, 2, 5, 9, 3, 8],
        [8, 5, 2, 9, 3, 4, 6, 1, 7],
        [9, 6, 3, 7, 1, 8, 2, 5, 4],
        [4, 1, 6, 5, 7, 2, 8, 9, 3],
        [5, 2, 7, 8, 9, 3, 4, 6, 1],
        [3, 9, 8, 4, 6, 1, 5, 7, 2],
    ];

    pub(crate) fn with_givens(givens: &[[u8; 9]; 9]) -> Puzzle {
        let mut puzzle = Puzzle::new();
        for (i, row) in givens.iter().enumerate() {
            for (j, &digit) in row.iter().enumerate() {
                if digit != 0 {
                    puzzle
                        .set_digit(i as u8 + 1, j as u8 + 1, digit)
                        .expect("givens are consistent");
                }
            }
        }
        puzzle
    }
}
