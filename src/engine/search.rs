#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::{CovereeSet, GroupStatus, MAX_COVEREE_SIZE};
use crate::engine::error::Contradiction;
use crate::engine::propagation::{Fixpoint, Propagator};
use crate::engine::solution::SolutionSet;
use crate::engine::store::CandidateStore;
use smallvec::SmallVec;

/// Counters for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions where propagation got stuck and a group had to be branched.
    pub branch_points: u64,
    /// Candidates speculatively finalised across all branch points.
    pub candidates_tried: u64,
}

/// Receives progress reports while a search runs.
pub trait ProgressSink: Sync {
    /// `fraction` is in `[0, 1]`; `solutions_found` is the running count.
    fn report(&self, fraction: f64, solutions_found: usize);
}

/// Picks the group to branch on, or `None` when no group is open.
///
/// Smallest remaining membership wins; among equals, the group whose members
/// would together wipe out the most live candidates; among those, whichever
/// was registered first. The order of registration is fixed by puzzle
/// construction, so selection is deterministic.
pub(crate) fn select_branch(
    store: &CandidateStore,
    graph: &ContradictionGraph,
    coverees: &CovereeSet,
) -> Option<SmallVec<[usize; MAX_COVEREE_SIZE]>> {
    let mut best: Option<(usize, usize, SmallVec<[usize; MAX_COVEREE_SIZE]>)> = None;
    for group in coverees.groups() {
        let GroupStatus::Open(members) = CovereeSet::status(group, store) else {
            continue;
        };
        if members.len() < 2 {
            continue;
        }
        let score: usize = members
            .iter()
            .map(|&i| graph.live_exclusions(i, store))
            .sum();
        let better = match &best {
            None => true,
            Some((len, best_score, _)) => {
                members.len() < *len || (members.len() == *len && score > *best_score)
            }
        };
        if better {
            best = Some((members.len(), score, members));
        }
    }
    best.map(|(_, _, members)| members)
}

/// Exhaustive backtracking over the branch groups.
///
/// Each candidate of the chosen group is speculatively finalised under a
/// journal mark and fully explored; the mark is rolled back either way, and
/// a failed candidate is then pruned from the pre-branch state. Solutions
/// land in the shared set as they are found, so a subtree that yields one is
/// still searched to the end.
pub struct Searcher<'a> {
    pub store: &'a mut CandidateStore,
    pub graph: &'a ContradictionGraph,
    pub coverees: &'a CovereeSet,
    pub constraints: &'a [Box<dyn Constraint>],
    pub solutions: &'a mut SolutionSet,
    stats: SearchStats,
    branch_stack: Vec<(usize, usize)>,
    progress: Option<&'a dyn ProgressSink>,
}

impl<'a> Searcher<'a> {
    pub fn new(
        store: &'a mut CandidateStore,
        graph: &'a ContradictionGraph,
        coverees: &'a CovereeSet,
        constraints: &'a [Box<dyn Constraint>],
        solutions: &'a mut SolutionSet,
    ) -> Self {
        Self {
            store,
            graph,
            coverees,
            constraints,
            solutions,
            stats: SearchStats::default(),
            branch_stack: Vec::new(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    fn propagate(&mut self) -> Result<Fixpoint, Contradiction> {
        Propagator {
            store: &mut *self.store,
            graph: self.graph,
            coverees: self.coverees,
            constraints: self.constraints,
            solutions: &mut *self.solutions,
        }
        .run()
    }

    /// Searches the current state exhaustively. An `Err` here means the
    /// state admits no completion at all; at the top level that is "no
    /// solution".
    pub fn search(&mut self) -> Result<(), Contradiction> {
        match self.propagate()? {
            Fixpoint::Solved => Ok(()),
            Fixpoint::Stuck => self.bifurcate(),
        }
    }

    fn bifurcate(&mut self) -> Result<(), Contradiction> {
        let members = select_branch(self.store, self.graph, self.coverees)
            .expect("a stuck grid always leaves an open group to branch on");
        self.stats.branch_points += 1;
        self.branch_stack.push((0, members.len()));

        for (ordinal, &candidate) in members.iter().enumerate() {
            if let Some(frame) = self.branch_stack.last_mut() {
                frame.0 = ordinal;
            }
            self.report_progress();
            self.stats.candidates_tried += 1;

            let mark = self.store.mark();
            let outcome = self.explore(candidate);
            self.store.rollback(mark);
            if outcome.is_err() {
                // The whole subtree under this candidate is dead; remember
                // that in the pre-branch state.
                self.store.clear_possible(candidate)?;
            }
        }
        self.branch_stack.pop();

        // The pruning above may have left a singleton or nothing at all.
        self.propagate()?;
        Ok(())
    }

    fn explore(&mut self, candidate: usize) -> Result<(), Contradiction> {
        Propagator {
            store: &mut *self.store,
            graph: self.graph,
            coverees: self.coverees,
            constraints: self.constraints,
            solutions: &mut *self.solutions,
        }
        .finalise(&[candidate])?;
        if self.store.complete() {
            return Ok(());
        }
        self.search()
    }

    /// How much of the branch tree lies behind us, assuming siblings split
    /// their parent's share evenly.
    fn fraction(&self) -> f64 {
        let mut fraction = 0.0;
        let mut scale = 1.0;
        for &(ordinal, options) in &self.branch_stack {
            #[allow(clippy::cast_precision_loss)]
            {
                scale /= options as f64;
                fraction += ordinal as f64 * scale;
            }
        }
        fraction
    }

    fn report_progress(&self) {
        if let Some(sink) = self.progress {
            sink.report(self.fraction(), self.solutions.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::possible::index_of;

    #[test]
    fn test_select_prefers_smaller_groups() {
        let mut coverees = CovereeSet::new();
        coverees.add(&[index_of(1, 1, 1), index_of(1, 1, 2), index_of(1, 1, 3)]);
        coverees.add(&[index_of(2, 2, 1), index_of(2, 2, 2)]);
        let store = CandidateStore::new();
        let graph = ContradictionGraph::new();
        let members = select_branch(&store, &graph, &coverees).unwrap();
        assert_eq!(members.as_slice(), &[index_of(2, 2, 1), index_of(2, 2, 2)]);
    }

    #[test]
    fn test_select_breaks_ties_by_exclusion_weight() {
        let mut coverees = CovereeSet::new();
        coverees.add(&[index_of(1, 1, 1), index_of(1, 1, 2)]);
        coverees.add(&[index_of(2, 2, 1), index_of(2, 2, 2)]);
        let store = CandidateStore::new();
        let mut graph = ContradictionGraph::new();
        graph.add(index_of(2, 2, 1), index_of(5, 5, 1));
        graph.add(index_of(2, 2, 1), index_of(5, 5, 2));
        let members = select_branch(&store, &graph, &coverees).unwrap();
        assert_eq!(members.as_slice(), &[index_of(2, 2, 1), index_of(2, 2, 2)]);
    }

    #[test]
    fn test_select_ignores_satisfied_and_singleton_groups() {
        let mut coverees = CovereeSet::new();
        coverees.add(&[index_of(1, 1, 1), index_of(1, 1, 2)]);
        let mut store = CandidateStore::new();
        store.clear_possible(index_of(1, 1, 2)).unwrap();
        let graph = ContradictionGraph::new();
        assert!(select_branch(&store, &graph, &coverees).is_none());
    }

    #[test]
    fn test_first_registered_group_wins_full_ties() {
        let mut coverees = CovereeSet::new();
        coverees.add(&[index_of(1, 1, 1), index_of(1, 1, 2)]);
        coverees.add(&[index_of(2, 2, 1), index_of(2, 2, 2)]);
        let store = CandidateStore::new();
        let graph = ContradictionGraph::new();
        let members = select_branch(&store, &graph, &coverees).unwrap();
        assert_eq!(members.as_slice(), &[index_of(1, 1, 1), index_of(1, 1, 2)]);
    }
}
