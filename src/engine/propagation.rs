#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::constraint::Constraint;
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::{CovereeSet, GroupStatus};
use crate::engine::error::Contradiction;
use crate::engine::solution::{Solution, SolutionSet};
use crate::engine::store::CandidateStore;

/// Outcome of running propagation to quiescence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixpoint {
    /// The grid completed; a solution was captured.
    Solved,
    /// Nothing more follows logically; the grid is still incomplete.
    Stuck,
}

/// Drives the candidate state to a fixed point.
///
/// Finalising a candidate rules out everything it contradicts, which can
/// strip groups down to a single member, which finalises that member in
/// turn. The cascade bottoms out because every step finalises a cell and
/// there are only 81. On completion the constraints get one last say before
/// the grid is captured as a solution.
pub struct Propagator<'a> {
    pub store: &'a mut CandidateStore,
    pub graph: &'a ContradictionGraph,
    pub coverees: &'a CovereeSet,
    pub constraints: &'a [Box<dyn Constraint>],
    pub solutions: &'a mut SolutionSet,
}

impl Propagator<'_> {
    /// Finalises the given candidates and follows every consequence.
    pub fn finalise(&mut self, indices: &[usize]) -> Result<(), Contradiction> {
        self.store.finalise(self.graph, indices)?;
        if self.store.complete() {
            self.validate()?;
            self.solutions.insert(Solution::capture(self.store));
            Ok(())
        } else {
            self.resolve_singletons()
        }
    }

    /// Scans every group; an exhausted one is a contradiction, a group with
    /// exactly one candidate left finalises it (and the cascade may complete
    /// the grid, after which the remaining groups are all settled).
    pub fn resolve_singletons(&mut self) -> Result<(), Contradiction> {
        for group in self.coverees.groups() {
            match CovereeSet::status(group, self.store) {
                GroupStatus::Satisfied => {}
                GroupStatus::Exhausted => {
                    return Err(Contradiction("no remaining candidates for a required group"));
                }
                GroupStatus::Open(members) => {
                    if let [only] = members.as_slice() {
                        self.finalise(&[*only])?;
                        if self.store.complete() {
                            return Ok(());
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Runs constraint checks and singleton resolution until nothing changes,
    /// watching the journal length for movement.
    pub fn run(&mut self) -> Result<Fixpoint, Contradiction> {
        loop {
            if self.store.complete() {
                return Ok(Fixpoint::Solved);
            }
            let before = self.store.journal_len();
            for constraint in self.constraints {
                constraint.act_on_grid(self.store)?;
            }
            self.resolve_singletons()?;
            if self.store.complete() {
                return Ok(Fixpoint::Solved);
            }
            if self.store.journal_len() == before {
                return Ok(Fixpoint::Stuck);
            }
        }
    }

    /// The completion check: every constraint must accept the full grid and
    /// every group must be satisfied.
    fn validate(&mut self) -> Result<(), Contradiction> {
        for constraint in self.constraints {
            constraint.act_on_grid(self.store)?;
        }
        for group in self.coverees.groups() {
            if CovereeSet::status(group, self.store) == GroupStatus::Exhausted {
                return Err(Contradiction("no remaining candidates for a required group"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::possible::index_of;

    fn parts() -> (
        CandidateStore,
        ContradictionGraph,
        CovereeSet,
        Vec<Box<dyn Constraint>>,
        SolutionSet,
    ) {
        (
            CandidateStore::new(),
            ContradictionGraph::new(),
            CovereeSet::new(),
            Vec::new(),
            SolutionSet::new(),
        )
    }

    #[test]
    fn test_singleton_group_is_finalised() {
        let (mut store, graph, mut coverees, constraints, mut solutions) = parts();
        let a = index_of(1, 1, 1);
        let b = index_of(1, 1, 2);
        coverees.add(&[a, b]);
        store.clear_possible(b).unwrap();

        let mut propagator = Propagator {
            store: &mut store,
            graph: &graph,
            coverees: &coverees,
            constraints: &constraints,
            solutions: &mut solutions,
        };
        propagator.resolve_singletons().unwrap();
        assert!(store.is_finalised(a));
    }

    #[test]
    fn test_exhausted_group_is_a_contradiction() {
        let (mut store, graph, mut coverees, constraints, mut solutions) = parts();
        let a = index_of(1, 1, 1);
        let b = index_of(1, 1, 2);
        coverees.add(&[a, b]);
        store.clear_possible(a).unwrap();
        store.clear_possible(b).unwrap();

        let mut propagator = Propagator {
            store: &mut store,
            graph: &graph,
            coverees: &coverees,
            constraints: &constraints,
            solutions: &mut solutions,
        };
        assert_eq!(
            propagator.resolve_singletons(),
            Err(Contradiction("no remaining candidates for a required group"))
        );
    }

    #[test]
    fn test_finalising_cascades_through_groups() {
        let (mut store, mut graph, mut coverees, constraints, mut solutions) = parts();
        let a = index_of(1, 1, 1);
        let b = index_of(2, 2, 1);
        let c = index_of(2, 2, 2);
        // Finalising a kills b, which forces the (b, c) group down to c.
        graph.add(a, b);
        coverees.add(&[b, c]);

        let mut propagator = Propagator {
            store: &mut store,
            graph: &graph,
            coverees: &coverees,
            constraints: &constraints,
            solutions: &mut solutions,
        };
        propagator.finalise(&[a]).unwrap();
        assert!(store.is_finalised(c));
        assert!(!store.is_possible(b));
    }

    #[test]
    fn test_blank_grid_without_groups_is_stuck() {
        let (mut store, graph, coverees, constraints, mut solutions) = parts();
        let mut propagator = Propagator {
            store: &mut store,
            graph: &graph,
            coverees: &coverees,
            constraints: &constraints,
            solutions: &mut solutions,
        };
        assert_eq!(propagator.run(), Ok(Fixpoint::Stuck));
        assert_eq!(propagator.run(), Ok(Fixpoint::Stuck));
    }
}
