#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::coveree::CovereeSet;
use crate::engine::error::Contradiction;
use crate::engine::store::CandidateStore;
use std::fmt;

/// A puzzle rule.
///
/// A rule contributes in up to three ways, each optional:
///
/// - [`Self::add_contradictions`] translates the rule into pairwise
///   exclusions and coveree groups, once, at registration;
/// - [`Self::initialise_on_grid`] prunes candidates that can never take part
///   in any answer under this rule, once, at registration;
/// - [`Self::act_on_grid`] re-validates the current state on every
///   propagation pass, for the rules whose reach goes beyond pairs.
///
/// Rules are boxed and cloneable so a puzzle can be deep-copied for worker
/// threads.
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn clone_box(&self) -> Box<dyn Constraint>;

    fn add_contradictions(&self, graph: &mut ContradictionGraph, coverees: &mut CovereeSet) {
        let _ = (graph, coverees);
    }

    fn initialise_on_grid(&self, store: &mut CandidateStore) -> Result<(), Contradiction> {
        let _ = store;
        Ok(())
    }

    fn act_on_grid(&self, store: &CandidateStore) -> Result<(), Contradiction> {
        let _ = store;
        Ok(())
    }
}

impl Clone for Box<dyn Constraint> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
