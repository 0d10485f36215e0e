#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::possible::{NUM_POSSIBLES, STORE_WIDTH};
use crate::engine::store::CandidateStore;
use bit_vec::BitVec;

/// Pairwise exclusions between candidates.
///
/// A symmetric, irreflexive adjacency over the candidate indices, stored as
/// one bit row per candidate. Edges are only ever added during puzzle setup;
/// solving reads the graph but never changes it. The sentinel row exists but
/// stays empty.
#[derive(Debug, Clone)]
pub struct ContradictionGraph {
    rows: Vec<BitVec>,
}

impl ContradictionGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![BitVec::from_elem(STORE_WIDTH, false); STORE_WIDTH],
        }
    }

    /// Records that candidates `a` and `b` cannot both hold.
    ///
    /// # Panics
    ///
    /// Panics on a self-edge or a sentinel endpoint. Both are configuration
    /// errors in the puzzle definition.
    pub fn add(&mut self, a: usize, b: usize) {
        assert!(a != b, "self-contradiction on candidate {a}");
        assert!(
            a < NUM_POSSIBLES && b < NUM_POSSIBLES,
            "contradiction endpoint out of range"
        );
        self.rows[a].set(b, true);
        self.rows[b].set(a, true);
    }

    #[must_use]
    pub fn contradicts(&self, a: usize, b: usize) -> bool {
        self.rows[a].get(b).unwrap_or(false)
    }

    /// Iterates over every candidate contradicting `i`.
    pub fn contradictors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[i]
            .iter()
            .enumerate()
            .filter_map(|(j, bit)| bit.then_some(j))
    }

    /// How many still-live candidates finalising `i` would wipe out. Used to
    /// rank branch groups: a bigger wipeout means a more informative branch.
    #[must_use]
    pub fn live_exclusions(&self, i: usize, store: &CandidateStore) -> usize {
        self.contradictors(i)
            .filter(|&j| store.is_possible(j) && !store.is_finalised(j))
            .count()
    }
}

impl Default for ContradictionGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::possible::SENTINEL;

    #[test]
    fn test_edges_are_symmetric() {
        let mut graph = ContradictionGraph::new();
        graph.add(3, 400);
        assert!(graph.contradicts(3, 400));
        assert!(graph.contradicts(400, 3));
        assert!(!graph.contradicts(3, 401));
    }

    #[test]
    #[should_panic(expected = "self-contradiction")]
    fn test_self_edge_panics() {
        let mut graph = ContradictionGraph::new();
        graph.add(7, 7);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_sentinel_edge_panics() {
        let mut graph = ContradictionGraph::new();
        graph.add(0, SENTINEL);
    }

    #[test]
    fn test_contradictors_iteration() {
        let mut graph = ContradictionGraph::new();
        graph.add(10, 20);
        graph.add(10, 30);
        let found: Vec<usize> = graph.contradictors(10).collect();
        assert_eq!(found, vec![20, 30]);
        assert_eq!(graph.contradictors(SENTINEL).count(), 0);
    }

    #[test]
    fn test_live_exclusions_ignores_dead_candidates() {
        let mut graph = ContradictionGraph::new();
        graph.add(10, 20);
        graph.add(10, 30);
        let mut store = CandidateStore::new();
        store.clear_possible(20).unwrap();
        assert_eq!(graph.live_exclusions(10, &store), 1);
    }
}
