#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::contradiction::ContradictionGraph;
use crate::engine::error::Contradiction;
use crate::engine::possible::{NUM_CELLS, NUM_POSSIBLES, STORE_WIDTH, index_of};
use bit_vec::BitVec;
use smallvec::SmallVec;

/// One recorded bit flip.
#[derive(Debug, Clone, Copy)]
enum Change {
    Cleared(usize),
    Finalised(usize),
}

/// A position in the change journal. Taking a mark before a speculative step
/// and rolling back to it restores the store bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// The dense candidate state of one grid.
///
/// Two bit vectors over the 729 candidates plus the sentinel slot: `possible`
/// (the candidate has not been ruled out) and `finalised` (the candidate is
/// part of the answer). A finalised candidate is always still possible;
/// breaking that is the central contradiction of the whole engine.
///
/// Every flip is appended to a journal, which serves two masters: branch
/// save/restore ([`Self::mark`] / [`Self::rollback`]) and change detection
/// for the propagation fixed point ([`Self::journal_len`]).
#[derive(Debug, Clone)]
pub struct CandidateStore {
    possible: BitVec,
    finalised: BitVec,
    num_finalised: usize,
    journal: Vec<Change>,
}

impl CandidateStore {
    /// A blank grid: every real candidate possible, nothing finalised, the
    /// sentinel permanently impossible.
    #[must_use]
    pub fn new() -> Self {
        let mut possible = BitVec::from_elem(STORE_WIDTH, true);
        possible.set(NUM_POSSIBLES, false);
        Self {
            possible,
            finalised: BitVec::from_elem(STORE_WIDTH, false),
            num_finalised: 0,
            journal: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_possible(&self, i: usize) -> bool {
        self.possible.get(i).unwrap_or(false)
    }

    #[must_use]
    pub fn is_finalised(&self, i: usize) -> bool {
        self.finalised.get(i).unwrap_or(false)
    }

    #[must_use]
    pub const fn num_finalised(&self) -> usize {
        self.num_finalised
    }

    /// Whether every cell has its digit.
    #[must_use]
    pub const fn complete(&self) -> bool {
        self.num_finalised == NUM_CELLS
    }

    /// Rules candidate `i` out. A no-op when it is already out; an error when
    /// it is part of the answer.
    pub fn clear_possible(&mut self, i: usize) -> Result<(), Contradiction> {
        if !self.is_possible(i) {
            return Ok(());
        }
        if self.is_finalised(i) {
            return Err(Contradiction("trying to exclude a finalised digit"));
        }
        self.possible.set(i, false);
        self.journal.push(Change::Cleared(i));
        Ok(())
    }

    /// Marks each not-yet-finalised index as part of the answer, then rules
    /// out everything contradicting a newly finalised index.
    pub fn finalise(
        &mut self,
        graph: &ContradictionGraph,
        indices: &[usize],
    ) -> Result<(), Contradiction> {
        let mut fresh: SmallVec<[usize; 9]> = SmallVec::new();
        for &i in indices {
            if self.is_finalised(i) {
                continue;
            }
            if !self.is_possible(i) {
                return Err(Contradiction("finalising an excluded candidate"));
            }
            self.finalised.set(i, true);
            self.num_finalised += 1;
            self.journal.push(Change::Finalised(i));
            fresh.push(i);
        }
        for &i in &fresh {
            for j in graph.contradictors(i) {
                self.clear_possible(j)?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn mark(&self) -> Mark {
        Mark(self.journal.len())
    }

    /// Undoes every flip recorded after `mark`, youngest first.
    pub fn rollback(&mut self, mark: Mark) {
        while self.journal.len() > mark.0 {
            match self.journal.pop() {
                Some(Change::Cleared(i)) => self.possible.set(i, true),
                Some(Change::Finalised(i)) => {
                    self.finalised.set(i, false);
                    self.num_finalised -= 1;
                }
                None => break,
            }
        }
    }

    /// Journal length. Grows on every flip, so comparing it before and after
    /// a pass detects whether anything changed.
    #[must_use]
    pub const fn journal_len(&self) -> usize {
        self.journal.len()
    }

    /// The digits still open for a cell, ascending.
    #[must_use]
    pub fn possible_digits(&self, row: u8, col: u8) -> SmallVec<[u8; 9]> {
        (1..=9)
            .filter(|&d| self.is_possible(index_of(row, col, d)))
            .collect()
    }

    /// The finalised digit of a cell, if it has one.
    #[must_use]
    pub fn finalised_digit(&self, row: u8, col: u8) -> Option<u8> {
        (1..=9).find(|&d| self.is_finalised(index_of(row, col, d)))
    }

    /// A copy of the `possible` vector, for solution capture.
    #[must_use]
    pub fn snapshot(&self) -> BitVec {
        self.possible.clone()
    }
}

impl Default for CandidateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::possible::SENTINEL;

    #[test]
    fn test_blank_grid() {
        let store = CandidateStore::new();
        assert!(store.is_possible(0));
        assert!(store.is_possible(NUM_POSSIBLES - 1));
        assert!(!store.is_possible(SENTINEL));
        assert_eq!(store.num_finalised(), 0);
        assert!(!store.complete());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = CandidateStore::new();
        store.clear_possible(5).unwrap();
        let len = store.journal_len();
        store.clear_possible(5).unwrap();
        assert_eq!(store.journal_len(), len);
        assert!(!store.is_possible(5));
    }

    #[test]
    fn test_clearing_finalised_is_a_contradiction() {
        let graph = ContradictionGraph::new();
        let mut store = CandidateStore::new();
        store.finalise(&graph, &[12]).unwrap();
        assert_eq!(
            store.clear_possible(12),
            Err(Contradiction("trying to exclude a finalised digit"))
        );
    }

    #[test]
    fn test_finalise_clears_contradictors() {
        let mut graph = ContradictionGraph::new();
        graph.add(0, 1);
        graph.add(0, 2);
        let mut store = CandidateStore::new();
        store.finalise(&graph, &[0]).unwrap();
        assert!(store.is_finalised(0));
        assert!(store.is_possible(0));
        assert!(!store.is_possible(1));
        assert!(!store.is_possible(2));
    }

    #[test]
    fn test_finalise_between_contradicting_pair_fails() {
        let mut graph = ContradictionGraph::new();
        graph.add(0, 1);
        let mut store = CandidateStore::new();
        assert!(store.finalise(&graph, &[0, 1]).is_err());
    }

    #[test]
    fn test_finalising_excluded_candidate_fails() {
        let graph = ContradictionGraph::new();
        let mut store = CandidateStore::new();
        store.clear_possible(9).unwrap();
        assert_eq!(
            store.finalise(&graph, &[9]),
            Err(Contradiction("finalising an excluded candidate"))
        );
    }

    #[test]
    fn test_rollback_restores_exactly() {
        let mut graph = ContradictionGraph::new();
        graph.add(0, 1);
        let mut store = CandidateStore::new();
        store.clear_possible(100).unwrap();
        let reference = store.clone();

        let mark = store.mark();
        store.finalise(&graph, &[0]).unwrap();
        store.clear_possible(200).unwrap();
        store.rollback(mark);

        assert_eq!(store.num_finalised(), reference.num_finalised());
        for i in 0..STORE_WIDTH {
            assert_eq!(store.is_possible(i), reference.is_possible(i));
            assert_eq!(store.is_finalised(i), reference.is_finalised(i));
        }
    }

    #[test]
    fn test_possible_digits_and_finalised_digit() {
        let graph = ContradictionGraph::new();
        let mut store = CandidateStore::new();
        store.clear_possible(index_of(2, 3, 4)).unwrap();
        let digits = store.possible_digits(2, 3);
        assert_eq!(digits.as_slice(), &[1, 2, 3, 5, 6, 7, 8, 9]);

        store.finalise(&graph, &[index_of(2, 3, 7)]).unwrap();
        assert_eq!(store.finalised_digit(2, 3), Some(7));
        assert_eq!(store.finalised_digit(2, 4), None);
    }
}
