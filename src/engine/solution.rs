#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::possible::index_of;
use crate::engine::render;
use crate::engine::store::CandidateStore;
use bit_vec::BitVec;
use rustc_hash::FxHashSet;
use std::fmt;

/// One completed grid: a snapshot of the `possible` vector at the moment the
/// last cell was finalised. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    possibles: BitVec,
}

impl Solution {
    #[must_use]
    pub fn capture(store: &CandidateStore) -> Self {
        Self {
            possibles: store.snapshot(),
        }
    }

    #[must_use]
    pub fn is_possible(&self, i: usize) -> bool {
        self.possibles.get(i).unwrap_or(false)
    }

    /// The digit of a cell, when the cell has exactly one candidate left.
    #[must_use]
    pub fn digit(&self, row: u8, col: u8) -> Option<u8> {
        let mut found = None;
        for d in 1..=9 {
            if self.is_possible(index_of(row, col, d)) {
                if found.is_some() {
                    return None;
                }
                found = Some(d);
            }
        }
        found
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render::grid(|i| self.is_possible(i)))
    }
}

/// All solutions found so far, deduplicated by exact snapshot equality.
/// Workers searching overlapping subtrees can therefore be merged with a
/// plain set union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet {
    set: FxHashSet<Solution>,
}

impl SolutionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, solution: Solution) -> bool {
        self.set.insert(solution)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.set.iter()
    }

    pub fn absorb(&mut self, other: Self) {
        self.set.extend(other.set);
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Solution;
    type IntoIter = std::collections::hash_set::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_snapshots_deduplicate() {
        let store = CandidateStore::new();
        let mut set = SolutionSet::new();
        assert!(set.insert(Solution::capture(&store)));
        assert!(!set.insert(Solution::capture(&store)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_distinct_snapshots_kept() {
        let mut store = CandidateStore::new();
        let mut set = SolutionSet::new();
        set.insert(Solution::capture(&store));
        store.clear_possible(0).unwrap();
        set.insert(Solution::capture(&store));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_absorb_unions() {
        let mut store = CandidateStore::new();
        let mut left = SolutionSet::new();
        left.insert(Solution::capture(&store));
        let mut right = SolutionSet::new();
        right.insert(Solution::capture(&store));
        store.clear_possible(3).unwrap();
        right.insert(Solution::capture(&store));
        left.absorb(right);
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn test_digit_requires_a_unique_candidate() {
        let mut store = CandidateStore::new();
        let solution = Solution::capture(&store);
        assert_eq!(solution.digit(1, 1), None);
        for d in 2..=9 {
            store
                .clear_possible(crate::engine::possible::index_of(1, 1, d))
                .unwrap();
        }
        let solution = Solution::capture(&store);
        assert_eq!(solution.digit(1, 1), Some(1));
    }
}
