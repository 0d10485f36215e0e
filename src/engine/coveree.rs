#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::possible::{NUM_POSSIBLES, SENTINEL};
use crate::engine::store::CandidateStore;
use smallvec::SmallVec;

/// The widest group a coveree can hold.
pub const MAX_COVEREE_SIZE: usize = 9;

/// A coveree group, padded to fixed width with the sentinel.
pub type Group = [usize; MAX_COVEREE_SIZE];

/// What the candidate state says about one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    /// Some member is finalised; the obligation is met.
    Satisfied,
    /// No member finalised yet; these members are still possible.
    Open(SmallVec<[usize; MAX_COVEREE_SIZE]>),
    /// No member is even possible any more.
    Exhausted,
}

/// The "at least one of these must be finalised" obligations.
///
/// Ordered and append-only. Groups narrower than the fixed width are padded
/// with the sentinel, which is never possible and so never counts.
#[derive(Debug, Clone, Default)]
pub struct CovereeSet {
    groups: Vec<Group>,
}

impl CovereeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Appends a group.
    ///
    /// # Panics
    ///
    /// Panics when the group is empty, wider than [`MAX_COVEREE_SIZE`], or
    /// contains a non-candidate index. All are configuration errors.
    pub fn add(&mut self, members: &[usize]) {
        assert!(!members.is_empty(), "empty coveree group");
        assert!(
            members.len() <= MAX_COVEREE_SIZE,
            "coveree group of {} members exceeds the maximum of {MAX_COVEREE_SIZE}",
            members.len()
        );
        let mut group = [SENTINEL; MAX_COVEREE_SIZE];
        for (slot, &i) in group.iter_mut().zip(members) {
            assert!(i < NUM_POSSIBLES, "coveree member out of range");
            *slot = i;
        }
        self.groups.push(group);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Classifies one group against the current candidate state. Shared by
    /// singleton resolution and branch selection so that an exhausted group
    /// is caught on every path that looks at it.
    #[must_use]
    pub fn status(group: &Group, store: &CandidateStore) -> GroupStatus {
        let mut open: SmallVec<[usize; MAX_COVEREE_SIZE]> = SmallVec::new();
        for &i in group {
            if i == SENTINEL {
                break;
            }
            if store.is_finalised(i) {
                return GroupStatus::Satisfied;
            }
            if store.is_possible(i) {
                open.push(i);
            }
        }
        if open.is_empty() {
            GroupStatus::Exhausted
        } else {
            GroupStatus::Open(open)
        }
    }
}
