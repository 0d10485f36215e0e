//! The solving engine: candidate state, pairwise exclusions, coveree
//! obligations, constraint propagation and exhaustive bifurcation search.

pub mod constraint;
pub mod constraints;
pub mod contradiction;
pub mod coveree;
pub mod error;
pub mod parallel;
pub mod possible;
pub mod propagation;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod solution;
pub mod store;

pub use constraint::Constraint;
pub use contradiction::ContradictionGraph;
pub use coveree::{CovereeSet, GroupStatus, MAX_COVEREE_SIZE};
pub use error::Contradiction;
pub use parallel::{DEFAULT_TASK_TARGET, enumerate_frontier, solve_parallel};
pub use possible::{Cell, Possible, SENTINEL};
pub use propagation::Fixpoint;
pub use puzzle::Puzzle;
pub use search::SearchStats;
pub use solution::{Solution, SolutionSet};
pub use store::CandidateStore;
