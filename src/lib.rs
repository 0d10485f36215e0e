#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! # varsudoku
//!
//! A solver for variant sudoku puzzles that finds *every* solution.
//!
//! A puzzle is modelled as a dense boolean space of 729 candidate
//! assignments (cell x digit), a symmetric graph of pairwise exclusions
//! between them, and a list of "coveree" groups of which at least one
//! member must end up in the answer. Classic sudoku and every supported
//! variant rule compile down to those three structures; solving is then
//! rule-agnostic: propagate to a fixed point, branch on the tightest open
//! group, and backtrack with journal-based undo until the whole tree has
//! been visited.
//!
//! ```no_run
//! use varsudoku::{GermanWhisper, Puzzle};
//!
//! let mut puzzle = Puzzle::new();
//! puzzle.set_digit(1, 1, 5)?;
//! puzzle.add_constraint(Box::new(GermanWhisper::new(vec![(3, 1), (3, 2), (3, 3)])))?;
//! let solutions = puzzle.solve();
//! println!("{} solutions", solutions.len());
//! # Ok::<(), varsudoku::Contradiction>(())
//! ```

pub mod engine;

pub use engine::constraints::{
    AntiKing, CornerMark, CountingCircles, GermanWhisper, KillerCage, NoRepeats, NoTouchingSum,
    NoX, RegionCount, Wheel,
};
pub use engine::{
    Cell, Constraint, Contradiction, DEFAULT_TASK_TARGET, Fixpoint, Possible, Puzzle, SearchStats,
    Solution, SolutionSet, enumerate_frontier, solve_parallel,
};
