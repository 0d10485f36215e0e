#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use std::error::Error;
use std::fmt;

/// The single solve-time error.
///
/// Raised when a required group runs out of candidates, when a rule would
/// exclude an already finalised digit, or when a constraint's dynamic check
/// fails. The search recovers from it locally by pruning the candidate that
/// led here; at the root it means the puzzle has no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction(pub &'static str);

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contradiction: {}", self.0)
    }
}

impl Error for Contradiction {}
