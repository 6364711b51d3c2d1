//! Recoverable analysis problems
//!
//! None of these abort an analysis. The engines record them on their result
//! objects, log them at `warn` level, and carry on with a best-effort answer.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// No transposition or inversion of the canonical form fits the chord;
    /// voices keep their own indices as names
    ChordElementsUnnamed { pcs: Vec<i32> },
    /// Two crossing voices were not neighbours in the cyclic naming
    CrossingUnlabeled { first: usize, second: usize },
    /// No scalar rotation turns the adjusted start chord into the end chord
    ScalarTranspositionNotFound,
    /// The scalar step `modulus / voices` is not a whole number
    UnsupportedScalarStep { modulus: i32, voices: usize },
    /// The speller could not give every pitch class a spelling
    SpellingFailed { pcs: Vec<i32> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ChordElementsUnnamed { pcs } => {
                write!(f, "could not label chord elements of {:?}", pcs)
            }
            Diagnostic::CrossingUnlabeled { first, second } => {
                write!(f, "could not label crossing between elements {} and {}", first, second)
            }
            Diagnostic::ScalarTranspositionNotFound => {
                write!(f, "could not find a scalar transposition")
            }
            Diagnostic::UnsupportedScalarStep { modulus, voices } => write!(
                f,
                "scalar transposition needs the modulus ({}) to divide evenly by the voice count ({})",
                modulus, voices
            ),
            Diagnostic::SpellingFailed { pcs } => write!(f, "failed to spell {:?}", pcs),
        }
    }
}

/// Log a diagnostic and append it to `sink`
pub(crate) fn report(sink: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{}", diagnostic);
    sink.push(diagnostic);
}
