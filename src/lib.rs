//! # Chordspace
//!
//! Interactive front end for `chordspace-core`. Commands read chords typed as
//! integers or note names, hand them to the analysis engines, and print the
//! returned forms, voice leadings, labels and spellings.
//!
//! ## Modules
//!
//! - `commands`: the command registry and one handler per REPL command
//! - `pitch`: parsing of pitches, chords and `a -> b` transitions
//! - `repl`: the Read-Eval-Print Loop

pub mod commands;
pub mod pitch;
pub mod repl;

// Re-export commonly used analysis types
pub use chordspace_core::{AnalysisConfig, SpellerConfig, VoiceLeadingLabel};
