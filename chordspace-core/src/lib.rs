//! # Chordspace Core
//!
//! WASM-compatible analysis library for pitch-class collections and the
//! transitions between them. No I/O and no terminal handling live here.
//!
//! ## Engines
//!
//! - **canonical**: geometric and standard normal forms
//! - **voice_leading**: minimal voice leading by rotation search
//! - **label**: voice-leading labels with crossing detection
//! - **spelling**: letter-name spelling of pitch-class sets
//!
//! ## Features
//!
//! - **serde**: Serialize/Deserialize on public data types
//! - **wasm**: WASM bindings via wasm-bindgen
//! - **colored**: Colored terminal output (disabled in WASM)
//!
//! ## Example
//!
//! ```
//! use chordspace_core::{AnalysisConfig, VoiceLeadingLabel, canonical_form};
//!
//! assert_eq!(canonical_form(&[60, 64, 67], false, 12), vec![0, 3, 8]);
//!
//! let label = VoiceLeadingLabel::new(&[60, 64, 67], &[67, 64, 60], AnalysisConfig::default()).unwrap();
//! assert_eq!(label.label(), "C0C1C0");
//! ```

pub mod bass;
pub mod canonical;
pub mod config;
pub mod diagnostic;
pub mod label;
pub mod modular;
pub mod permutation;
pub mod rng;
pub mod spelling;
pub mod voice_leading;
pub mod wasm;

// Re-export commonly used types
pub use bass::BassFinder;
pub use canonical::{NormalForm, canonical_form, normal_form};
pub use config::{AccidentalBias, AnalysisConfig, SpellerConfig};
pub use diagnostic::Diagnostic;
pub use label::VoiceLeadingLabel;
pub use modular::Pitch;
pub use rng::{ChordRng, RandomSource, weighted_choice};
pub use spelling::{ChromaticSpeller, ChromaticSpelling, Spelling};
pub use voice_leading::{MinimalVoiceLeading, VoiceLeading, VoiceMotion, minimal_voice_leading};
