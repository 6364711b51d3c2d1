//! Analysis configuration types
//!
//! Pure data, safe for WebAssembly. The REPL keeps one of each per session and
//! the WASM bindings accept them from JavaScript when the `serde` feature is on.

use crate::modular::DEFAULT_MODULUS;
use anyhow::{Result, anyhow};

/// Settings shared by the canonical-form and voice-leading engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Steps per octave
    pub modulus: i32,
    /// Treat inversionally related sets as equivalent
    pub invert: bool,
    /// Render crossings as `t<n>C0` pairs that absorb the scalar transposition
    pub transposition_region: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
            invert: false,
            transposition_region: false,
        }
    }
}

impl AnalysisConfig {
    pub fn with_modulus(mut self, modulus: i32) -> Result<Self> {
        if modulus < 1 {
            return Err(anyhow!("Modulus must be positive, got {}", modulus));
        }
        self.modulus = modulus;
        Ok(self)
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_transposition_region(mut self, region: bool) -> Self {
        self.transposition_region = region;
        self
    }
}

/// Direction the speller leans toward when sharp and flat respellings tie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccidentalBias {
    Sharp,
    Flat,
}

impl AccidentalBias {
    /// Parse a bias from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<AccidentalBias> {
        match s.to_lowercase().as_str() {
            "sharp" | "sharps" | "#" => Some(AccidentalBias::Sharp),
            "flat" | "flats" | "b" => Some(AccidentalBias::Flat),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AccidentalBias::Sharp => "sharp",
            AccidentalBias::Flat => "flat",
        }
    }
}

/// Tunables of the chromatic speller's repair heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellerConfig {
    /// A white-note respelling (B#, E#, Fb, Cb) is accepted only when it
    /// lowers the problem score by more than this
    pub respell_white_note_penalty: f64,
    /// Render unaltered letters with an explicit `n`
    pub courtesy_naturals: bool,
    /// Tie-break between the sharp and flat repair candidates
    pub default_bias: Option<AccidentalBias>,
}

impl Default for SpellerConfig {
    fn default() -> Self {
        Self {
            respell_white_note_penalty: 2.0,
            courtesy_naturals: false,
            default_bias: None,
        }
    }
}

impl SpellerConfig {
    pub fn with_bias(mut self, bias: Option<AccidentalBias>) -> Self {
        self.default_bias = bias;
        self
    }

    pub fn with_courtesy_naturals(mut self, naturals: bool) -> Self {
        self.courtesy_naturals = naturals;
        self
    }
}
