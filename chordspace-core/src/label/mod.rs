//! Voice-leading labels
//!
//! A transition between two chords with the same number of voices is broken
//! into four parts and rendered as a compact string:
//!
//! - `P(a, b, ...)`: how each voice moves to turn the start chord's set type
//!   into the end chord's, when they differ
//! - `C<n>` per voice crossing, or `t<n>C0` pairs in transposition-region mode
//! - `t<n>`: scalar transposition, in steps of `modulus / voices`
//! - `T<x>`: the remaining uniform chromatic transposition
//!
//! ```
//! use chordspace_core::config::AnalysisConfig;
//! use chordspace_core::label::VoiceLeadingLabel;
//!
//! let label = VoiceLeadingLabel::new(&[60, 64, 67], &[62, 66, 69], AnalysisConfig::default()).unwrap();
//! assert_eq!(label.to_string(), "T2");
//! ```

mod crossing;
mod naming;


pub use crossing::{CrossingEvent, Time, crossing_events, label_crossings};
pub use naming::chord_element_names;

use crate::canonical::canonical_form;
use crate::config::AnalysisConfig;
use crate::diagnostic::{Diagnostic, report};
use crate::modular::{Pitch, pc};
use anyhow::{Result, anyhow};
use num_rational::Ratio;
use num_traits::{ToPrimitive, Zero};
use std::fmt;

/// Decomposition of one chord-to-chord transition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceLeadingLabel {
    start: Vec<Pitch>,
    end: Vec<Pitch>,
    config: AnalysisConfig,
    crossings: Vec<CrossingEvent>,
    element_names: Option<Vec<usize>>,
    crossing_labels: Vec<usize>,
    start_form: Vec<i32>,
    end_form: Vec<i32>,
    set_motion: Vec<i32>,
    chromatic: Ratio<i64>,
    scalar: Option<usize>,
    diagnostics: Vec<Diagnostic>,
    rendered: String,
}

impl VoiceLeadingLabel {
    /// Analyze the transition `start -> end`; voice `i` of one chord moves to
    /// voice `i` of the other.
    pub fn new(start: &[Pitch], end: &[Pitch], config: AnalysisConfig) -> Result<Self> {
        if start.len() != end.len() {
            return Err(anyhow!(
                "Voice-leading labels need equal voice counts ({} vs {})",
                start.len(),
                end.len()
            ));
        }
        if start.is_empty() {
            return Err(anyhow!("Cannot label a transition between empty chords"));
        }
        if config.modulus < 1 {
            return Err(anyhow!("Modulus must be positive, got {}", config.modulus));
        }

        let modulus = config.modulus;
        let n = start.len();
        let mut diagnostics = Vec::new();

        let crossings = crossing_events(start, end, modulus);

        let start_pcs: Vec<i32> = start.iter().map(|&p| pc(p, modulus)).collect();
        let start_form = canonical_form(start, config.invert, modulus);
        let element_names = chord_element_names(&start_pcs, &start_form, modulus);
        if element_names.is_none() {
            report(
                &mut diagnostics,
                Diagnostic::ChordElementsUnnamed { pcs: start_pcs.clone() },
            );
        }
        let names: Vec<usize> = element_names.clone().unwrap_or_else(|| (0..n).collect());

        let crossing_labels = label_crossings(&crossings, &names, modulus, &mut diagnostics);

        let end_form = canonical_form(end, config.invert, modulus);
        let set_motion: Vec<i32> = end_form
            .iter()
            .zip(&start_form)
            .map(|(b, a)| b - a)
            .collect();

        let adjusted: Vec<Ratio<i64>> = start
            .iter()
            .zip(&names)
            .map(|(&p, &slot)| Ratio::from_integer((p + set_motion[slot]) as i64))
            .collect();
        let end_sum: i64 = end.iter().map(|&p| p as i64).sum();
        let adjusted_sum: Ratio<i64> = adjusted.iter().copied().sum();
        let chromatic = (Ratio::from_integer(end_sum) - adjusted_sum) / Ratio::from_integer(n as i64);

        let transposed: Vec<Ratio<i64>> = adjusted.iter().map(|&p| p + chromatic).collect();
        let scalar = match find_scalar_transposition(&transposed, end, modulus) {
            Ok(steps) => Some(steps),
            Err(diagnostic) => {
                report(&mut diagnostics, diagnostic);
                None
            }
        };

        let mut label = VoiceLeadingLabel {
            start: start.to_vec(),
            end: end.to_vec(),
            config,
            crossings,
            element_names,
            crossing_labels,
            start_form,
            end_form,
            set_motion,
            chromatic,
            scalar,
            diagnostics,
            rendered: String::new(),
        };
        label.rendered = label.render();
        Ok(label)
    }

    pub fn start(&self) -> &[Pitch] {
        &self.start
    }

    pub fn end(&self) -> &[Pitch] {
        &self.end
    }

    pub fn config(&self) -> AnalysisConfig {
        self.config
    }

    pub fn crossings(&self) -> &[CrossingEvent] {
        &self.crossings
    }

    /// Canonical slot of each start voice, if the form could be placed
    pub fn element_names(&self) -> Option<&[usize]> {
        self.element_names.as_deref()
    }

    pub fn crossing_labels(&self) -> &[usize] {
        &self.crossing_labels
    }

    pub fn start_form(&self) -> &[i32] {
        &self.start_form
    }

    pub fn end_form(&self) -> &[i32] {
        &self.end_form
    }

    /// Whether the two chords belong to different set classes
    pub fn is_new_set(&self) -> bool {
        self.set_motion.iter().any(|&d| d != 0)
    }

    /// Per-voice set-class motion, in start-voice order
    pub fn permutation(&self) -> Vec<i32> {
        (0..self.start.len())
            .map(|voice| self.set_motion[self.name_of(voice)])
            .collect()
    }

    /// Scalar steps, or `None` when no rotation matched
    pub fn scalar_transposition(&self) -> Option<usize> {
        self.scalar
    }

    /// Uniform chromatic shift left after set motion and scalar steps
    pub fn chromatic_transposition(&self) -> Ratio<i64> {
        self.chromatic
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when the analysis raised no diagnostics
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The rendered label
    pub fn label(&self) -> &str {
        &self.rendered
    }

    /// Crossings re-expressed as scalar steps: each crossing becomes a
    /// `t<k>` step followed by a reset, and the final entry folds in the
    /// scalar transposition.
    pub fn region_transpositions(&self) -> Vec<usize> {
        let n = self.start.len() as i64;
        let mut out = Vec::with_capacity(self.crossing_labels.len() + 1);
        let mut last = 0i64;
        for &c in &self.crossing_labels {
            out.push((last + c as i64).rem_euclid(n) as usize);
            last = -(c as i64);
        }
        out.push((last + self.scalar.unwrap_or(0) as i64).rem_euclid(n) as usize);
        out
    }

    fn name_of(&self, voice: usize) -> usize {
        self.element_names
            .as_ref()
            .map_or(voice, |names| names[voice])
    }

    fn render(&self) -> String {
        let mut out = String::new();

        if self.is_new_set() {
            let parts: Vec<String> = self.permutation().iter().map(|d| d.to_string()).collect();
            out.push_str(&format!("P({}) ", parts.join(", ")));
        }

        if !self.crossing_labels.is_empty() {
            if self.config.transposition_region {
                let tokens: String = self
                    .region_transpositions()
                    .iter()
                    .map(|t| format!("t{}C0", t))
                    .collect();
                // the closing return to zero is implicit
                out.push_str(&tokens[..tokens.len() - 2]);
            } else {
                for c in &self.crossing_labels {
                    out.push_str(&format!("C{}", c));
                }
            }
        }

        if let Some(steps) = self.scalar {
            if steps != 0 && !self.config.transposition_region {
                out.push_str(&format!("t{}", steps));
            }
        }

        if !self.chromatic.is_zero() {
            out.push_str(&format!("T{}", format_ratio(self.chromatic)));
        }

        out.trim_end().to_string()
    }
}

impl fmt::Display for VoiceLeadingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

/// Find `i` such that shifting the start chord's pitch classes down by
/// `i * modulus / voices` reproduces the end chord's pitch classes.
pub fn find_scalar_transposition(
    start: &[Ratio<i64>],
    end: &[Pitch],
    modulus: i32,
) -> std::result::Result<usize, Diagnostic> {
    let n = start.len();
    let m = Ratio::from_integer(modulus as i64);

    let mut end_pcs: Vec<Ratio<i64>> = end
        .iter()
        .map(|&p| Ratio::from_integer(pc(p, modulus) as i64))
        .collect();
    end_pcs.sort();
    let mut start_pcs: Vec<Ratio<i64>> = start.iter().map(|&x| ratio_mod(x, m)).collect();
    start_pcs.sort();

    let step = m / Ratio::from_integer(n as i64);
    for i in 0..n {
        if start_pcs == end_pcs {
            return Ok(i);
        }
        if !step.is_integer() {
            return Err(Diagnostic::UnsupportedScalarStep { modulus, voices: n });
        }
        start_pcs = start_pcs.iter().map(|&x| ratio_mod(x - step, m)).collect();
        start_pcs.sort();
    }
    Err(Diagnostic::ScalarTranspositionNotFound)
}

fn ratio_mod(x: Ratio<i64>, m: Ratio<i64>) -> Ratio<i64> {
    let r = x % m;
    if r < Ratio::zero() { r + m } else { r }
}

/// Integral values print bare, others as decimals
pub fn format_ratio(value: Ratio<i64>) -> String {
    if value.is_integer() {
        value.to_integer().to_string()
    } else {
        value.to_f64().map_or_else(|| value.to_string(), |f| f.to_string())
    }
}
