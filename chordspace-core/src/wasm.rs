//! WASM bindings for chordspace-core
//!
//! Results cross into JavaScript as plain objects through serde-wasm-bindgen.
//! The summary types are always available so native callers can produce the
//! same shapes.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::config::{AnalysisConfig, SpellerConfig};
use crate::label::{VoiceLeadingLabel, format_ratio};
use crate::spelling::ChromaticSpelling;

/// Flat view of a voice-leading label
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelSummary {
    pub label: String,
    pub crossing_labels: Vec<usize>,
    pub scalar_transposition: Option<usize>,
    pub chromatic_transposition: String,
    pub complete: bool,
    pub diagnostics: Vec<String>,
}

impl From<&VoiceLeadingLabel> for LabelSummary {
    fn from(label: &VoiceLeadingLabel) -> Self {
        LabelSummary {
            label: label.label().to_string(),
            crossing_labels: label.crossing_labels().to_vec(),
            scalar_transposition: label.scalar_transposition(),
            chromatic_transposition: format_ratio(label.chromatic_transposition()),
            complete: label.is_complete(),
            diagnostics: label.diagnostics().iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Flat view of a chromatic spelling
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellingSummary {
    /// `(pc, name)` in pitch-class order
    pub names: Vec<(i32, String)>,
    pub text: String,
    pub complete: bool,
}

impl From<&ChromaticSpelling> for SpellingSummary {
    fn from(spelling: &ChromaticSpelling) -> Self {
        SpellingSummary {
            names: spelling
                .spellings()
                .iter()
                .map(|(&pc, s)| (pc, s.to_string()))
                .collect(),
            text: spelling.as_string(),
            complete: spelling.is_complete(),
        }
    }
}

#[cfg(feature = "wasm")]
#[derive(serde::Serialize)]
struct Outcome<T: serde::Serialize> {
    success: bool,
    value: Option<T>,
    error: Option<String>,
}

#[cfg(feature = "wasm")]
fn to_js<T: serde::Serialize>(result: anyhow::Result<T>) -> JsValue {
    let outcome = match result {
        Ok(value) => Outcome {
            success: true,
            value: Some(value),
            error: None,
        },
        Err(e) => Outcome {
            success: false,
            value: None,
            error: Some(e.to_string()),
        },
    };
    serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
}

#[cfg(feature = "wasm")]
fn config_from_js<T: serde::de::DeserializeOwned + Default>(value: JsValue) -> anyhow::Result<T> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| anyhow::anyhow!("Invalid config: {}", e))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = canonicalForm)]
pub fn canonical_form_js(pitches: Vec<i32>, invert: bool, modulus: i32) -> JsValue {
    to_js(Ok(crate::canonical::canonical_form(&pitches, invert, modulus)))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = normalForm)]
pub fn normal_form_js(pitches: Vec<i32>, invert: bool, modulus: i32) -> JsValue {
    to_js(Ok(crate::canonical::normal_form(&pitches, invert, true, modulus)))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = minimalVoiceLeading)]
pub fn minimal_voice_leading_js(first: Vec<i32>, second: Vec<i32>, modulus: i32) -> JsValue {
    to_js(crate::voice_leading::minimal_voice_leading(&first, &second, modulus))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = labelVoiceLeading)]
pub fn label_voice_leading_js(start: Vec<i32>, end: Vec<i32>, config: JsValue) -> JsValue {
    to_js(config_from_js::<AnalysisConfig>(config).and_then(|config| {
        VoiceLeadingLabel::new(&start, &end, config).map(|label| LabelSummary::from(&label))
    }))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = spell)]
pub fn spell_js(pitches: Vec<i32>, config: JsValue) -> JsValue {
    to_js(config_from_js::<SpellerConfig>(config).map(|config| {
        SpellingSummary::from(&crate::spelling::ChromaticSpeller::new(config).spell(&pitches))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::spelling::ChromaticSpeller;

    #[test]
    fn test_label_summary() {
        let label = VoiceLeadingLabel::new(&[60, 64, 67], &[62, 66, 69], AnalysisConfig::default()).unwrap();
        let summary = LabelSummary::from(&label);
        assert_eq!(summary.label, "T2");
        assert_eq!(summary.chromatic_transposition, "2");
        assert_eq!(summary.scalar_transposition, Some(0));
        assert!(summary.complete);
    }

    #[test]
    fn test_spelling_summary() {
        let spelling = ChromaticSpeller::default().spell(&[1, 4, 8]);
        let summary = SpellingSummary::from(&spelling);
        assert_eq!(summary.text, "C# E G#");
        assert_eq!(summary.names[0], (1, "C#".to_string()));
    }
}
