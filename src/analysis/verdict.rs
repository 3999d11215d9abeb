//! Parsing of model replies into structured verdicts.
//!
//! The upstream model is non-deterministic: a reply may be clean JSON, JSON
//! wrapped in a fenced code block, or prose. Parsing is best-effort and a
//! failed parse is an expected outcome handled by the dispatchers, never an
//! error.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Verdict fields expected from the auditor prompt.
#[derive(Debug, Deserialize)]
pub struct RawVerdict {
    pub status: String,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub reason: String,
}

/// Prediction fields expected from the prediction prompt.
#[derive(Debug, Deserialize)]
pub struct RawPrediction {
    pub outcome: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Try to parse a model reply as JSON, tolerating one fenced code block.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Option<T> {
    serde_json::from_str(strip_code_fence(reply).trim()).ok()
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest)
}

/// Clamp a model-supplied score into the 0-100 range.
pub fn clamp_score(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}

/// Normalize the expected status values; anything else passes through.
pub fn normalize_status(status: &str) -> String {
    match status.to_ascii_lowercase().as_str() {
        "safe" => "Safe".to_string(),
        "risky" => "Risky".to_string(),
        _ => status.to_string(),
    }
}
