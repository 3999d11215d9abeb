//! Security analysis dispatchers.
//!
//! # Data Flow
//! ```text
//! ResolvedContext (resolver)
//!     → prompt.rs (truncate, wrap in instruction template)
//!     → model client (one completion call, skipped when unnecessary)
//!     → verdict.rs (best-effort structured parse)
//!     → AnalysisResult / PredictionResult
//! ```
//!
//! # Design Decisions
//! - Resolution failures, empty content, and unparseable model replies are
//!   business outcomes with well-defined result shapes, not errors
//! - Without a credential the dispatchers return placeholder output carrying
//!   an explicit demo marker so callers can tell it apart from real analysis

pub mod predict;
pub mod prompt;
pub mod verdict;

use serde::{Deserialize, Serialize};

use crate::model::client::Completion;
use crate::resolver::ResolvedContext;
use crate::analysis::verdict::RawVerdict;

pub use predict::{PredictionResult, SimulationRequest};

/// Score assigned when the model's reply could not be verified:
/// "treat with caution", not an endorsement either way.
const NEUTRAL_SCORE: u8 = 50;

/// Whether a result came from the live pipeline or is placeholder output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Live,
    Demo,
}

/// Structured judgment returned by the audit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// "Safe", "Risky", or "Unknown".
    pub status: String,
    /// 0-100; 0 when nothing was analyzed, 50 when unverifiable.
    pub risk_score: u8,
    pub reason: String,
    pub mode: AnalysisMode,
}

/// Analyze a resolved context, calling the completion service when there is
/// something to analyze and a credential to do it with.
///
/// Never fails: every upstream misbehavior degrades to a well-formed result.
pub async fn analyze<M>(model: &M, context: &ResolvedContext) -> AnalysisResult
where
    M: Completion + ?Sized,
{
    let (kind, text) = match context {
        ResolvedContext::Unknown { reason } => {
            return AnalysisResult {
                status: "Unknown".to_string(),
                risk_score: 0,
                reason: reason.clone(),
                mode: AnalysisMode::Live,
            }
        }
        ResolvedContext::Found { kind, text } => (kind, text),
    };

    if text.is_empty() {
        return AnalysisResult {
            status: "Safe".to_string(),
            risk_score: 0,
            reason: "No executable code found to analyze".to_string(),
            mode: AnalysisMode::Live,
        };
    }

    if !model.is_configured() {
        return demo_analysis();
    }

    tracing::info!(
        kind = %kind,
        context_chars = text.chars().count(),
        "Submitting context for analysis"
    );

    let prompt = prompt::audit_prompt(prompt::truncate_context(text));
    let reply = match model.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Completion call failed, degrading to Unknown");
            return AnalysisResult {
                status: "Unknown".to_string(),
                risk_score: NEUTRAL_SCORE,
                reason: e.to_string(),
                mode: AnalysisMode::Live,
            };
        }
    };

    match verdict::parse_reply::<RawVerdict>(&reply) {
        Some(v) => AnalysisResult {
            status: verdict::normalize_status(&v.status),
            risk_score: verdict::clamp_score(v.risk_score),
            reason: v.reason,
            mode: AnalysisMode::Live,
        },
        None => AnalysisResult {
            status: "Unknown".to_string(),
            risk_score: NEUTRAL_SCORE,
            reason: reply,
            mode: AnalysisMode::Live,
        },
    }
}

/// Fixed placeholder returned when no completion credential is configured.
fn demo_analysis() -> AnalysisResult {
    AnalysisResult {
        status: "Safe".to_string(),
        risk_score: 5,
        reason: "Demo mode (no completion credential configured): no malicious patterns \
                 detected in a static pass. This verdict is non-authoritative. \
                 PROCEED WITH CAUTION."
            .to_string(),
        mode: AnalysisMode::Demo,
    }
}
