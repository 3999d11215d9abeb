//! Route handlers for the relay API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::predict::{self, PredictionResult, SimulationRequest};
use crate::analysis::{self, AnalysisResult};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::resolver::{self, ResolvedContext};

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    /// Address or transaction hash. Format is not validated beyond
    /// non-emptiness; resolution decides what it actually is.
    pub target: String,

    /// Hint only: resolution falls back to the other kind on failure.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        message: "Sentinel AI Auditor Online",
        status: "active",
    })
}

pub async fn audit(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let target = request.target.trim();
    tracing::info!(
        target = %target,
        hint = request.kind.as_deref().unwrap_or("none"),
        "Audit requested"
    );

    let context = if target.is_empty() {
        ResolvedContext::Unknown {
            reason: "target must not be empty".to_string(),
        }
    } else {
        resolver::resolve(state.ledger.as_ref(), target, request.kind.as_deref()).await
    };

    let result = analysis::analyze(state.model.as_ref(), &context).await;
    Ok(Json(result))
}

pub async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<PredictionResult>, ApiError> {
    tracing::info!(
        sender = %request.sender,
        function_id = %request.function_id,
        "Prediction requested"
    );

    let result = predict::predict(state.ledger.as_ref(), state.model.as_ref(), &request).await;
    Ok(Json(result))
}
