//! Axum route handlers for the Feedback API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::pipeline::{Enhancement, FeedbackOutput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Body shared by both endpoints. Every field is any JSON value so a wrong
/// type is reported as a validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub text: Value,
    #[serde(default = "default_feedback_type")]
    pub feedback_type: Value,
    #[serde(default = "default_tone")]
    pub tone: Value,
    #[serde(default = "default_formality")]
    pub formality: Value,
}

fn default_feedback_type() -> Value {
    Value::from("geral")
}

fn default_tone() -> Value {
    Value::from("construtivo")
}

fn default_formality() -> Value {
    Value::from("neutro")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/feedback/enhance
///
/// Always answers 200 with the five display strings. Errors are reported
/// in `enhanced` with every other field empty.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Json<FeedbackOutput> {
    let span = info_span!("enhance", request_id = %Uuid::new_v4());
    let output = state
        .feedback
        .process_feedback(
            &request.text,
            &request.feedback_type,
            &request.tone,
            &request.formality,
        )
        .instrument(span)
        .await;

    Json(output)
}

/// POST /api/v1/feedback/structured
///
/// Returns the parsed record and its formatted sections.
/// Validation failures are 400s; an exceeded deadline is a 504.
pub async fn handle_structured(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<Enhancement>, AppError> {
    let span = info_span!("structured", request_id = %Uuid::new_v4());
    let enhancement = state
        .feedback
        .enhance(
            &request.text,
            &request.feedback_type,
            &request.tone,
            &request.formality,
        )
        .instrument(span)
        .await?;

    Ok(Json(enhancement))
}
