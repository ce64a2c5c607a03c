//! JSON endpoints.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{info_span, warn};
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::AppError;
use crate::sentiment::{ClassifierCategory, LexiconCategory, PolarityScores};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub review: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: ClassifierCategory,
    pub request_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: LexiconCategory,
    pub scores: PolarityScores,
    /// Normalized tokens that were scored
    pub tokens: Vec<String>,
    pub request_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub tokens: Vec<String>,
    pub request_id: String,
}

/// A body that is not valid JSON is the caller's fault.
fn reject(rejection: JsonRejection) -> AppError {
    warn!("Rejected request body: {}", rejection.body_text());
    AppError::Validation(rejection.body_text())
}

/// `POST /predict` with `{"review": "..."}`.
pub async fn predict(
    State(context): State<AppContext>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload.map_err(reject)?;
    let request_id = Uuid::new_v4().to_string();

    let span = info_span!("predict", request_id = %request_id);
    let prediction = span.in_scope(|| {
        context
            .service
            .predict_classifier(request.review.as_deref().unwrap_or(""))
    })?;

    Ok(Json(PredictResponse {
        prediction: prediction.category,
        request_id,
    }))
}

/// `POST /api/analyze` with `{"text": "..."}`.
pub async fn analyze(
    State(context): State<AppContext>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload.map_err(reject)?;
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();

    let span = info_span!("analyze", request_id = %request_id);
    let prediction = span.in_scope(|| {
        context
            .service
            .predict_lexicon(request.text.as_deref().unwrap_or(""))
    })?;

    Ok(Json(AnalyzeResponse {
        sentiment: prediction.category,
        scores: prediction.scores,
        tokens: prediction.tokens,
        request_id,
        analyzed_at: Utc::now(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// `POST /api/normalize` with the raw text as the body.
///
/// Shows what the lexicon path would score. A body that is not UTF-8 text
/// normalizes to no tokens.
pub async fn normalize(
    State(context): State<AppContext>,
    body: Bytes,
) -> Json<NormalizeResponse> {
    let request_id = Uuid::new_v4().to_string();

    let span = info_span!("normalize", request_id = %request_id, body_len = body.len());
    let tokens = span.in_scope(|| context.service.normalizer().normalize_bytes(&body));

    Json(NormalizeResponse { tokens, request_id })
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
