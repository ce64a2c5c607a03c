//! # Web Module
//!
//! HTTP adapters over the shared `SentimentService`. No scoring happens here.
//!
//! ## Routes
//! - `GET /`: review page (classifier path, posts to `/predict`)
//! - `POST /predict`: JSON classifier prediction
//! - `POST /api/analyze`: JSON lexicon analysis
//! - `POST /api/normalize`: tokens the lexicon path would score, from a raw body
//! - `GET|POST /analyzer`: HTML form over the lexicon path
//! - `GET /health`: liveness probe

pub mod api;
pub mod form;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

/// Build the application router around an initialized context.
pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/", get(form::review_page))
        .route("/predict", post(api::predict))
        .route("/api/analyze", post(api::analyze))
        .route("/api/normalize", post(api::normalize))
        .route("/analyzer", get(form::analyzer_page).post(form::analyze_form))
        .route("/health", get(api::health))
        .with_state(context)
}
