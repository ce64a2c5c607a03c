use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input text was missing, empty or whitespace-only. Detected before any resource is invoked.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An opaque scoring resource faulted while producing a prediction.
    #[error("Prediction failed: {0}")]
    Prediction(#[from] ModelFault),

    /// A model artifact or linguistic resource could not be loaded at startup.
    #[error("Resource initialization failed: {0}")]
    ResourceInit(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Faults raised by the opaque classifier or lexicon resource.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelFault {
    /// The resource reported an error while scoring.
    #[error("{0}")]
    Internal(String),
    /// The resource panicked during scoring.
    #[error("resource panicked: {0}")]
    Panicked(String),
    /// The resource returned a different number of outputs than inputs.
    #[error("expected {expected} output(s), got {actual}")]
    Cardinality { expected: usize, actual: usize },
}

/// Stable, serializable error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationFailure,
    PredictionFailure,
    ResourceInitializationFailure,
    ConfigurationFailure,
    IoFailure,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::ValidationFailure,
            AppError::Prediction(_) => ErrorKind::PredictionFailure,
            AppError::ResourceInit(_) => ErrorKind::ResourceInitializationFailure,
            AppError::Config(_) => ErrorKind::ConfigurationFailure,
            AppError::Io(_) => ErrorKind::IoFailure,
        }
    }

    /// I/O failure reading a resource file, keeping the error kind and naming the file.
    pub fn unreadable(what: &str, path: &Path, err: io::Error) -> Self {
        AppError::Io(io::Error::new(
            err.kind(),
            format!("cannot read {} {}: {}", what, path.display(), err),
        ))
    }

    /// HTTP status the boundary layer reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Prediction(f) => AppError::Prediction(f.clone()),
            AppError::ResourceInit(s) => AppError::ResourceInit(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ResourceInit(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

impl From<std::net::AddrParseError> for AppError {
    fn from(err: std::net::AddrParseError) -> Self {
        AppError::Config(format!("Invalid bind address: {}", err))
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}
