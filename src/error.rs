//! Error Taxonomy
//!
//! Validation and content-policy failures are client errors. Everything raised by the
//! extractor, the store or the job queue is a server-side processing failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ContentPolicy(String),

    #[error("{0}")]
    Processing(String),

    #[error("Failed to schedule background task: {0}")]
    Scheduling(String),
}

impl AnalysisError {
    pub fn empty_content() -> Self {
        Self::Validation("Content cannot be empty".to_string())
    }

    pub fn offensive_content() -> Self {
        Self::ContentPolicy("Content flagged as potentially offensive".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ContentPolicy(_) => StatusCode::BAD_REQUEST,
            Self::Processing(_) | Self::Scheduling(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to connect to result store: {0}")]
    Connection(String),

    #[error("Result store command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Result store operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Dictionary request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("No definition for '{0}'")]
    NotFound(String),

    #[error("Unexpected dictionary response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    #[error("job queue is full")]
    Full,

    #[error("job queue is closed")]
    Closed,
}
