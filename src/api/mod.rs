//! HTTP API Module
//!
//! Exposes the orchestrator over JSON endpoints. Handlers stay thin: they unwrap the
//! request, call the `Analyzer`, and map the outcome to a status code.
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths and response bodies.
//! - **`handlers`**: The axum handler functions.

pub mod handlers;
pub mod protocol;


use crate::orchestrator::service::Analyzer;
use handlers::{handle_get_result, handle_process_text, handle_process_text_async, handle_root};
use protocol::*;

use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;

/// Builds the service router with the analyzer attached as an extension.
pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route(ENDPOINT_ROOT, get(handle_root))
        .route(ENDPOINT_PROCESS_TEXT, post(handle_process_text))
        .route(ENDPOINT_PROCESS_TEXT_ASYNC, post(handle_process_text_async))
        .route(&format!("{}/:task_id", ENDPOINT_GET_RESULT), get(handle_get_result))
        .layer(Extension(analyzer))
}
