//! Keyword Extraction Service Library
//!
//! This library crate defines the modules behind the HTTP binary (`main.rs`).
//!
//! ## Architecture Modules
//! - **`analysis`**: Keyword extraction, definition lookup and the offensive-content filter.
//! - **`api`**: The axum router, HTTP handlers and wire types.
//! - **`config`**: Environment-sourced settings.
//! - **`error`**: Error taxonomy shared by every layer.
//! - **`executor`**: The background job queue, handler registry and worker pool.
//! - **`orchestrator`**: The synchronous and asynchronous processing paths.
//! - **`storage`**: The result store used to hand off asynchronous results.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod storage;
