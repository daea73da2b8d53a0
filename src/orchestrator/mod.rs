//! Job Orchestrator Module
//!
//! The request flow of the service. A request is either analysed inline and answered
//! directly, or wrapped in a background task whose outcome is written to the result
//! store under a task id the client polls.
//!
//! ## Submodules
//! - **`service`**: The `Analyzer`, implementing the synchronous path, asynchronous
//!   submission, the background routine and result polling.
//! - **`types`**: The request body and the job record persisted for polling.

pub mod service;
pub mod types;
