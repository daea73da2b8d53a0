//! HTTP Protocol Definitions
//!
//! Endpoint paths and the response bodies that are specific to the HTTP surface.
//! Request bodies and job records are shared with the orchestrator.

use crate::executor::types::TaskId;
use crate::orchestrator::types::JobStatus;

use serde::{Deserialize, Serialize};

pub const ENDPOINT_ROOT: &str = "/";
pub const ENDPOINT_PROCESS_TEXT: &str = "/process_text";
pub const ENDPOINT_PROCESS_TEXT_ASYNC: &str = "/process_text_async";
/// Followed by `/{task_id}`.
pub const ENDPOINT_GET_RESULT: &str = "/get_result";

pub const WELCOME_MESSAGE: &str = "Welcome to the keyword extraction service!";

#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Acknowledgement for an accepted background job.
#[derive(Debug, Serialize, Deserialize)]
pub struct AsyncProcessingResponse {
    pub task_id: TaskId,
    pub message: String,
    pub status: JobStatus,
}
