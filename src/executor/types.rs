use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier under which a job's result is stored and polled.
///
/// Derived from the caller-supplied request id, so resubmitting the same request id
/// targets the same task and the later write replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn for_request(request_id: &str) -> Self {
        Self(format!("task_{}", request_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unit of background work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    /// The name of the registered handler to invoke (e.g., "analyze_text").
    pub handler: String,
    /// Arbitrary JSON payload passed to the handler function.
    pub payload: serde_json::Value,
    /// Timestamp (ms) when the task was submitted.
    pub submitted_at: u64,
}

impl Task {
    pub fn new(task_id: TaskId, handler: &str, payload: serde_json::Value) -> Self {
        Self {
            task_id,
            handler: handler.to_string(),
            payload,
            submitted_at: now_ms(),
        }
    }
}

/// Current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
