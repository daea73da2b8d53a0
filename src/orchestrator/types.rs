use crate::analysis::types::OutputData;

use serde::{Deserialize, Serialize};

/// A text submitted for analysis.
///
/// `id` is caller-supplied and never checked for uniqueness. The older body shape
/// `{ "content": ... }` is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingRequest {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "content")]
    pub data: String,
    /// Optional context forwarded to the definition provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preface: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Error,
}

/// What polling returns, and (for terminal states) what the result store holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_data: Option<OutputData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobRecord {
    /// Reported while no result has been stored yet.
    pub fn processing() -> Self {
        Self {
            status: JobStatus::Processing,
            processed_data: None,
            message: None,
        }
    }

    pub fn completed(output: OutputData) -> Self {
        Self {
            status: JobStatus::Completed,
            processed_data: Some(output),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Error,
            processed_data: None,
            message: Some(message.into()),
        }
    }
}
