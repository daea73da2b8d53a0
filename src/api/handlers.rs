use super::protocol::*;
use crate::analysis::types::OutputData;
use crate::error::AnalysisError;
use crate::orchestrator::service::Analyzer;
use crate::orchestrator::types::{JobRecord, JobStatus, ProcessingRequest};

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub async fn handle_root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

pub async fn handle_process_text(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    Json(req): Json<ProcessingRequest>,
) -> Result<Json<OutputData>, AnalysisError> {
    analyzer.process_sync(&req).await.map(Json)
}

pub async fn handle_process_text_async(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    Json(req): Json<ProcessingRequest>,
) -> Result<(StatusCode, Json<AsyncProcessingResponse>), AnalysisError> {
    let task_id = analyzer.submit_async(req)?;

    Ok((
        StatusCode::OK,
        Json(AsyncProcessingResponse {
            task_id,
            message: "Text processing started".to_string(),
            status: JobStatus::Processing,
        }),
    ))
}

/// Always 200: a missing result reads as `processing`, failures as an error record.
pub async fn handle_get_result(
    Extension(analyzer): Extension<Arc<Analyzer>>,
    Path(task_id): Path<String>,
) -> (StatusCode, Json<JobRecord>) {
    let record = analyzer.get_result(&task_id).await;
    tracing::debug!("Task status query: {} -> {:?}", task_id, record.status);
    (StatusCode::OK, Json(record))
}
