use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::rate_limit::{record_rejection, record_submission, ANALYSIS_SEMAPHORE};
use crate::models::{AnalysisStatusResponse, AnalyzeAccepted, MediaType, ResumeDocument};

/// Accept a resume upload and queue its analysis. Returns `202 Accepted`
/// with the id to poll.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AnalyzeAccepted>)> {
    let request_id = Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting resume analysis request");

    record_submission();
    let permit = ANALYSIS_SEMAPHORE.try_acquire().map_err(|_| {
        record_rejection();
        warn!(request_id = %request_id, "Concurrent analysis limit reached");
        AppError::RateLimitExceeded
    })?;

    debug!(request_id = %request_id, "Analysis permit acquired");

    let upload = read_upload(&mut multipart).await.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Upload rejected");
        e
    })?;

    // Oversized uploads are refused here, before any extraction work.
    let limit = state.config.max_file_size_bytes();
    if upload.document.size > limit {
        warn!(
            request_id = %request_id,
            file_size = upload.document.size,
            limit = limit,
            "File size exceeds limit"
        );
        return Err(AppError::FileTooLarge {
            size: upload.document.size,
            limit,
        });
    }

    info!(
        request_id = %request_id,
        file_name = %upload.document.name,
        file_size = upload.document.size,
        media_type = ?upload.document.media_type,
        has_job_description = upload.job_description.is_some(),
        "Upload validated"
    );

    let id = state
        .orchestrator
        .submit(upload.document, upload.job_description, Some(permit))
        .await;

    Ok((StatusCode::ACCEPTED, Json(AnalyzeAccepted::new(id))))
}

/// Poll the state of an analysis; the result rides along once complete.
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AnalysisStatusResponse>> {
    match state.orchestrator.status(id).await {
        Some((analysis_state, result)) => {
            Ok(Json(AnalysisStatusResponse::new(id, analysis_state, result)))
        }
        None => Err(AppError::AnalysisNotFound { id }),
    }
}

/// Cancel an in-flight analysis or discard a finished one.
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.orchestrator.cancel(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::AnalysisNotFound { id })
    }
}

struct Upload {
    document: ResumeDocument,
    job_description: Option<String>,
}

async fn read_upload(multipart: &mut Multipart) -> AppResult<Upload> {
    let mut document: Option<ResumeDocument> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::extraction(format!("Failed to read multipart field: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::extraction(format!("Failed to read file data: {}", e))
                })?;
                if data.is_empty() {
                    return Err(AppError::MissingFile);
                }

                // The declared MIME type wins; fall back to the extension for
                // clients that send application/octet-stream.
                let media_type = content_type
                    .as_deref()
                    .and_then(MediaType::from_mime)
                    .or_else(|| MediaType::from_file_name(&file_name))
                    .ok_or_else(|| AppError::UnsupportedFormat {
                        media_type: content_type.unwrap_or_else(|| file_name.clone()),
                    })?;

                document = Some(ResumeDocument::new(file_name, media_type, data.to_vec()));
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::extraction(format!("Failed to read job description: {}", e))
                })?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    job_description = Some(trimmed.to_string());
                }
            }
            other => {
                debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    match document {
        Some(document) => Ok(Upload {
            document,
            job_description,
        }),
        None => Err(AppError::MissingFile),
    }
}
