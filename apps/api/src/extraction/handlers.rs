//! Axum route handlers for resume parsing.

use axum::{extract::Multipart, extract::State, Json};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::documents::is_supported_filename;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub status: &'static str,
    pub filename: String,
    pub parsed_data: ResumeRecord,
    pub timestamp: DateTime<Utc>,
}

/// A validated resume upload pulled out of a multipart body.
pub struct ResumeUpload {
    pub filename: String,
    pub content: Bytes,
}

/// Reads the `file` field and checks its extension against the supported types.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_supported_filename(&filename) {
            return Err(AppError::Validation(
                "Unsupported file type. Use PDF, DOCX, or TXT files.".to_string(),
            ));
        }

        let content = field.bytes().await?;
        return Ok(ResumeUpload { filename, content });
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// Parses on the blocking pool; PDF extraction is CPU-bound and may take a while.
pub async fn parse_upload(state: &AppState, upload: &ResumeUpload) -> Result<ResumeRecord, AppError> {
    let parser = state.parser.clone();
    let content = upload.content.clone();
    let filename = upload.filename.clone();

    tokio::task::spawn_blocking(move || parser.parse(&content, &filename))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Error parsing resume: {e}")))
}

/// POST /parse-resume
///
/// Parses an uploaded resume and returns the structured record. Nothing is stored.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_resume_upload(multipart).await?;
    let parsed_data = parse_upload(&state, &upload).await?;

    info!(
        filename = %upload.filename,
        skills = parsed_data.skills.len(),
        "Parsed resume"
    );

    Ok(Json(ParseResumeResponse {
        status: "success",
        filename: upload.filename,
        parsed_data,
        timestamp: Utc::now(),
    }))
}
