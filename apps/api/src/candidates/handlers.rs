//! Axum route handlers for candidate storage.

use axum::{
    extract::{rejection::PathRejection, Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::handlers::{parse_upload, read_resume_upload};
use crate::models::candidate::CandidateSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub status: &'static str,
    pub message: String,
    pub candidate_id: usize,
    pub candidate_name: String,
    pub skills_found: usize,
    pub total_candidates: usize,
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub status: &'static str,
    pub total_candidates: usize,
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Debug, Serialize)]
pub struct DeleteCandidateResponse {
    pub status: &'static str,
    pub message: String,
    pub remaining_candidates: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearCandidatesResponse {
    pub status: &'static str,
    pub message: String,
}

/// POST /upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let upload = read_resume_upload(multipart).await?;
    let data = parse_upload(&state, &upload).await?;

    let candidate_name = data.display_name().to_string();
    let skills_found = data.skills.len();
    let (candidate, total_candidates) = state.candidates.add(upload.filename, data).await;

    info!(
        candidate_id = candidate.id,
        filename = %candidate.filename,
        "Stored candidate"
    );

    Ok(Json(UploadResumeResponse {
        status: "success",
        message: "Resume uploaded and parsed successfully".to_string(),
        candidate_id: candidate.id,
        candidate_name,
        skills_found,
        total_candidates,
    }))
}

/// GET /candidates
pub async fn handle_list_candidates(State(state): State<AppState>) -> Json<CandidateListResponse> {
    let candidates: Vec<CandidateSummary> = state
        .candidates
        .list()
        .await
        .iter()
        .map(CandidateSummary::from)
        .collect();

    Json(CandidateListResponse {
        status: "success",
        total_candidates: candidates.len(),
        candidates,
    })
}

/// DELETE /candidates/:id
///
/// Remaining candidates are renumbered so ids stay contiguous from 0.
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
) -> Result<Json<DeleteCandidateResponse>, AppError> {
    let Path(id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let (deleted, remaining_candidates) = state
        .candidates
        .delete(id)
        .await
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    info!(candidate_id = id, remaining_candidates, "Deleted candidate");

    Ok(Json(DeleteCandidateResponse {
        status: "success",
        message: format!(
            "Candidate '{}' deleted successfully",
            deleted.data.display_name()
        ),
        remaining_candidates,
    }))
}

/// DELETE /candidates
pub async fn handle_clear_candidates(State(state): State<AppState>) -> Json<ClearCandidatesResponse> {
    let count = state.candidates.clear().await;
    info!(count, "Cleared all candidates");

    Json(ClearCandidatesResponse {
        status: "success",
        message: format!("All {count} candidates cleared from database"),
    })
}
