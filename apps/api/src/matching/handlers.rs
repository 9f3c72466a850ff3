//! Axum route handlers for job matching and candidate ranking.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::matcher::{
    sort_by_score_desc, CandidateInfo, JobMatcher, MatchResult, RankingSummary, ScoreBreakdown,
};
use crate::models::candidate::Candidate;
use crate::routes::form::FormFields;
use crate::state::AppState;

const NO_CANDIDATES: &str = "No candidates found. Upload resumes first.";

const DEFAULT_TOP_K: usize = 10;

#[derive(Debug)]
pub struct MatchJobForm {
    pub job_title: String,
    pub job_description: String,
    /// Empty or absent means "match every candidate".
    pub candidate_id: Option<usize>,
}

impl TryFrom<FormFields> for MatchJobForm {
    type Error = AppError;

    fn try_from(fields: FormFields) -> Result<Self, Self::Error> {
        Ok(Self {
            job_title: fields.required("job_title")?,
            job_description: fields.required("job_description")?,
            candidate_id: fields.optional_usize("candidate_id")?,
        })
    }
}

#[derive(Debug)]
pub struct RankCandidatesForm {
    pub job_title: String,
    pub job_description: String,
    pub top_k: usize,
}

impl TryFrom<FormFields> for RankCandidatesForm {
    type Error = AppError;

    fn try_from(fields: FormFields) -> Result<Self, Self::Error> {
        Ok(Self {
            job_title: fields.required("job_title")?,
            job_description: fields.required("job_description")?,
            top_k: fields.optional_usize("top_k")?.unwrap_or(DEFAULT_TOP_K),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateMatch {
    pub candidate: Candidate,
    pub match_result: MatchResult,
}

#[derive(Debug, Serialize)]
pub struct MatchOneResponse {
    pub status: &'static str,
    pub job_title: String,
    pub candidate: Candidate,
    pub match_result: MatchResult,
}

#[derive(Debug, Serialize)]
pub struct MatchAllResponse {
    pub status: &'static str,
    pub job_title: String,
    pub total_candidates: usize,
    pub matches: Vec<CandidateMatch>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MatchJobResponse {
    One(MatchOneResponse),
    All(MatchAllResponse),
}

#[derive(Debug, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: usize,
    pub candidate_name: String,
    pub filename: String,
    pub overall_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub candidate_info: CandidateInfo,
}

#[derive(Debug, Serialize)]
pub struct RankCandidatesResponse {
    pub status: &'static str,
    pub job_title: String,
    pub total_candidates_evaluated: usize,
    pub top_matches_returned: usize,
    pub top_candidates: Vec<RankedCandidate>,
    pub summary: RankingSummary,
}

/// Scores every candidate on the blocking pool, best first.
async fn match_all(
    matcher: Arc<JobMatcher>,
    candidates: Vec<Candidate>,
    job_description: String,
) -> Result<Vec<CandidateMatch>, AppError> {
    tokio::task::spawn_blocking(move || {
        let mut matches: Vec<CandidateMatch> = candidates
            .into_iter()
            .map(|candidate| {
                let match_result = matcher.match_resume(&candidate.data, &job_description);
                CandidateMatch {
                    candidate,
                    match_result,
                }
            })
            .collect();
        sort_by_score_desc(&mut matches, |m| m.match_result.overall_score);
        matches
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Error matching job: {e}")))
}

/// POST /match-job
///
/// With `candidate_id`, scores that one candidate. Without it, scores every stored
/// candidate and returns them best first.
pub async fn handle_match_job(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<MatchJobResponse>, AppError> {
    let form = MatchJobForm::try_from(fields)?;

    if let Some(candidate_id) = form.candidate_id {
        let candidate = state
            .candidates
            .get(candidate_id)
            .await
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

        let mut matches =
            match_all(state.matcher.clone(), vec![candidate], form.job_description).await?;
        let CandidateMatch {
            candidate,
            match_result,
        } = matches
            .pop()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Error matching job: no result")))?;

        return Ok(Json(MatchJobResponse::One(MatchOneResponse {
            status: "success",
            job_title: form.job_title,
            candidate,
            match_result,
        })));
    }

    let candidates = state.candidates.list().await;
    if candidates.is_empty() {
        return Err(AppError::Validation(NO_CANDIDATES.to_string()));
    }

    let matches = match_all(state.matcher.clone(), candidates, form.job_description).await?;
    info!(job_title = %form.job_title, candidates = matches.len(), "Matched job against all candidates");

    Ok(Json(MatchJobResponse::All(MatchAllResponse {
        status: "success",
        job_title: form.job_title,
        total_candidates: matches.len(),
        matches,
    })))
}

/// POST /rank-candidates
///
/// Returns the `top_k` best candidates plus summary statistics over all of them.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<RankCandidatesResponse>, AppError> {
    let form = RankCandidatesForm::try_from(fields)?;

    let candidates = state.candidates.list().await;
    if candidates.is_empty() {
        return Err(AppError::Validation(NO_CANDIDATES.to_string()));
    }

    let matches = match_all(state.matcher.clone(), candidates, form.job_description).await?;
    let scores: Vec<f64> = matches.iter().map(|m| m.match_result.overall_score).collect();
    let total_candidates_evaluated = matches.len();

    let top_candidates: Vec<RankedCandidate> = matches
        .into_iter()
        .take(form.top_k)
        .map(|m| RankedCandidate {
            candidate_id: m.candidate.id,
            candidate_name: m.candidate.data.display_name().to_string(),
            filename: m.candidate.filename,
            overall_score: m.match_result.overall_score,
            score_breakdown: m.match_result.score_breakdown,
            matched_skills: m.match_result.matched_skills,
            missing_skills: m.match_result.missing_skills,
            candidate_info: m.match_result.candidate_info,
        })
        .collect();

    let returned = top_candidates.len();
    let summary = RankingSummary::new(&scores[..returned], &scores);

    info!(
        job_title = %form.job_title,
        evaluated = total_candidates_evaluated,
        returned = top_candidates.len(),
        "Ranked candidates"
    );

    Ok(Json(RankCandidatesResponse {
        status: "success",
        job_title: form.job_title,
        total_candidates_evaluated,
        top_matches_returned: top_candidates.len(),
        top_candidates,
        summary,
    }))
}
