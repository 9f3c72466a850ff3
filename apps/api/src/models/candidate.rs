use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeRecord;

/// A stored, parsed resume. `id` is its current position in the store and is
/// reassigned whenever an earlier candidate is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: usize,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub data: ResumeRecord,
}

/// Row returned by `GET /candidates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: usize,
    pub filename: String,
    pub name: String,
    pub email: String,
    pub skills_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Candidate> for CandidateSummary {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            filename: candidate.filename.clone(),
            name: candidate.data.display_name().to_string(),
            email: candidate.data.email.clone(),
            skills_count: candidate.data.skills.len(),
            uploaded_at: candidate.uploaded_at,
        }
    }
}
