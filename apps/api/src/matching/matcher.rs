//! Candidate–job scoring: skill overlap, semantic similarity and estimated experience
//! blended into one ranking value.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matching::requirements::extract_job_requirements;
use crate::matching::scoring::{experience_score, round3, skill_match_score, MatchWeights};
use crate::matching::semantic::{cosine_similarity, prepare_text, TextEmbedder};
use crate::models::resume::ResumeRecord;

/// Scores above this count towards `candidates_above_threshold` in rankings.
pub const GOOD_MATCH_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_match: f64,
    pub semantic_similarity: f64,
    pub experience_match: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub candidate_info: CandidateInfo,
}

/// Scores resumes against job descriptions.
///
/// Without an embedder the semantic component is always 0.0.
pub struct JobMatcher {
    embedder: Option<Arc<dyn TextEmbedder>>,
    weights: MatchWeights,
}

impl JobMatcher {
    pub fn new(embedder: Option<Arc<dyn TextEmbedder>>) -> Self {
        Self {
            embedder,
            weights: MatchWeights::default(),
        }
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    pub fn embedding_model(&self) -> Option<&str> {
        self.embedder.as_deref().map(|e| e.model_name())
    }

    /// Cosine similarity of the two texts' embeddings, clamped to [0, 1].
    /// Any embedding failure is logged and scores 0.0.
    pub fn semantic_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        let Some(embedder) = &self.embedder else {
            return 0.0;
        };

        let texts = vec![prepare_text(resume_text), prepare_text(job_text)];
        match embedder.embed(&texts) {
            Ok(vectors) if vectors.len() == 2 => {
                let similarity = cosine_similarity(&vectors[0], &vectors[1]);
                if similarity.is_finite() {
                    similarity.clamp(0.0, 1.0)
                } else {
                    0.0
                }
            }
            Ok(vectors) => {
                warn!(
                    returned = vectors.len(),
                    "Embedder returned the wrong number of vectors"
                );
                0.0
            }
            Err(e) => {
                warn!("Error calculating semantic similarity: {e}");
                0.0
            }
        }
    }

    pub fn match_resume(&self, resume: &ResumeRecord, job_description: &str) -> MatchResult {
        let job = extract_job_requirements(job_description);

        let skill_score = skill_match_score(&resume.skills, &job.required_skills);
        let experience = experience_score(&resume.experience, job.experience_years);
        let semantic = self.semantic_similarity(&resume.raw_text, &job.raw_text);

        let overall = self.weights.combine(skill_score, semantic, experience);

        MatchResult {
            overall_score: round3(overall),
            score_breakdown: ScoreBreakdown {
                skill_match: round3(skill_score),
                semantic_similarity: round3(semantic),
                experience_match: round3(experience),
            },
            matched_skills: resume
                .skills
                .intersection(&job.required_skills)
                .cloned()
                .collect(),
            missing_skills: job
                .required_skills
                .difference(&resume.skills)
                .cloned()
                .collect(),
            candidate_info: CandidateInfo {
                name: resume.display_name().to_string(),
                email: resume.email.clone(),
                phone: resume.phone.clone(),
                total_skills: resume.skills.len(),
            },
        }
    }
}

/// Highest score first. Equal scores keep their incoming order.
pub fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub best_match_score: f64,
    pub average_score: f64,
    pub candidates_above_threshold: usize,
}

impl RankingSummary {
    /// `returned` is the best-first slice handed back to the caller and sets
    /// `best_match_score` (0.0 when it is empty). The average and the threshold
    /// count cover every evaluated score.
    pub fn new(returned: &[f64], evaluated: &[f64]) -> Self {
        let average_score = if evaluated.is_empty() {
            0.0
        } else {
            evaluated.iter().sum::<f64>() / evaluated.len() as f64
        };

        Self {
            best_match_score: returned.first().copied().unwrap_or(0.0),
            average_score,
            candidates_above_threshold: evaluated
                .iter()
                .filter(|s| **s > GOOD_MATCH_THRESHOLD)
                .count(),
        }
    }
}
