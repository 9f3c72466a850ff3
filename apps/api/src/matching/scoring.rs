use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::resume::ExperienceEntry;

/// Years of tenure credited per detected experience entry.
const YEARS_PER_ENTRY: f64 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub semantic: f64,
    pub experience: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            semantic: 0.4,
            experience: 0.2,
        }
    }
}

impl MatchWeights {
    /// Weighted sum: 0.4*skills + 0.4*semantic + 0.2*experience with the defaults.
    pub fn combine(&self, skills: f64, semantic: f64, experience: f64) -> f64 {
        self.skills * skills + self.semantic * semantic + self.experience * experience
    }
}

/// |resume ∩ job| / |job|, compared case-insensitively. 0.0 when the job lists no skills.
pub fn skill_match_score(resume_skills: &BTreeSet<String>, job_skills: &BTreeSet<String>) -> f64 {
    let job_lower: BTreeSet<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();
    if job_lower.is_empty() {
        return 0.0;
    }

    let resume_lower: BTreeSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let matched = resume_lower.intersection(&job_lower).count();

    (matched as f64 / job_lower.len() as f64).min(1.0)
}

/// Each experience entry counts as two years. 1.0 when no years are required.
pub fn experience_score(experience: &[ExperienceEntry], required_years: u32) -> f64 {
    if required_years == 0 {
        return 1.0;
    }

    let estimated_years = experience.len() as f64 * YEARS_PER_ENTRY;
    (estimated_years / required_years as f64).min(1.0)
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
