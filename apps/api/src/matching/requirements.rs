//! Job description → required skills and years of experience.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extraction::skills::{find_skills, JOB_SKILLS};

/// Tried in order; the first pattern that matches supplies the year count.
static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"([0-9]+)\+?\s*years?\s*(?:of\s+)?experience",
        r"([0-9]+)\+?\s*years?\s*(?:of\s+)?exp",
        r"minimum\s*([0-9]+)\s*years?",
        r"at least\s*([0-9]+)\s*years?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Failed to compile experience pattern"))
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: BTreeSet<String>,
    /// 0 when the description states no requirement.
    pub experience_years: u32,
    pub raw_text: String,
}

pub fn extract_job_requirements(description: &str) -> JobRequirements {
    let description_lower = description.to_lowercase();

    JobRequirements {
        required_skills: find_skills(&description_lower, JOB_SKILLS),
        experience_years: required_years(&description_lower),
        raw_text: description.to_string(),
    }
}

fn required_years(description_lower: &str) -> u32 {
    EXPERIENCE_PATTERNS
        .iter()
        .find_map(|pattern| {
            pattern
                .captures(description_lower)
                .and_then(|caps| caps.get(1))
                // ASCII digits only, so the parse can fail only on overflow.
                .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        })
        .unwrap_or(0)
}
