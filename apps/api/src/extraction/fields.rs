//! Regex and keyword heuristics that turn resume text into individual fields.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::skills::{find_skills, RESUME_SKILLS};
use crate::models::resume::{EducationEntry, ExperienceEntry};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("Failed to compile email regex")
});

/// Optional country code, optional parentheses around the area code, then 3-3-4 digits
/// with any of `-`, `.` or whitespace between groups.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})")
        .expect("Failed to compile phone regex")
});

static YEAR_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{4})\s*[-–]\s*(\d{4}|present|current)")
        .expect("Failed to compile year range regex")
});

const EXPERIENCE_TRIGGERS: &[&str] = &["experience", "work", "employment", "job", "position"];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "university",
    "college",
    "diploma",
];

/// Lines after a trigger line that are searched for a year range.
const EXPERIENCE_WINDOW: usize = 4;

/// Characters handed to the entity recognizer when looking for a name.
pub const NAME_SCAN_CHARS: usize = 500;

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn extract_email(text: &str) -> String {
    EMAIL_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone-like match with its capture groups concatenated, so separators between
/// the digit groups are dropped: `(555) 123-4567` becomes `5551234567`.
pub fn extract_phone(text: &str) -> String {
    PHONE_REGEX
        .captures(text)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Name fallback: first of the first three lines that is 6–49 characters long and
/// holds no `@`.
pub fn extract_name_heuristic(text: &str) -> String {
    text.split('\n')
        .take(3)
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 5 && len < 50 && !line.contains('@')
        })
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn extract_skills(text: &str) -> BTreeSet<String> {
    find_skills(text, RESUME_SKILLS)
}

/// Every line within [`EXPERIENCE_WINDOW`] lines after a trigger line that contains a
/// year range. Trigger lines close together scan overlapping windows, so the same line
/// can be reported more than once.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line_lower = line.to_lowercase();
        if !EXPERIENCE_TRIGGERS.iter().any(|k| line_lower.contains(k)) {
            continue;
        }

        let window_end = (i + 1 + EXPERIENCE_WINDOW).min(lines.len());
        for candidate in lines.iter().take(window_end).skip(i + 1) {
            if YEAR_RANGE_REGEX.is_match(candidate) {
                let trimmed = candidate.trim().to_string();
                entries.push(ExperienceEntry {
                    period: trimmed.clone(),
                    description: trimmed,
                });
            }
        }
    }

    entries
}

pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    text.split('\n')
        .filter(|line| {
            let line_lower = line.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|k| line_lower.contains(k))
        })
        .map(|line| EducationEntry {
            degree: line.trim().to_string(),
        })
        .collect()
}
