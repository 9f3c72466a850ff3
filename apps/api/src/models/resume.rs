use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One employment line detected near an experience heading.
/// `period` and `description` both hold the trimmed source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
}

/// Structured fields pulled out of a single resume document.
///
/// Built once per parse call and never mutated afterwards. Empty strings mean
/// "not detected"; `skills` is always lowercase and drawn from the skill vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: BTreeSet<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// First 2000 characters of the extracted text, with `...` appended when cut.
    pub raw_text: String,
}

impl ResumeRecord {
    /// Name for display, `"Unknown"` when extraction found nothing.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown"
        } else {
            &self.name
        }
    }
}
