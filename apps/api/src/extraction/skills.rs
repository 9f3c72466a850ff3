//! Skill vocabularies shared by the extractor and the matcher.
//!
//! Detection is a plain lowercase substring test. Short terms therefore match inside
//! unrelated words ("go" in "going", "r" in almost anything, "ai" in "email"). That
//! behaviour is kept as-is; word-boundary matching would change which candidates match.

use std::collections::BTreeSet;

/// Terms looked for in resume text.
pub const RESUME_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "rust",
    "swift", "kotlin", "typescript", "r", "matlab", "scala", "perl",
    // Web technologies
    "html", "css", "react", "angular", "vue", "node.js", "express", "django",
    "flask", "spring", "bootstrap", "jquery", "sass", "webpack", "next.js",
    // Databases
    "mysql", "postgresql", "mongodb", "sqlite", "redis", "elasticsearch",
    "oracle", "sql server", "cassandra", "dynamodb", "sql",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git",
    "terraform", "ansible", "nginx", "apache", "linux",
    // AI/ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn",
    "pandas", "numpy", "opencv", "nlp", "computer vision", "ai", "ml",
    // Blockchain
    "blockchain", "solidity", "ethereum", "web3", "smart contracts", "defi",
    // Other
    "api", "rest", "graphql", "microservices", "agile", "scrum", "devops",
    "data analysis", "statistics", "hadoop", "spark", "kafka",
];

/// Narrower list looked for in job descriptions.
///
/// "data science" is the one term here that `RESUME_SKILLS` lacks, so it can show up
/// as missing but never as matched.
pub const JOB_SKILLS: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "rust",
    "react", "angular", "vue", "node.js", "django", "flask", "spring",
    "mysql", "postgresql", "mongodb", "redis", "aws", "azure", "docker",
    "kubernetes", "machine learning", "ai", "data science", "tensorflow",
    "pytorch", "blockchain", "solidity", "ethereum", "git", "agile", "scrum",
];

/// Returns every vocabulary term that occurs as a substring of `text` (case-insensitive).
pub fn find_skills(text: &str, vocabulary: &[&str]) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| text_lower.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}
