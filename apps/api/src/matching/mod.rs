// Matcher: (ResumeRecord, job description) → MatchResult.
// The embedding model is injected; everything else here is deterministic.

pub mod handlers;
pub mod matcher;
pub mod requirements;
pub mod scoring;
pub mod semantic;
