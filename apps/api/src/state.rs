use std::sync::Arc;

use crate::candidates::repository::CandidateRepository;
use crate::config::Config;
use crate::extraction::parser::ResumeParser;
use crate::matching::matcher::JobMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Resume extractor. Holds the PDF/DOCX extractors and the optional entity recognizer.
    pub parser: Arc<ResumeParser>,
    /// Job matcher. Holds the optional embedding model.
    pub matcher: Arc<JobMatcher>,
    /// Pluggable candidate store. Default: InMemoryCandidateRepository.
    pub candidates: Arc<dyn CandidateRepository>,
}
