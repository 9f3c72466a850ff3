use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub resume_parser: &'static str,
    pub job_matcher: &'static str,
    pub entity_recognizer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
    pub embedding_model: Option<String>,
    pub candidates_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// GET /health
/// Reports which optional models are loaded. A missing embedder is an `error` because
/// scores lose their semantic component; a missing recognizer only degrades names.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        components: ComponentStatus {
            resume_parser: "ok",
            job_matcher: if state.matcher.has_embedder() { "ok" } else { "error" },
            entity_recognizer: if state.parser.has_entity_recognizer() {
                "ok"
            } else {
                "warning"
            },
        },
        embedding_model: state.matcher.embedding_model().map(str::to_string),
        candidates_count: state.candidates.count().await,
        timestamp: Utc::now(),
    })
}

/// GET /
/// Service name, version and endpoint map.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "AI Resume Screening API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "parse_resume": "/parse-resume",
            "match_job": "/match-job",
            "upload_resume": "/upload-resume",
            "rank_candidates": "/rank-candidates",
            "get_candidates": "/candidates",
            "health": "/health"
        }
    }))
}
