pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        // Extraction
        .route("/parse-resume", post(extraction::handle_parse_resume))
        .route("/upload-resume", post(candidates::handle_upload_resume))
        // Matching
        .route("/match-job", post(matching::handle_match_job))
        .route("/rank-candidates", post(matching::handle_rank_candidates))
        // Candidate store
        .route(
            "/candidates",
            get(candidates::handle_list_candidates).delete(candidates::handle_clear_candidates),
        )
        .route("/candidates/:id", delete(candidates::handle_delete_candidate))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::candidates::repository::InMemoryCandidateRepository;
    use crate::config::Config;
    use crate::extraction::parser::ResumeParser;
    use crate::matching::matcher::JobMatcher;

    const BOUNDARY: &str = "X-SCREENING-BOUNDARY";

    fn test_app() -> Router {
        build_router(AppState {
            config: Config::default(),
            parser: Arc::new(ResumeParser::default()),
            matcher: Arc::new(JobMatcher::new(None)),
            candidates: Arc::new(InMemoryCandidateRepository::new()),
        })
    }

    fn multipart_request(uri: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_fields_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn upload(app: &Router, filename: &str, content: &str) -> Value {
        let (status, body) = send(app, multipart_request("/upload-resume", filename, content)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    #[tokio::test]
    async fn test_health_reports_missing_models() {
        let app = test_app();
        let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["components"]["resume_parser"], "ok");
        assert_eq!(body["components"]["job_matcher"], "error");
        assert_eq!(body["components"]["entity_recognizer"], "warning");
        assert_eq!(body["candidates_count"], 0);
    }

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let app = test_app();
        let (status, body) = send(&app, empty_request(Method::GET, "/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["rank_candidates"], "/rank-candidates");
    }

    #[tokio::test]
    async fn test_parse_resume_does_not_store() {
        let app = test_app();
        let (status, body) = send(
            &app,
            multipart_request(
                "/parse-resume",
                "resume.txt",
                "Jane Doe\njane@example.com\nPython, React, AWS",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["filename"], "resume.txt");
        assert_eq!(body["parsed_data"]["name"], "Jane Doe");
        assert_eq!(body["parsed_data"]["email"], "jane@example.com");

        let (_, list) = send(&app, empty_request(Method::GET, "/candidates")).await;
        assert_eq!(list["total_candidates"], 0);
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let app = test_app();
        for uri in ["/parse-resume", "/upload-resume"] {
            let (status, body) = send(&app, multipart_request(uri, "photo.png", "xx")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_upload_list_delete_reindexes() {
        let app = test_app();
        let first = upload(&app, "a.txt", "Alice Anders\nPython developer").await;
        let second = upload(&app, "b.txt", "Bobby Brown\nJava developer").await;
        assert_eq!(first["candidate_id"], 0);
        assert_eq!(second["candidate_id"], 1);
        assert_eq!(second["total_candidates"], 2);
        assert_eq!(second["candidate_name"], "Bobby Brown");

        let (status, deleted) = send(&app, empty_request(Method::DELETE, "/candidates/0")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["remaining_candidates"], 1);
        assert_eq!(
            deleted["message"],
            "Candidate 'Alice Anders' deleted successfully"
        );

        let (_, list) = send(&app, empty_request(Method::GET, "/candidates")).await;
        assert_eq!(list["total_candidates"], 1);
        assert_eq!(list["candidates"][0]["id"], 0);
        assert_eq!(list["candidates"][0]["name"], "Bobby Brown");
        assert_eq!(list["candidates"][0]["filename"], "b.txt");
    }

    #[tokio::test]
    async fn test_delete_unknown_candidate_is_404() {
        let app = test_app();
        let (status, _) = send(&app, empty_request(Method::DELETE, "/candidates/3")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_candidates() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders").await;
        upload(&app, "b.txt", "Bobby Brown").await;

        let (status, body) = send(&app, empty_request(Method::DELETE, "/candidates")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "All 2 candidates cleared from database");

        let (_, health) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(health["candidates_count"], 0);
    }

    #[tokio::test]
    async fn test_match_job_without_candidates_is_400() {
        let app = test_app();
        let (status, body) = send(
            &app,
            form_request("/match-job", "job_title=Dev&job_description=python"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "No candidates found. Upload resumes first."
        );
    }

    #[tokio::test]
    async fn test_match_job_unknown_candidate_is_404() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders").await;
        let (status, _) = send(
            &app,
            form_request(
                "/match-job",
                "job_title=Dev&job_description=python&candidate_id=5",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_match_job_single_candidate() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders\nPython, React, AWS").await;

        let (status, body) = send(
            &app,
            form_request(
                "/match-job",
                "job_title=Dev&job_description=Looking+for+Python+and+Docker+developer%2C+3+years+experience&candidate_id=0",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate"]["id"], 0);
        assert_eq!(body["match_result"]["matched_skills"], serde_json::json!(["python"]));
        assert_eq!(body["match_result"]["missing_skills"], serde_json::json!(["docker"]));
        assert_eq!(body["match_result"]["overall_score"], 0.2);
    }

    #[tokio::test]
    async fn test_match_job_all_sorted_best_first() {
        let app = test_app();
        upload(&app, "b.txt", "Bobby Brown\nJava developer").await;
        upload(&app, "a.txt", "Alice Anders\nPython developer\nDocker").await;

        let (status, body) = send(
            &app,
            form_request("/match-job", "job_title=Dev&job_description=python+docker"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_candidates"], 2);
        assert_eq!(body["matches"][0]["candidate"]["id"], 1);
        assert_eq!(body["matches"][0]["match_result"]["overall_score"], 0.6);
        assert_eq!(body["matches"][1]["candidate"]["id"], 0);
        assert_eq!(body["matches"][1]["match_result"]["overall_score"], 0.2);
    }

    #[tokio::test]
    async fn test_rank_candidates_top_k_and_summary() {
        let app = test_app();
        upload(&app, "b.txt", "Bobby Brown\nJava developer").await;
        upload(&app, "a.txt", "Alice Anders\nPython developer\nDocker").await;

        let (status, body) = send(
            &app,
            form_request(
                "/rank-candidates",
                "job_title=Dev&job_description=python+docker&top_k=1",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_candidates_evaluated"], 2);
        assert_eq!(body["top_matches_returned"], 1);
        assert_eq!(body["top_candidates"][0]["candidate_name"], "Alice Anders");
        assert_eq!(body["top_candidates"][0]["filename"], "a.txt");
        assert_eq!(body["summary"]["best_match_score"], 0.6);
        assert_eq!(body["summary"]["candidates_above_threshold"], 1);
        let average = body["summary"]["average_score"].as_f64().unwrap();
        assert!((average - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_rank_candidates_default_top_k() {
        let app = test_app();
        for i in 0..12 {
            upload(&app, &format!("cv{i}.txt"), "Someone Here\nRust").await;
        }
        let (_, body) = send(
            &app,
            form_request("/rank-candidates", "job_title=Dev&job_description=rust"),
        )
        .await;
        assert_eq!(body["total_candidates_evaluated"], 12);
        assert_eq!(body["top_matches_returned"], 10);
    }

    #[tokio::test]
    async fn test_match_and_rank_accept_multipart_fields() {
        let app = test_app();
        upload(&app, "b.txt", "Bobby Brown\nJava developer").await;
        upload(&app, "a.txt", "Alice Anders\nPython developer\nDocker").await;

        let (status, body) = send(
            &app,
            multipart_fields_request(
                "/match-job",
                &[
                    ("job_title", "Dev"),
                    ("job_description", "python docker"),
                    ("candidate_id", "1"),
                ],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["candidate"]["id"], 1);
        assert_eq!(body["match_result"]["overall_score"], 0.6);

        let (status, body) = send(
            &app,
            multipart_fields_request(
                "/rank-candidates",
                &[
                    ("job_title", "Dev"),
                    ("job_description", "python docker"),
                    ("top_k", "1"),
                ],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["top_matches_returned"], 1);
        assert_eq!(body["top_candidates"][0]["candidate_name"], "Alice Anders");
    }

    #[tokio::test]
    async fn test_missing_form_field_is_json_400() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders").await;

        for request in [
            form_request("/match-job", "job_title=Dev"),
            form_request("/rank-candidates", "job_title=Dev"),
            multipart_fields_request("/match-job", &[("job_title", "Dev")]),
        ] {
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(
                body["error"]["message"],
                "Missing form field 'job_description'"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_candidate_id_matches_everyone() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders\nPython").await;
        upload(&app, "b.txt", "Bobby Brown\nJava").await;

        let (status, body) = send(
            &app,
            form_request(
                "/match-job",
                "job_title=Dev&job_description=python&candidate_id=",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["total_candidates"], 2);
    }

    #[tokio::test]
    async fn test_non_numeric_form_and_path_ids_are_400() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders").await;

        let (status, body) = send(
            &app,
            form_request(
                "/match-job",
                "job_title=Dev&job_description=python&candidate_id=abc",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(&app, empty_request(Method::DELETE, "/candidates/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rank_top_k_zero_reports_no_best_score() {
        let app = test_app();
        upload(&app, "a.txt", "Alice Anders\nPython developer\nDocker").await;

        let (status, body) = send(
            &app,
            form_request(
                "/rank-candidates",
                "job_title=Dev&job_description=python+docker&top_k=0",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_candidates_evaluated"], 1);
        assert_eq!(body["top_matches_returned"], 0);
        assert_eq!(body["summary"]["best_match_score"], 0.0);
        assert_eq!(body["summary"]["candidates_above_threshold"], 1);
    }
}
