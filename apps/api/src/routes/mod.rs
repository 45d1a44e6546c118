pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::critique::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Critique API
        .route("/api/v1/critique", post(handlers::handle_critique))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::critique::extractor::PdfExtractPages;
    use crate::critique::orchestrator::{CritiqueOrchestrator, CritiqueSettings};
    use crate::llm_client::stub::StubModel;

    const BOUNDARY: &str = "critiquer-test-boundary";

    enum Part<'a> {
        File {
            name: &'a str,
            file_name: &'a str,
            mime: Option<&'a str>,
            bytes: &'a [u8],
        },
        Text {
            name: &'a str,
            value: &'a str,
        },
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                        )
                        .as_bytes(),
                    );
                    if let Some(mime) = mime {
                        body.extend_from_slice(format!("Content-Type: {mime}\r\n").as_bytes());
                    }
                    body.extend_from_slice(b"\r\n");
                    body.extend_from_slice(bytes);
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn test_state(model: Arc<StubModel>, max_upload_bytes: usize) -> AppState {
        let mut config = Config::from_lookup(|key| {
            (key == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap();
        config.max_upload_bytes = max_upload_bytes;

        AppState {
            critic: CritiqueOrchestrator::new(
                model,
                Arc::new(PdfExtractPages),
                CritiqueSettings::from(&config),
            ),
            config,
        }
    }

    async fn post_critique(state: AppState, parts: &[Part<'_>]) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/critique")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        build_router(state).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn txt_resume(bytes: &[u8]) -> Part<'_> {
        Part::File {
            name: "resume",
            file_name: "resume.txt",
            mime: Some("text/plain"),
            bytes,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(Arc::new(StubModel::replying("unused")), 1024);
        let response = build_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "critiquer");
    }

    #[tokio::test]
    async fn test_text_resume_is_critiqued() {
        let model = Arc::new(StubModel::replying("### **Overall Score: 81**"));
        let state = test_state(model.clone(), 1024 * 1024);

        let response = post_critique(
            state,
            &[
                txt_resume(b"Jane Doe\nBuilt Spark pipelines\n"),
                Part::Text {
                    name: "job_role",
                    value: "Data Engineer",
                },
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], "Analysis Results");
        assert_eq!(body["critique"], "### **Overall Score: 81**");
        assert_eq!(body["job_context"], "Data Engineer");
        assert!(body["page_count"].is_null());
        assert!(body["analysis_id"].is_string());
        assert_eq!(model.call_count(), 1);
        assert!(model
            .last_call()
            .unwrap()
            .user_prompt
            .contains("Jane Doe\nBuilt Spark pipelines\n"));
    }

    #[tokio::test]
    async fn test_missing_job_role_uses_fallback() {
        let model = Arc::new(StubModel::replying("ok"));
        let response = post_critique(test_state(model, 1024 * 1024), &[txt_resume(b"Jane Doe")]).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["job_context"],
            "a general professional role based on the resume's content"
        );
    }

    #[tokio::test]
    async fn test_whitespace_resume_rejected_without_model_call() {
        let model = Arc::new(StubModel::replying("unused"));
        let response =
            post_critique(test_state(model.clone(), 1024 * 1024), &[txt_resume(b" \n\t\n ")]).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_DOCUMENT");
        assert_eq!(body["error"]["message"], "File does not have any content.");
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_resume_part_leaves_pipeline_idle() {
        let model = Arc::new(StubModel::replying("unused"));
        let response = post_critique(
            test_state(model.clone(), 1024 * 1024),
            &[
                Part::File {
                    name: "resume",
                    file_name: "",
                    mime: Some("application/octet-stream"),
                    bytes: b"",
                },
                Part::Text {
                    name: "job_role",
                    value: "Data Engineer",
                },
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_unreadable() {
        let model = Arc::new(StubModel::replying("unused"));
        let response =
            post_critique(test_state(model.clone(), 1024 * 1024), &[txt_resume(&[0x66, 0xff, 0x6f])]).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNREADABLE_DOCUMENT");
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_type_rejected() {
        let model = Arc::new(StubModel::replying("unused"));
        let response = post_critique(
            test_state(model.clone(), 1024 * 1024),
            &[Part::File {
                name: "resume",
                file_name: "resume.docx",
                mime: Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
                bytes: b"PK\x03\x04",
            }],
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_cause() {
        let model = Arc::new(StubModel::failing(401, "Incorrect API key provided"));
        let response = post_critique(test_state(model.clone(), 1024 * 1024), &[txt_resume(b"Jane Doe")]).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Incorrect API key provided"));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected() {
        let model = Arc::new(StubModel::replying("unused"));
        let big = vec![b'a'; 4096];
        let response = post_critique(test_state(model.clone(), 256), &[txt_resume(&big)]).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(model.call_count(), 0);
    }
}
