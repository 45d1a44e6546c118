//! Axum route handlers for the Critique API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::critique::extractor::{ContentType, UploadedDocument};
use crate::critique::orchestrator::CritiqueResult;
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_ROLE_FIELD: &str = "job_role";
const RESULTS_TITLE: &str = "Analysis Results";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Parsed multipart form. `document` is `None` when no file was chosen.
#[derive(Debug, Default)]
pub struct CritiqueForm {
    pub document: Option<UploadedDocument>,
    pub job_role: String,
}

#[derive(Debug, Serialize)]
pub struct CritiqueResponse {
    pub analysis_id: Uuid,
    pub title: &'static str,
    /// Model output, Markdown, unmodified.
    pub critique: String,
    pub job_context: String,
    pub page_count: Option<usize>,
    pub generated_at: DateTime<Utc>,
}

impl From<CritiqueResult> for CritiqueResponse {
    fn from(result: CritiqueResult) -> Self {
        Self {
            analysis_id: result.analysis_id,
            title: RESULTS_TITLE,
            critique: result.markdown,
            job_context: result.job_context,
            page_count: result.page_count,
            generated_at: result.generated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/critique
///
/// Multipart form: `resume` (PDF or TXT file) and optional `job_role` (text).
/// Submitting the form is the "analyze" action.
pub async fn handle_critique(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CritiqueResponse>, AppError> {
    let form = read_form(&mut multipart).await?;

    let result = state
        .critic
        .run_analysis(form.document, &form.job_role)
        .await?
        .ok_or_else(|| AppError::Validation("Upload a resume (PDF or TXT) to analyze.".to_string()))?;

    Ok(Json(CritiqueResponse::from(result)))
}

async fn read_form(multipart: &mut Multipart) -> Result<CritiqueForm, AppError> {
    let mut form = CritiqueForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().map(str::to_string);
                let mime = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty, unnamed part when no file was picked.
                if bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty() {
                    continue;
                }

                let content_type =
                    ContentType::detect(mime.as_deref(), file_name.as_deref(), &bytes)?;
                form.document = Some(UploadedDocument::new(content_type, bytes));
            }
            Some(JOB_ROLE_FIELD) => {
                form.job_role = field.text().await.map_err(multipart_error)?;
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    }
}
