//! Critique Orchestrator — drives one analysis end to end.
//!
//! Flow: document gate → extract (spawn_blocking) → empty-content gate →
//!       build prompt → one model call → return Markdown verbatim.
//!
//! Every failure is terminal for the request and nothing is retried. The model is never
//! called unless extraction produced non-blank text.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::critique::extractor::{extract_text, PageSource, UploadedDocument};
use crate::critique::prompt::build_critique_prompt;
use crate::errors::AppError;
use crate::llm_client::prompts::REVIEWER_SYSTEM;
use crate::llm_client::ModelClient;

/// Sampling parameters sent with every critique call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritiqueSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CritiqueSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

impl From<&Config> for CritiqueSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// The model's critique plus request metadata. `markdown` is passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct CritiqueResult {
    pub analysis_id: Uuid,
    pub markdown: String,
    pub job_context: String,
    pub page_count: Option<usize>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct CritiqueOrchestrator {
    model: Arc<dyn ModelClient>,
    pages: Arc<dyn PageSource>,
    settings: CritiqueSettings,
}

impl CritiqueOrchestrator {
    pub fn new(
        model: Arc<dyn ModelClient>,
        pages: Arc<dyn PageSource>,
        settings: CritiqueSettings,
    ) -> Self {
        Self {
            model,
            pages,
            settings,
        }
    }

    /// Runs one analysis.
    ///
    /// Returns `Ok(None)` without doing anything when no document was supplied.
    ///
    /// Errors:
    /// - `UnreadableDocument` — bytes do not decode as the declared type
    /// - `EmptyDocument` — extraction yielded only whitespace; the model is not called
    /// - `AnalysisFailed` — the model call failed for any reason
    pub async fn run_analysis(
        &self,
        document: Option<UploadedDocument>,
        job_role: &str,
    ) -> Result<Option<CritiqueResult>, AppError> {
        let Some(document) = document else {
            debug!("No document supplied; analysis stays idle");
            return Ok(None);
        };

        let analysis_id = Uuid::new_v4();
        let started = Instant::now();
        info!(
            %analysis_id,
            content_type = ?document.content_type,
            bytes = document.raw_bytes.len(),
            "Starting resume analysis"
        );

        // CPU-bound parse — spawn_blocking to avoid blocking the async executor.
        let pages = Arc::clone(&self.pages);
        let extracted = tokio::task::spawn_blocking(move || extract_text(&document, pages.as_ref()))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    AppError::UnreadableDocument(
                        "The document could not be parsed. Try re-exporting it or upload a TXT file instead."
                            .to_string(),
                    )
                } else {
                    AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
                }
            })??;

        if extracted.is_blank() {
            warn!(%analysis_id, "Extracted text is empty; skipping model call");
            return Err(AppError::EmptyDocument);
        }

        let chars = extracted.body.chars().count();
        let prompt = build_critique_prompt(&extracted.body, job_role);
        debug!(
            %analysis_id,
            chars,
            pages = ?extracted.page_count,
            prompt_bytes = prompt.as_str().len(),
            "Prompt built"
        );

        let markdown = self
            .model
            .send(
                REVIEWER_SYSTEM,
                prompt.as_str(),
                self.settings.max_tokens,
                self.settings.temperature,
            )
            .await
            .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;

        info!(
            %analysis_id,
            chars,
            pages = ?extracted.page_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Resume analysis complete"
        );

        Ok(Some(CritiqueResult {
            analysis_id,
            markdown,
            job_context: prompt.job_context().to_string(),
            page_count: extracted.page_count,
            generated_at: Utc::now(),
        }))
    }
}
