// Resume Critique
// Implements: text extraction, rubric prompt construction, and the analysis pipeline.
// All model calls go through llm_client::ModelClient.

pub mod extractor;
pub mod handlers;
pub mod orchestrator;
pub mod prompt;
pub mod prompts;
