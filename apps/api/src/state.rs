use crate::config::Config;
use crate::critique::orchestrator::CritiqueOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline. Holds the model client and page source behind trait objects.
    pub critic: CritiqueOrchestrator,
    pub config: Config,
}
