use std::sync::Arc;

use crate::config::Config;
use crate::interview::store::InterviewStore;
use crate::llm_client::GenerationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Default: PgInterviewStore.
    pub store: Arc<dyn InterviewStore>,
    pub llm: GenerationClient,
    pub config: Config,
}
