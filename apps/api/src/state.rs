use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelInvoker;
use crate::resume::taxonomy::KeywordTaxonomy;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is immutable after startup, so concurrent
/// requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model transport. Production: `OllamaClient`; tests
    /// substitute a deterministic stub.
    pub llm: Arc<dyn ModelInvoker>,
    /// Job-title → keywords taxonomy, loaded once at startup.
    pub taxonomy: Arc<KeywordTaxonomy>,
    pub config: Config,
}
