use std::sync::Arc;

use crate::config::Config;
use crate::content::lexicon::Lexicon;
use crate::llm_client::TextCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-completion backend. `LlmClient` when an API key is configured,
    /// otherwise `OfflineCompletion`.
    pub completion: Arc<dyn TextCompletion>,
    pub lexicon: Arc<Lexicon>,
    pub config: Config,
}

impl AppState {
    pub fn new(completion: Arc<dyn TextCompletion>, config: Config) -> Self {
        Self {
            completion,
            lexicon: Arc::new(config.lexicon()),
            config,
        }
    }
}
