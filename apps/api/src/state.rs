use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The store backend behind the capability trait; picked at startup.
    pub store: Arc<dyn Store>,
    pub llm: LlmClient,
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}
