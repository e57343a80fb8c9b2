use std::sync::Arc;

use crate::config::Config;
use crate::screening::orchestrator::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup on the shared reasoning capability.
    pub screener: Arc<Screener>,
    pub config: Config,
}
