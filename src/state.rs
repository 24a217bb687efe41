use std::sync::Arc;

use crate::config::Config;
use crate::services::ResumeAnalyzer;

/// Shared application state injected into route handlers via axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: Arc<ResumeAnalyzer>,
}

impl AppState {
    pub fn new(config: Config, analyzer: ResumeAnalyzer) -> Self {
        Self {
            config,
            analyzer: Arc::new(analyzer),
        }
    }
}
