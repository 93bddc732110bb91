//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::FullRepository;
use crate::services::VisitTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for visit storage
    pub repository: Arc<dyn FullRepository>,
    /// Session tracking over `repository`
    pub visits: VisitTracker,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state with the given repository and config.
    pub fn new(repository: Arc<dyn FullRepository>, config: AppConfig) -> Self {
        Self {
            visits: VisitTracker::new(Arc::clone(&repository)),
            repository,
            config: Arc::new(config),
        }
    }
}
