use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to every handler through Axum's `State` extractor.
///
/// Cloning is cheap: the pool is internally reference-counted and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: intake_db::DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: intake_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
