use std::sync::Arc;

use crate::background::activity::ActivityLogger;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agriconnect_db::DbPool,
    /// Server configuration (signing secret, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
    /// Handle to the background activity writer.
    pub activity: ActivityLogger,
}
