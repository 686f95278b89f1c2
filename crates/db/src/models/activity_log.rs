//! Activity log entity model and DTOs.
//!
//! Activity logs are append-only: no update or delete statements exist for
//! them anywhere in this workspace.

use agriconnect_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single activity log entry. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub changes: serde_json::Value,
    pub timestamp: Timestamp,
}

/// DTO for appending a new activity log entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub user_id: DbId,
    pub action: String,
    pub changes: serde_json::Value,
}
