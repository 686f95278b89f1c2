//! Repository for the `activity_logs` table.
//!
//! Insert and user-scoped read only -- entries are never updated or deleted.

use agriconnect_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

/// Column list shared across queries.
const COLUMNS: &str = "id, user_id, action, changes, timestamp";

/// Default cap for recent-activity queries.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;

/// Provides append and query operations for activity logs.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append a new entry, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, changes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.changes)
            .fetch_one(pool)
            .await
    }

    /// Recent entries for one user, newest first, capped at `limit`.
    pub async fn recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE user_id = $1
             ORDER BY timestamp DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
