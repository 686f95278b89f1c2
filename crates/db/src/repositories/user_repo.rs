//! Repository for the `users` table.

use agriconnect_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, PublicUser, SanitizedUser, UpdateUserProfile, User};

/// Column list shared across full-row queries to avoid repetition.
const COLUMNS: &str = "id, name, username, display_name, email, password_hash, \
                       location, farm_type, created_at, updated_at";

/// Column list for the sanitized projection (no password hash loaded).
const SANITIZED_COLUMNS: &str = "id, name, username, display_name, email, \
                                 location, farm_type, created_at, updated_at";

/// Provides lookup and mutation operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// The unique indexes on `email` and `username` are the last line of
    /// defence against races; callers pre-check with [`Self::find_conflict`]
    /// and must still tolerate a duplicate-key error here.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, username, display_name, email, password_hash, location, farm_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.location)
            .bind(&input.farm_type)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID, including the password hash.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by internal ID with the password hash excluded from the
    /// loaded projection. Used by the auth extractor.
    pub async fn find_sanitized_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SanitizedUser>, sqlx::Error> {
        let query = format!("SELECT {SANITIZED_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, SanitizedUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user whose email OR username matches the given identifier.
    ///
    /// Callers lowercase the identifier first; stored values are always
    /// lowercase, so this is effectively a case-insensitive lookup.
    pub async fn find_by_email_or_username(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1 OR username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// Single combined uniqueness pre-check for registration: returns an
    /// existing user colliding on email or username, if any.
    pub async fn find_conflict(
        pool: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1 OR username = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Public profile lookup by (lowercased) username.
    pub async fn find_public_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT username, display_name, location, farm_type, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// True if another user (different id) already holds this email.
    pub async fn exists_by_email_excluding(
        pool: &PgPool,
        email: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1 AND id <> $2")
                .bind(email)
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    /// Apply a partial profile update. Only non-`None` fields in `input` are
    /// changed. Returns the updated sanitized row, or `None` if no row with
    /// the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<Option<SanitizedUser>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                display_name = COALESCE($3, display_name),
                email = COALESCE($4, email),
                location = COALESCE($5, location),
                farm_type = COALESCE($6, farm_type),
                updated_at = now()
             WHERE id = $1
             RETURNING {SANITIZED_COLUMNS}"
        );
        sqlx::query_as::<_, SanitizedUser>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.location)
            .bind(&input.farm_type)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored password hash. Returns `true` if a row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
