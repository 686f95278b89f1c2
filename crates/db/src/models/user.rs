//! User entity model and DTOs.

use agriconnect_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`SanitizedUser`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub location: Option<String>,
    pub farm_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user projection for API responses (no password hash field exists,
/// so it can never leak through serialization).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub location: Option<String>,
    pub farm_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for SanitizedUser {
    fn from(user: User) -> Self {
        SanitizedUser {
            id: user.id,
            name: user.name,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            location: user.location,
            farm_type: user.farm_type,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Reduced projection for unauthenticated profile lookups: no id, no email.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub username: String,
    pub display_name: String,
    pub location: Option<String>,
    pub farm_type: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user. The password is already hashed by the
/// caller; username and email are already lowercased.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub location: Option<String>,
    pub farm_type: String,
}

/// DTO for a partial profile update. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub farm_type: Option<String>,
}
