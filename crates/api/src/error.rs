use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use agriconnect_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{"message": ...}`
/// JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `agriconnect_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A fault inside the auth middleware itself (e.g. the user lookup
    /// failed). Details are logged at the point of failure, never leaked.
    #[error("Authentication service error")]
    AuthService,

    /// An internal error with a detail message. The detail is logged
    /// server-side only; callers see a generic 500 body.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a 400 validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Validation(msg.into()))
    }

    /// Shorthand for a 401 auth error.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Unauthorized(msg.into()))
    }

    /// Shorthand for a 400 uniqueness conflict.
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Conflict(msg.into()))
    }

    /// Shorthand for a 404.
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::NotFound(msg.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                // Uniqueness conflicts map to 400 per the API contract.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }

            AppError::AuthService => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service error".to_string(),
            ),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "message": message });

        (status, axum::Json(body)).into_response()
    }
}

/// If `err` is a Postgres unique-constraint violation on one of the `users`
/// indexes, return the colliding field name (`"email"` or `"username"`).
///
/// Handlers use this as the fallback consistency net when a pre-checked
/// insert or update still races into a duplicate key.
pub fn duplicate_key_field(err: &sqlx::Error) -> Option<&'static str> {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL unique constraint violation: error code 23505.
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("uq_users_email") => Some("email"),
                Some("uq_users_username") => Some("username"),
                _ => None,
            };
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, body)
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_message() {
        let (status, body) = response_parts(AppError::validation("Name cannot be empty")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Name cannot be empty");
    }

    #[tokio::test]
    async fn test_conflict_maps_to_400() {
        let (status, body) = response_parts(AppError::conflict("Email already registered")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_401() {
        let (status, body) = response_parts(AppError::unauthorized("Invalid credentials")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = response_parts(AppError::not_found("User not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let (status, body) =
            response_parts(AppError::Internal("secret pool diagnostics".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_auth_service_error_body() {
        let (status, body) = response_parts(AppError::AuthService).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Authentication service error");
    }
}
