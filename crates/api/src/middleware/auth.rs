//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use agriconnect_db::models::user::SanitizedUser;
use agriconnect_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, Claims, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The user is resolved against the store on every request (with the
/// password hash excluded from the loaded projection), so a token for a
/// since-deleted account is rejected. No token refresh or sliding expiry
/// happens here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved user, hash excluded.
    pub user: SanitizedUser,
    /// The decoded token claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Access denied. No token provided."))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid token."))?;

        if token.is_empty() {
            return Err(AppError::unauthorized("Access denied. No token provided."));
        }

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            AppError::unauthorized(match e {
                TokenError::Expired => "Token expired. Please login again.",
                TokenError::Malformed => "Invalid token.",
                TokenError::NotYetValid => "Token not active yet",
            })
        })?;

        // Subject must be a plausible identifier before we hit the store.
        if claims.sub <= 0 {
            return Err(AppError::unauthorized("Invalid token payload"));
        }

        let user = UserRepo::find_sanitized_by_id(&state.pool, claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Auth middleware user lookup failed");
                AppError::AuthService
            })?
            .ok_or_else(|| AppError::unauthorized("User not found. Token may be invalid"))?;

        Ok(AuthUser { user, claims })
    }
}
