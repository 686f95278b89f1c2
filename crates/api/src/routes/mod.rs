pub mod auth;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                      liveness (public)
///
/// /auth/register               register (public)
/// /auth/login                  login (public)
///
/// /users/profile               get, update own profile (requires auth)
/// /users/change-password       change password (requires auth)
/// /users/activity              recent audit entries (requires auth)
/// /users/{username}            public profile (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::api_health))
        .nest("/auth", auth::router())
        .nest("/users", users::router())
}
