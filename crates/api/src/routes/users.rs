//! Route definitions for profile management.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// Protected routes enforce authentication via the [`AuthUser`] extractor in
/// their handlers; the public profile lookup is last so the static segments
/// are not shadowed by the `{username}` capture.
///
/// [`AuthUser`]: crate::middleware::auth::AuthUser
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/change-password", patch(users::change_password))
        .route("/activity", get(users::get_activity))
        .route("/{username}", get(users::get_public_profile))
}
