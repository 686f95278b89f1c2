//! Handlers for the `/api/users` resource (profile, public profile,
//! password change, recent activity).

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use agriconnect_core::activity::{diff_profile_changes, ActivityAction, ProfilePatch, ProfileSnapshot};
use agriconnect_core::farm::FarmType;
use agriconnect_core::validation::{self, MIN_PASSWORD_LEN};
use agriconnect_db::models::activity_log::ActivityLog;
use agriconnect_db::models::user::{PublicUser, SanitizedUser, UpdateUserProfile};
use agriconnect_db::repositories::activity_log_repo::DEFAULT_ACTIVITY_LIMIT;
use agriconnect_db::repositories::UserRepo;

use crate::auth::password::{hash_password, verify_password};
use crate::background::activity::recent_activity;
use crate::error::{duplicate_key_field, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /api/users/profile`. Only fields present in the
/// request are changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub farm_type: Option<String>,
}

/// Request body for `PATCH /api/users/change-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Response carrying the caller's own sanitized view.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub user: SanitizedUser,
}

/// Response for unauthenticated public profile lookups.
#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub message: &'static str,
    pub user: PublicUser,
}

/// Bare success message (password change).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Recent audit entries for the caller.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub activity: Vec<ActivityLog>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A patch may omit the email but cannot blank it; the record requires one.
/// Expects the trimmed value.
fn validate_patch_email(email: Option<&str>) -> Result<(), &'static str> {
    if email == Some("") {
        return Err("Email cannot be empty");
    }
    Ok(())
}

/// Checks on a password change that need no stored state; first violation
/// wins. Returns the two passwords on success.
fn validate_password_change(
    current_password: &Option<String>,
    new_password: &Option<String>,
) -> Result<(String, String), &'static str> {
    let (Some(current), Some(new)) = (
        current_password.clone().filter(|p| !p.is_empty()),
        new_password.clone().filter(|p| !p.is_empty()),
    ) else {
        return Err("Current password and new password are required");
    };

    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err("New password must be at least 6 characters long");
    }

    if current == new {
        return Err("New password must be different from current password");
    }

    Ok((current, new))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users/profile
///
/// Return the caller's own sanitized view; a pure read.
pub async fn get_profile(auth: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile accessed successfully",
        user: auth.user,
    })
}

/// GET /api/users/{username}
///
/// Unauthenticated, reduced projection: no identifier, no email.
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<PublicProfileResponse>> {
    let user = UserRepo::find_public_by_username(&state.pool, &username.to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(PublicProfileResponse {
        message: "User profile retrieved successfully",
        user,
    }))
}

/// PATCH /api/users/profile
///
/// Partial update of the caller's profile. Fields are validated in a fixed
/// order and the first violation wins.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let name = input.name.as_deref().map(|s| s.trim().to_string());
    let display_name = input.display_name.as_deref().map(|s| s.trim().to_string());
    let email = input
        .email
        .as_deref()
        .map(|s| s.trim().to_lowercase());
    let location = input.location.as_deref().map(|s| s.trim().to_string());
    let farm_type = input.farm_type.clone();

    validation::validate_profile_patch(
        name.as_deref(),
        display_name.as_deref(),
        farm_type.as_deref(),
        location.as_deref(),
    )
    .map_err(AppError::validation)?;

    validate_patch_email(email.as_deref()).map_err(AppError::validation)?;

    // Changing email must not collide with anyone but the caller.
    if let Some(email) = &email {
        if UserRepo::exists_by_email_excluding(&state.pool, email, auth.user.id).await? {
            return Err(AppError::conflict("Email already in use"));
        }
    }

    let update = UpdateUserProfile {
        name: name.clone(),
        display_name: display_name.clone(),
        email: email.clone(),
        location: location.clone(),
        farm_type: farm_type.clone(),
    };

    // A duplicate-key race on the unique email index maps to the same 400
    // as the pre-check.
    let updated = UserRepo::update_profile(&state.pool, auth.user.id, &update)
        .await
        .map_err(|e| {
            if duplicate_key_field(&e).is_some() {
                AppError::conflict("Email already in use")
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    // One consolidated audit entry carrying the field-level diff.
    let old = ProfileSnapshot {
        name: auth.user.name.clone(),
        display_name: auth.user.display_name.clone(),
        email: auth.user.email.clone(),
        location: auth.user.location.clone(),
        farm_type: FarmType::parse(&auth.user.farm_type).unwrap_or_default(),
    };
    let patch = ProfilePatch {
        name,
        display_name,
        email,
        location,
        farm_type: farm_type.as_deref().and_then(FarmType::parse),
    };
    let changes = diff_profile_changes(&old, &patch);
    if !changes.is_empty() {
        state.activity.record(
            auth.user.id,
            ActivityAction::ProfileUpdate,
            serde_json::Value::Object(changes),
        );
    }

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully",
        user: updated,
    }))
}

/// PATCH /api/users/change-password
///
/// Verifies the current password before replacing the stored hash. Never
/// returns (or logs) any password material.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (current_password, new_password) =
        validate_password_change(&input.current_password, &input.new_password)
            .map_err(AppError::validation)?;

    // The extractor loads the sanitized projection; the hash needs the full
    // row.
    let user = UserRepo::find_by_id(&state.pool, auth.user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let current_valid = verify_password(&current_password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !current_valid {
        return Err(AppError::validation("Current password is incorrect"));
    }

    let new_hash = hash_password(&new_password)
        .map_err(|e| AppError::Internal(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, user.id, &new_hash).await?;
    if !updated {
        return Err(AppError::not_found("User not found"));
    }

    // Only the fact of the change is recorded, never any password content.
    state
        .activity
        .record(user.id, ActivityAction::PasswordUpdate, json!({}));

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse {
        message: "Password changed successfully",
    }))
}

/// GET /api/users/activity
///
/// Recent audit entries for the caller, newest first. Fail-soft: lookup
/// failures yield an empty list, never an error.
pub async fn get_activity(State(state): State<AppState>, auth: AuthUser) -> Json<ActivityResponse> {
    let activity = recent_activity(&state.pool, auth.user.id, DEFAULT_ACTIVITY_LIMIT).await;
    Json(ActivityResponse { activity })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_email_cannot_be_blanked() {
        assert_eq!(
            validate_patch_email(Some("")).unwrap_err(),
            "Email cannot be empty"
        );
        // Whitespace-only input trims to "" before the check, same as the
        // handler's normalization.
        assert_eq!(
            validate_patch_email(Some("   ".trim())).unwrap_err(),
            "Email cannot be empty"
        );
        assert!(validate_patch_email(None).is_ok());
        assert!(validate_patch_email(Some("jane@example.com")).is_ok());
    }

    #[test]
    fn test_password_change_requires_both_fields() {
        let msg = "Current password and new password are required";
        assert_eq!(
            validate_password_change(&None, &Some("newPass1".into())).unwrap_err(),
            msg
        );
        assert_eq!(
            validate_password_change(&Some("oldPass1".into()), &None).unwrap_err(),
            msg
        );
        assert_eq!(
            validate_password_change(&Some("".into()), &Some("newPass1".into())).unwrap_err(),
            msg
        );
    }

    #[test]
    fn test_password_change_rejects_short_new_password() {
        assert_eq!(
            validate_password_change(&Some("oldPass1".into()), &Some("12345".into())).unwrap_err(),
            "New password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_password_change_rejects_unchanged_password() {
        assert_eq!(
            validate_password_change(&Some("samePass1".into()), &Some("samePass1".into()))
                .unwrap_err(),
            "New password must be different from current password"
        );
    }

    #[test]
    fn test_password_change_accepts_valid_pair() {
        let (current, new) =
            validate_password_change(&Some("oldPass1".into()), &Some("newPass2".into()))
                .expect("valid change");
        assert_eq!(current, "oldPass1");
        assert_eq!(new, "newPass2");
    }
}
