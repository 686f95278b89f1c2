//! Handlers for the `/api/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use agriconnect_core::activity::ActivityAction;
use agriconnect_core::farm::FarmType;
use agriconnect_core::validation;
use agriconnect_db::models::user::{CreateUser, SanitizedUser};
use agriconnect_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{duplicate_key_field, AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
    pub farm_type: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_username: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: SanitizedUser,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Login failures answer with this exact message whether the account is
/// missing or the password is wrong, so callers cannot enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Trim a required field; `None` and whitespace-only both count as missing.
fn required(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Display name falls back to the full name when absent or blank.
fn resolve_display_name(display_name: Option<String>, name: &str) -> String {
    display_name.unwrap_or_else(|| name.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account, returning a session token and the sanitized user.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // 1. Presence of required fields.
    let (Some(name), Some(username), Some(email), Some(password)) = (
        required(&input.name),
        required(&input.username),
        required(&input.email),
        input.password.clone().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation(
            "Please provide name, username, email, and password",
        ));
    };

    let username = username.to_lowercase();
    let email = email.trim().to_lowercase();

    // 2. Uniqueness pre-check, email and username together in one lookup.
    //    Email conflict takes priority when both collide.
    if let Some(existing) = UserRepo::find_conflict(&state.pool, &email, &username).await? {
        if existing.email == email {
            return Err(AppError::conflict("Email already registered"));
        }
        return Err(AppError::conflict("Username already taken"));
    }

    // Blank optional fields are treated as absent.
    let display_name_in = required(&input.display_name);
    let location = required(&input.location);

    // 3. Record-level field validation; all violations reported at once.
    let errors = validation::validate_registration(
        &name,
        &username,
        display_name_in.as_deref(),
        &password,
        location.as_deref(),
        input.farm_type.as_deref(),
    );
    if !errors.is_empty() {
        return Err(AppError::validation(errors.join(", ")));
    }

    // 4. Hash before anything is persisted.
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::Internal(format!("Password hashing error: {e}")))?;

    let display_name = resolve_display_name(display_name_in, &name);
    let farm_type = input
        .farm_type
        .as_deref()
        .and_then(FarmType::parse)
        .unwrap_or_default();

    let create = CreateUser {
        name,
        username,
        display_name,
        email,
        password_hash,
        location,
        farm_type: farm_type.as_str().to_string(),
    };

    // 5. Insert; a duplicate-key race gets the same conflict responses as
    //    the pre-check.
    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|e| match duplicate_key_field(&e) {
            Some("email") => AppError::conflict("Email already registered"),
            Some("username") => AppError::conflict("Username already taken"),
            _ => AppError::Database(e),
        })?;

    // 6. Issue a token keyed to the new identifier.
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    // 7. Audit, fire-and-forget.
    state.activity.record(
        user.id,
        ActivityAction::AccountCreated,
        json!({ "username": user.username }),
    );

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            token,
            user: user.into(),
        }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email-or-username + password. A missing account and a
/// wrong password answer identically so callers cannot enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(identifier), Some(password)) = (
        required(&input.email_or_username),
        input.password.clone().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation(
            "Please provide email or username, and password",
        ));
    };

    let identifier = identifier.to_lowercase();

    let user = UserRepo::find_by_email_or_username(&state.pool, &identifier)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    state
        .activity
        .record(user.id, ActivityAction::Login, json!({}));

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_filters_blank_fields() {
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some("".into())), None);
        assert_eq!(required(&Some("   ".into())), None);
        assert_eq!(required(&Some("  Jane Doe ".into())), Some("Jane Doe".into()));
    }

    #[test]
    fn test_display_name_defaults_to_name() {
        // Absent or blank displayName falls back to the registered name,
        // exactly as the handler wires it: required() then the fallback.
        assert_eq!(resolve_display_name(required(&None), "Jane Doe"), "Jane Doe");
        assert_eq!(
            resolve_display_name(required(&Some("   ".into())), "Jane Doe"),
            "Jane Doe"
        );
        assert_eq!(
            resolve_display_name(required(&Some(" Janes Ranch ".into())), "Jane Doe"),
            "Janes Ranch"
        );
    }

    #[test]
    fn test_login_failure_message_is_uniform() {
        // Both the unknown-account and wrong-password branches answer with
        // this one constant.
        assert_eq!(INVALID_CREDENTIALS, "Invalid credentials");
    }

    #[test]
    fn test_register_request_uses_camel_case_keys() {
        let input: RegisterRequest = serde_json::from_value(json!({
            "name": "Jane Doe",
            "username": "farmer_jane",
            "displayName": "Janes Southside Ranch",
            "email": "jane@example.com",
            "password": "passWord123!",
            "farmType": "small-scale"
        }))
        .expect("request should deserialize");
        assert_eq!(input.display_name.as_deref(), Some("Janes Southside Ranch"));
        assert_eq!(input.farm_type.as_deref(), Some("small-scale"));
        assert_eq!(input.location, None);
    }

    #[test]
    fn test_login_request_uses_camel_case_keys() {
        let input: LoginRequest = serde_json::from_value(json!({
            "emailOrUsername": "Jane@Example.com",
            "password": "passWord123!"
        }))
        .expect("request should deserialize");
        assert_eq!(input.email_or_username.as_deref(), Some("Jane@Example.com"));
    }
}
