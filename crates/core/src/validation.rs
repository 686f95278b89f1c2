//! Field validation rules for user records and profile updates.
//!
//! Registration validates the whole record and collects every violation
//! (the API joins them into one 400 message). Profile updates check fields
//! in a fixed order and report only the first violation.

/// Minimum password length for registration and password changes.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum name / display-name length accepted by profile updates.
pub const MAX_PATCH_NAME_LEN: usize = 25;

/// Maximum display-name length accepted at registration.
pub const MAX_DISPLAY_NAME_LEN: usize = 50;

/// Username length bounds.
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

/// Error message for a malformed location string.
pub const LOCATION_FORMAT_MSG: &str = "Location must be in format: City, State";

/// Validate a location string against the `City, ST` shape: exactly two
/// comma-separated parts, trimmed city at least 2 characters, trimmed state
/// exactly 2 characters.
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = location.split(',').collect();
    if parts.len() != 2 {
        return Err(LOCATION_FORMAT_MSG);
    }
    let city = parts[0].trim();
    let state = parts[1].trim();
    if city.chars().count() < 2 || state.chars().count() != 2 {
        return Err(LOCATION_FORMAT_MSG);
    }
    Ok(())
}

/// Validate a (already lowercased) username: 3-20 characters, ASCII
/// alphanumeric or underscore only.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN
        || len > USERNAME_MAX_LEN
        || !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(
            "Username must be 3-20 characters and contain only letters, numbers, and underscores",
        );
    }
    Ok(())
}

/// Validate a full registration record, collecting every violation.
///
/// Inputs are expected to be trimmed (and username lowercased) by the
/// caller. An empty vec means the record is valid.
pub fn validate_registration(
    name: &str,
    username: &str,
    display_name: Option<&str>,
    password: &str,
    location: Option<&str>,
    farm_type: Option<&str>,
) -> Vec<String> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("Name is required".to_string());
    }
    if let Err(msg) = validate_username(username) {
        errors.push(msg.to_string());
    }
    if let Some(dn) = display_name {
        if dn.chars().count() > MAX_DISPLAY_NAME_LEN {
            errors.push("Display name must be 50 characters or less".to_string());
        }
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("Password must be at least 6 characters long".to_string());
    }
    if let Some(loc) = location {
        if let Err(msg) = validate_location(loc) {
            errors.push(msg.to_string());
        }
    }
    if let Some(ft) = farm_type {
        if crate::farm::FarmType::parse(ft).is_none() {
            errors.push("Invalid farm type".to_string());
        }
    }

    errors
}

/// Validate a partial profile update, reporting the first violation.
///
/// Fields are checked in a fixed order (name, display name, farm type,
/// location); only fields that are present are checked. Inputs are expected
/// to be trimmed by the caller.
pub fn validate_profile_patch(
    name: Option<&str>,
    display_name: Option<&str>,
    farm_type: Option<&str>,
    location: Option<&str>,
) -> Result<(), &'static str> {
    if let Some(name) = name {
        if name.is_empty() {
            return Err("Name cannot be empty");
        }
        if name.chars().count() > MAX_PATCH_NAME_LEN {
            return Err("Name must be 25 characters or less");
        }
    }
    if let Some(dn) = display_name {
        if dn.chars().count() > MAX_PATCH_NAME_LEN {
            return Err("Display name must be 25 characters or less");
        }
    }
    if let Some(ft) = farm_type {
        if crate::farm::FarmType::parse(ft).is_none() {
            return Err("Invalid farm type");
        }
    }
    if let Some(loc) = location {
        validate_location(loc)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_accepts_city_state() {
        assert!(validate_location("Austin, TX").is_ok());
        assert!(validate_location("  Des Moines ,IA").is_ok());
    }

    #[test]
    fn test_location_rejects_bad_shapes() {
        for bad in [
            "InvalidLocationFormat",
            "Austin",
            "Austin, Texas",
            "A, TX",
            "Austin, TX, USA",
            ", TX",
            "Austin,",
        ] {
            let err = validate_location(bad).unwrap_err();
            assert_eq!(err, LOCATION_FORMAT_MSG, "input: {bad}");
        }
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("farmer_jane").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("a2").is_err(), "too short");
        assert!(
            validate_username("this_username_is_way_too_long").is_err(),
            "too long"
        );
        assert!(validate_username("jane doe").is_err(), "whitespace");
        assert!(validate_username("jane!").is_err(), "punctuation");
    }

    #[test]
    fn test_registration_collects_all_violations() {
        let errors = validate_registration(
            "",
            "x",
            None,
            "123",
            Some("nowhere"),
            Some("ranch"),
        );
        assert_eq!(errors.len(), 5);
        assert!(errors[0].contains("Name is required"));
        assert!(errors.iter().any(|e| e.contains("at least 6 characters")));
        assert!(errors.iter().any(|e| e == LOCATION_FORMAT_MSG));
        assert!(errors.iter().any(|e| e == "Invalid farm type"));
    }

    #[test]
    fn test_registration_valid_record() {
        let errors = validate_registration(
            "Jane Doe",
            "farmer_jane",
            Some("Janes Southside Ranch"),
            "passWord123!",
            Some("Southside, TX"),
            Some("small-scale"),
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_patch_first_violation_wins() {
        // Both name and location are invalid; name is reported first.
        let err = validate_profile_patch(
            Some(""),
            None,
            None,
            Some("InvalidLocationFormat"),
        )
        .unwrap_err();
        assert_eq!(err, "Name cannot be empty");
    }

    #[test]
    fn test_patch_name_length_limit() {
        let long_name = "a".repeat(26);
        let err = validate_profile_patch(Some(&long_name), None, None, None).unwrap_err();
        assert_eq!(err, "Name must be 25 characters or less");

        let ok_name = "a".repeat(25);
        assert!(validate_profile_patch(Some(&ok_name), None, None, None).is_ok());
    }

    #[test]
    fn test_patch_display_name_and_farm_type() {
        let long = "d".repeat(26);
        assert_eq!(
            validate_profile_patch(None, Some(&long), None, None).unwrap_err(),
            "Display name must be 25 characters or less"
        );
        assert_eq!(
            validate_profile_patch(None, None, Some("ranch"), None).unwrap_err(),
            "Invalid farm type"
        );
        assert!(validate_profile_patch(None, None, Some("gardener"), None).is_ok());
    }

    #[test]
    fn test_patch_empty_is_valid() {
        assert!(validate_profile_patch(None, None, None, None).is_ok());
    }
}
