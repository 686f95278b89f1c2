//! Activity-audit action types and the profile-change diff helper.
//!
//! Lives in `core` so both the API layer (recording) and the repository
//! layer (querying) share one closed action enumeration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::farm::FarmType;

/// Closed set of auditable account lifecycle actions.
///
/// Wire strings match the stored `action` column values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityAction {
    #[serde(rename = "account_created")]
    AccountCreated,
    #[serde(rename = "email_change")]
    EmailChange,
    #[serde(rename = "update_displayName")]
    UpdateDisplayName,
    #[serde(rename = "update_farmType")]
    UpdateFarmType,
    #[serde(rename = "update_location")]
    UpdateLocation,
    #[serde(rename = "password_update")]
    PasswordUpdate,
    #[serde(rename = "profile_update")]
    ProfileUpdate,
    #[serde(rename = "login")]
    Login,
    #[serde(rename = "logout")]
    Logout,
}

impl ActivityAction {
    /// Wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::AccountCreated => "account_created",
            ActivityAction::EmailChange => "email_change",
            ActivityAction::UpdateDisplayName => "update_displayName",
            ActivityAction::UpdateFarmType => "update_farmType",
            ActivityAction::UpdateLocation => "update_location",
            ActivityAction::PasswordUpdate => "password_update",
            ActivityAction::ProfileUpdate => "profile_update",
            ActivityAction::Login => "login",
            ActivityAction::Logout => "logout",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watched profile fields as they stood before an update.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub name: String,
    pub display_name: String,
    pub email: String,
    pub location: Option<String>,
    pub farm_type: FarmType,
}

/// Watched profile fields as requested by an update. `None` means the field
/// was not part of the request and is never treated as a change.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub farm_type: Option<FarmType>,
}

impl ProfilePatch {
    /// True when no watched field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.display_name.is_none()
            && self.email.is_none()
            && self.location.is_none()
            && self.farm_type.is_none()
    }
}

/// Produce a `{field: {"from": old, "to": new}}` map for every watched field
/// whose requested value differs from the snapshot.
pub fn diff_profile_changes(old: &ProfileSnapshot, new: &ProfilePatch) -> Map<String, Value> {
    let mut changes = Map::new();

    if let Some(name) = &new.name {
        if *name != old.name {
            changes.insert("name".into(), json!({ "from": old.name, "to": name }));
        }
    }
    if let Some(display_name) = &new.display_name {
        if *display_name != old.display_name {
            changes.insert(
                "displayName".into(),
                json!({ "from": old.display_name, "to": display_name }),
            );
        }
    }
    if let Some(email) = &new.email {
        if *email != old.email {
            changes.insert("email".into(), json!({ "from": old.email, "to": email }));
        }
    }
    if let Some(location) = &new.location {
        if old.location.as_deref() != Some(location) {
            changes.insert(
                "location".into(),
                json!({ "from": old.location, "to": location }),
            );
        }
    }
    if let Some(farm_type) = new.farm_type {
        if farm_type != old.farm_type {
            changes.insert(
                "farmType".into(),
                json!({ "from": old.farm_type.as_str(), "to": farm_type.as_str() }),
            );
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            name: "Jane Doe".into(),
            display_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            location: Some("Austin, TX".into()),
            farm_type: FarmType::Hobby,
        }
    }

    #[test]
    fn test_absent_fields_are_not_changes() {
        let changes = diff_profile_changes(&snapshot(), &ProfilePatch::default());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_equal_values_are_not_changes() {
        let patch = ProfilePatch {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            ..Default::default()
        };
        let changes = diff_profile_changes(&snapshot(), &patch);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_changed_fields_record_from_and_to() {
        let patch = ProfilePatch {
            display_name: Some("Southside Ranch".into()),
            farm_type: Some(FarmType::SmallScale),
            ..Default::default()
        };
        let changes = diff_profile_changes(&snapshot(), &patch);
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes["displayName"],
            serde_json::json!({ "from": "Jane Doe", "to": "Southside Ranch" })
        );
        assert_eq!(
            changes["farmType"],
            serde_json::json!({ "from": "hobby", "to": "small-scale" })
        );
    }

    #[test]
    fn test_location_set_from_empty() {
        let mut old = snapshot();
        old.location = None;
        let patch = ProfilePatch {
            location: Some("Boise, ID".into()),
            ..Default::default()
        };
        let changes = diff_profile_changes(&old, &patch);
        assert_eq!(
            changes["location"],
            serde_json::json!({ "from": null, "to": "Boise, ID" })
        );
    }

    #[test]
    fn test_action_wire_strings() {
        assert_eq!(ActivityAction::AccountCreated.as_str(), "account_created");
        assert_eq!(
            ActivityAction::UpdateDisplayName.as_str(),
            "update_displayName"
        );
        assert_eq!(
            serde_json::to_value(ActivityAction::PasswordUpdate).unwrap(),
            serde_json::json!("password_update")
        );
        assert_eq!(
            serde_json::from_value::<ActivityAction>(serde_json::json!("profile_update")).unwrap(),
            ActivityAction::ProfileUpdate
        );
    }
}
