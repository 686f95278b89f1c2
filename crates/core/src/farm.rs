//! Farm-type classification for user profiles.

use serde::{Deserialize, Serialize};

/// Closed set of farm classifications a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FarmType {
    #[default]
    #[serde(rename = "hobby")]
    Hobby,
    #[serde(rename = "small-scale")]
    SmallScale,
    #[serde(rename = "commercial")]
    Commercial,
    #[serde(rename = "gardener")]
    Gardener,
}

impl FarmType {
    /// Wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            FarmType::Hobby => "hobby",
            FarmType::SmallScale => "small-scale",
            FarmType::Commercial => "commercial",
            FarmType::Gardener => "gardener",
        }
    }

    /// Parse a wire string. Returns `None` for anything outside the closed
    /// set so callers can produce their own "Invalid farm type" error
    /// instead of a deserialization failure.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hobby" => Some(FarmType::Hobby),
            "small-scale" => Some(FarmType::SmallScale),
            "commercial" => Some(FarmType::Commercial),
            "gardener" => Some(FarmType::Gardener),
            _ => None,
        }
    }
}

impl std::fmt::Display for FarmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_all_variants() {
        for variant in [
            FarmType::Hobby,
            FarmType::SmallScale,
            FarmType::Commercial,
            FarmType::Gardener,
        ] {
            assert_eq!(FarmType::parse(variant.as_str()), Some(variant));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(FarmType::parse("ranch"), None);
        assert_eq!(FarmType::parse("Hobby"), None, "parsing is case-sensitive");
        assert_eq!(FarmType::parse(""), None);
    }

    #[test]
    fn test_default_is_hobby() {
        assert_eq!(FarmType::default(), FarmType::Hobby);
    }
}
