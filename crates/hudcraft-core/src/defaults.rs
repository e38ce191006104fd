//! Built-in default documents for each supported configuration version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, DocumentError};

/// Unknown configuration version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown config version `{0}` (expected v4, v5 or v6)")]
pub struct VersionParseError(pub String);

/// Configuration format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigVersion {
    V4,
    V5,
    #[default]
    V6,
}

impl ConfigVersion {
    pub const ALL: [ConfigVersion; 3] = [ConfigVersion::V4, ConfigVersion::V5, ConfigVersion::V6];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigVersion::V4 => "v4",
            ConfigVersion::V5 => "v5",
            ConfigVersion::V6 => "v6",
        }
    }

    fn default_json(self) -> &'static str {
        match self {
            ConfigVersion::V4 => include_str!("../defaults/v4.json"),
            ConfigVersion::V5 => include_str!("../defaults/v5.json"),
            ConfigVersion::V6 => include_str!("../defaults/v6.json"),
        }
    }

    /// Parse the default document shipped for this version.
    pub fn default_document(self) -> Result<Document, DocumentError> {
        Document::from_json(self.default_json())
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| VersionParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HUD_SECTION;
    use crate::module::HudModule;

    #[test]
    fn test_every_default_parses() {
        for version in ConfigVersion::ALL {
            let doc = version.default_document().unwrap();
            assert!(doc.namespace().is_some(), "{version} has no namespace");
            let hud = doc.section(DEFAULT_HUD_SECTION).unwrap();
            assert!(!HudModule::discover(hud).is_empty(), "{version} has no modules");
        }
    }

    #[test]
    fn test_versions_differ() {
        let v4 = ConfigVersion::V4.default_document().unwrap();
        let v6 = ConfigVersion::V6.default_document().unwrap();
        assert_ne!(v4, v6);
        assert!(v6.section("pause_menu@gc.pnl").is_some());
        assert!(v4.section("pause_menu@gc.pnl").is_none());
    }

    #[test]
    fn test_parse_version() {
        assert_eq!("v5".parse::<ConfigVersion>(), Ok(ConfigVersion::V5));
        assert!("v7".parse::<ConfigVersion>().is_err());
        assert_eq!(ConfigVersion::default(), ConfigVersion::V6);
        assert_eq!(ConfigVersion::V4.to_string(), "v4");
    }

    #[test]
    fn test_default_export_is_stable() {
        let doc = ConfigVersion::V6.default_document().unwrap();
        let json = doc.to_json_pretty().unwrap();
        let again = Document::from_json(&json).unwrap();
        assert_eq!(again.to_json_pretty().unwrap(), json);
    }
}
