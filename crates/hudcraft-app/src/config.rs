//! Application settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hudcraft_core::{ConfigVersion, EditorConfig};
use serde::{Deserialize, Serialize};

/// Settings read from the `--config` file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub editor: EditorConfig,
    /// Version whose defaults back section resets.
    pub version: ConfigVersion,
    /// Spaces per level in exported JSON.
    pub pretty_indent: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            version: ConfigVersion::default(),
            pretty_indent: 2,
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load settings from `path`, or use the defaults if none is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "v5", "editor": {{"surface_width": 300}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.version, ConfigVersion::V5);
        assert_eq!(config.editor.surface_width, 300.0);
        assert_eq!(config.editor.surface_height, 720.0);
        assert_eq!(config.pretty_indent, 2);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_no_config_uses_defaults() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
