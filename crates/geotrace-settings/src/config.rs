//! Preferences for GeoTrace
//!
//! Process-wide user preferences. They are not part of any document and
//! apply to every open document at once.
//! Supports JSON and TOML file formats, chosen by file extension.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Line width used when no preference has been stored
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// File format of a preferences file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesFormat {
    Json,
    Toml,
}

impl PreferencesFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Stroke width for drawing layers, in points
    pub line_width: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl Preferences {
    /// Create default preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is usable
    pub fn validate(&self) -> SettingsResult<()> {
        validate_line_width(self.line_width)?;
        Ok(())
    }

    /// Load preferences from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = PreferencesFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let preferences: Preferences = match format {
            PreferencesFormat::Json => serde_json::from_str(&content)?,
            PreferencesFormat::Toml => toml::from_str(&content)?,
        };

        preferences.validate()?;
        Ok(preferences)
    }

    /// Save preferences to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match PreferencesFormat::from_path(path)? {
            PreferencesFormat::Json => serde_json::to_string_pretty(self)?,
            PreferencesFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

/// Reject widths that cannot be stroked
pub fn validate_line_width(width: f64) -> Result<(), ConfigError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: "line_width".to_string(),
            value: width.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let preferences = Preferences::default();
        assert_eq!(preferences.line_width, 1.0);
        assert!(preferences.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_widths() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let preferences = Preferences { line_width: width };
            assert!(preferences.validate().is_err(), "{} accepted", width);
        }
    }

    #[test]
    fn test_json_and_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let preferences = Preferences { line_width: 2.5 };

        for name in ["prefs.json", "prefs.toml"] {
            let path = dir.path().join(name);
            preferences.save_to_file(&path).unwrap();
            assert_eq!(Preferences::load_from_file(&path).unwrap(), preferences);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        let err = Preferences::default().save_to_file(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(
            Preferences::load_from_file(&path).unwrap(),
            Preferences::default()
        );
    }

    #[test]
    fn test_invalid_stored_width_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "line_width = -3.0\n").unwrap();
        assert!(Preferences::load_from_file(&path).is_err());
    }
}
