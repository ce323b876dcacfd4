//! Preferences Persistence
//!
//! Locates the preferences file in the platform's application-support
//! directory and loads or saves it.
//!
//! - Linux: `~/.local/share/geotrace/preferences.json`
//! - macOS: `~/Library/Application Support/geotrace/preferences.json`
//! - Windows: `%APPDATA%\geotrace\preferences.json`

use crate::config::Preferences;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

/// Application directory name under the platform data directory
pub const APP_DIR_NAME: &str = "geotrace";

/// Preferences file name
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Reads and writes the preferences file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    /// Store at the platform default location
    pub fn new() -> SettingsResult<Self> {
        Ok(Self {
            path: Self::default_path()?,
        })
    }

    /// Store at an explicit path (`.json` or `.toml`)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default preferences file path
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no application data directory".to_string())
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory holding the preferences file
    pub fn ensure_dir(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        Ok(())
    }

    /// Load stored preferences
    pub fn load(&self) -> SettingsResult<Preferences> {
        Preferences::load_from_file(&self.path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", self.path.display(), e)))
    }

    /// Load stored preferences, falling back to defaults when the file is
    /// missing or unusable.
    pub fn load_or_default(&self) -> Preferences {
        if !self.path.exists() {
            tracing::debug!(
                "No preferences at {}, using defaults",
                self.path.display()
            );
            return Preferences::default();
        }
        match self.load() {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!("{}; using default preferences", e);
                Preferences::default()
            }
        }
    }

    /// Write `preferences`, creating the directory if needed
    pub fn save(&self, preferences: &Preferences) -> SettingsResult<()> {
        self.ensure_dir()?;
        preferences.save_to_file(&self.path)?;
        tracing::info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}
