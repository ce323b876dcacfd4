//! GeoTrace Settings Crate
//!
//! Handles process-wide preferences: their validation, persistence in the
//! application-support directory, and change notification.

pub mod config;
pub mod controller;
pub mod error;
pub mod persistence;

pub use config::{validate_line_width, Preferences, PreferencesFormat, DEFAULT_LINE_WIDTH};
pub use controller::PreferencesController;
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::PreferencesStore;
