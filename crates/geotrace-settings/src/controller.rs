//! Preferences Controller
//!
//! Backs the preferences window: holds the current preferences, validates
//! edits, notifies listeners of changes and saves when the window closes.

use crate::config::{validate_line_width, Preferences};
use crate::error::SettingsResult;
use crate::persistence::PreferencesStore;
use std::cell::RefCell;
use std::rc::Rc;

type LineWidthListener = Rc<dyn Fn(f64)>;

/// Controller for preference edits
pub struct PreferencesController {
    preferences: Rc<RefCell<Preferences>>,
    store: PreferencesStore,
    listeners: Rc<RefCell<Vec<LineWidthListener>>>,
}

impl PreferencesController {
    /// Load preferences from `store`, falling back to defaults
    pub fn load(store: PreferencesStore) -> Self {
        let preferences = store.load_or_default();
        Self::with_preferences(store, preferences)
    }

    pub fn with_preferences(store: PreferencesStore, preferences: Preferences) -> Self {
        Self {
            preferences: Rc::new(RefCell::new(preferences)),
            store,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a callback to be notified when the line width changes
    pub fn on_line_width_changed<F>(&self, callback: F)
    where
        F: Fn(f64) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(callback));
    }

    /// Snapshot of the current preferences
    pub fn preferences(&self) -> Preferences {
        self.preferences.borrow().clone()
    }

    pub fn line_width(&self) -> f64 {
        self.preferences.borrow().line_width
    }

    /// Change the line width and notify listeners.
    ///
    /// Invalid widths are rejected and nothing changes. Setting the current
    /// value again does not notify.
    pub fn set_line_width(&self, width: f64) -> SettingsResult<()> {
        validate_line_width(width)?;
        {
            let mut preferences = self.preferences.borrow_mut();
            if preferences.line_width == width {
                return Ok(());
            }
            preferences.line_width = width;
        }
        tracing::debug!("Line width preference changed to {}", width);

        // Listeners may register further listeners while being notified.
        let listeners: Vec<LineWidthListener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(width);
        }
        Ok(())
    }

    /// Restore default preferences
    pub fn restore_defaults(&self) -> SettingsResult<()> {
        self.set_line_width(Preferences::default().line_width)
    }

    /// Save preferences to disk
    pub fn save(&self) -> SettingsResult<()> {
        self.store.save(&self.preferences.borrow())
    }

    /// The preferences window closed; persist what was edited
    pub fn close(&self) -> SettingsResult<()> {
        self.save()
    }

    pub fn store(&self) -> &PreferencesStore {
        &self.store
    }
}
