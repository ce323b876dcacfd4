//! Open documents and the preferences they share.
//!
//! Preferences are process-wide: a line width change made in the
//! preferences window is pushed to every open document at once, and new
//! documents start from the current preferences.

use anyhow::Context;
use geotrace_core::{shared, Shared};
use geotrace_designer::{DocumentState, StrokeDefaults};
use geotrace_settings::{PreferencesController, PreferencesStore, SettingsResult};
use std::path::Path;
use std::rc::Rc;

/// All open documents of the running application
pub struct Workspace {
    preferences: PreferencesController,
    documents: Shared<Vec<Shared<DocumentState>>>,
}

impl Workspace {
    /// Load preferences from `store` and start with no documents
    pub fn load(store: PreferencesStore) -> Self {
        Self::new(PreferencesController::load(store))
    }

    pub fn new(preferences: PreferencesController) -> Self {
        let documents: Shared<Vec<Shared<DocumentState>>> = shared(Vec::new());

        let open = Rc::downgrade(&documents);
        preferences.on_line_width_changed(move |width| {
            let Some(documents) = open.upgrade() else {
                return;
            };
            for document in documents.borrow().iter() {
                match document.try_borrow_mut() {
                    Ok(mut document) => document.apply_line_width(width),
                    Err(_) => tracing::warn!(
                        "Document busy, line width {} not applied",
                        width
                    ),
                }
            }
        });

        Self {
            preferences,
            documents,
        }
    }

    pub fn preferences(&self) -> &PreferencesController {
        &self.preferences
    }

    /// Stroke settings for layers created now
    pub fn stroke_defaults(&self) -> StrokeDefaults {
        StrokeDefaults::with_line_width(self.preferences.line_width())
    }

    /// Open a new untitled document holding one empty layer
    pub fn new_document(&self) -> Shared<DocumentState> {
        let mut document = DocumentState::new(self.stroke_defaults());
        document.ensure_initial_layer();
        self.track(document)
    }

    /// Open a document stored as an opaque blob.
    ///
    /// Unreadable data opens as a fresh document with one empty layer
    /// instead of failing. A stored document without layers stays empty.
    pub fn open_bytes(&self, bytes: &[u8]) -> Shared<DocumentState> {
        let mut document = DocumentState::new(self.stroke_defaults());
        if document.load_from_bytes(bytes).is_none() {
            document.ensure_initial_layer();
        }
        self.track(document)
    }

    /// Open a document file
    pub fn open_document(&self, path: &Path) -> anyhow::Result<Shared<DocumentState>> {
        let mut document = DocumentState::new(self.stroke_defaults());
        document
            .load_from_file(path)
            .with_context(|| format!("failed to open document {}", path.display()))?;
        Ok(self.track(document))
    }

    /// Stop tracking `document`; returns whether it was open
    pub fn close_document(&self, document: &Shared<DocumentState>) -> bool {
        let mut documents = self.documents.borrow_mut();
        let before = documents.len();
        documents.retain(|open| !Rc::ptr_eq(open, document));
        before != documents.len()
    }

    pub fn documents(&self) -> Vec<Shared<DocumentState>> {
        self.documents.borrow().clone()
    }

    pub fn document_count(&self) -> usize {
        self.documents.borrow().len()
    }

    /// Change the preferred line width; every open document follows.
    pub fn set_line_width(&self, width: f64) -> SettingsResult<()> {
        self.preferences.set_line_width(width)
    }

    /// The preferences window closed; store the preferences
    pub fn close_preferences(&self) -> SettingsResult<()> {
        self.preferences.close()
    }

    fn track(&self, document: DocumentState) -> Shared<DocumentState> {
        let document = shared(document);
        self.documents.borrow_mut().push(document.clone());
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_core::Coordinate;
    use geotrace_designer::InteractionMode;

    fn workspace(dir: &tempfile::TempDir) -> Workspace {
        Workspace::load(PreferencesStore::with_path(
            dir.path().join("preferences.json"),
        ))
    }

    #[test]
    fn test_line_width_reaches_every_open_document() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        let first = workspace.new_document();
        let second = workspace.new_document();

        workspace.set_line_width(2.5).unwrap();

        for document in [&first, &second] {
            let document = document.borrow();
            assert_eq!(document.stroke_defaults.line_width, 2.5);
            assert_eq!(document.collection.get(0).unwrap().line_width(), 2.5);
        }
    }

    #[test]
    fn test_closed_document_no_longer_follows() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        let document = workspace.new_document();
        assert!(workspace.close_document(&document));
        assert!(!workspace.close_document(&document));

        workspace.set_line_width(4.0).unwrap();
        assert_eq!(document.borrow().stroke_defaults.line_width, 1.0);
        assert_eq!(workspace.document_count(), 0);
    }

    #[test]
    fn test_new_documents_use_current_preference() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        workspace.set_line_width(3.0).unwrap();
        let document = workspace.new_document();
        assert_eq!(document.borrow().collection.get(0).unwrap().line_width(), 3.0);
    }

    #[test]
    fn test_preferences_persist_on_close() {
        let dir = tempfile::tempdir().unwrap();
        workspace(&dir).set_line_width(6.0).unwrap();
        let workspace_a = workspace(&dir);
        assert_eq!(workspace_a.preferences().line_width(), 1.0);

        workspace_a.set_line_width(6.0).unwrap();
        workspace_a.close_preferences().unwrap();
        assert_eq!(workspace(&dir).preferences().line_width(), 6.0);
    }

    #[test]
    fn test_open_bytes_with_garbage_gives_fresh_document() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        let document = workspace.open_bytes(b"garbage");
        let document = document.borrow();
        assert_eq!(document.collection.len(), 1);
        assert!(document.viewport.is_none());
        assert!(!document.is_modified());
    }

    #[test]
    fn test_stored_document_without_layers_stays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        let path = dir.path().join("empty.geotrace");
        DocumentState::default().save_to_file(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert!(workspace.open_bytes(&bytes).borrow().collection.is_empty());
        assert!(workspace
            .open_document(&path)
            .unwrap()
            .borrow()
            .collection
            .is_empty());
    }

    #[test]
    fn test_open_document_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        let path = dir.path().join("trip.geotrace");
        {
            let document = workspace.new_document();
            let mut document = document.borrow_mut();
            document.set_mode(InteractionMode::Drawing);
            document.add_coordinate_at_cursor(Coordinate::new(1.0, 2.0));
            document.save_to_file(&path).unwrap();
        }

        let reopened = workspace.open_document(&path).unwrap();
        assert_eq!(
            reopened.borrow().collection.get(0).unwrap().coordinates(),
            &[Coordinate::new(1.0, 2.0)]
        );
        assert!(workspace.open_document(&dir.path().join("none")).is_err());
    }
}
