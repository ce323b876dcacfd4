//! File I/O operations (import, export, save, load, new) for document state.

use super::DocumentState;
use crate::import::{export_coordinates, import_coordinates};
use crate::layer::DrawingLayer;
use crate::serialization::DocumentFile;
use geotrace_core::{Error, LayerId, Result};
use std::path::Path;

impl DocumentState {
    /// Import a coordinate file as a new layer named after the file.
    ///
    /// Returns `None` if the file could not be read; nothing changes then.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Option<LayerId> {
        let imported = import_coordinates(path.as_ref())?;
        let layer = DrawingLayer::with_coordinates(
            imported.name,
            imported.coordinates,
            &self.stroke_defaults,
        );
        Some(self.add_layer(layer))
    }

    /// Export the coordinates of the layer at `index`.
    pub fn export_layer(&self, index: usize, path: impl AsRef<Path>) -> Result<()> {
        let layer = self
            .collection
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.collection.len()))?;
        export_coordinates(layer.coordinates(), path.as_ref())
    }

    /// Snapshot of the document for persistence
    pub fn to_document(&self) -> DocumentFile {
        DocumentFile::from_collection(&self.design_name, &self.collection, self.viewport)
    }

    /// Encode the document as an opaque blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_document().to_bytes()
    }

    /// Replace the document contents with those stored in `bytes`.
    ///
    /// Unreadable data leaves an empty document with no viewport. History
    /// is cleared and the document is unmodified afterwards. Returns the
    /// number of layers restored, or `None` if no layer list could be
    /// decoded (a stored empty list yields `Some(0)`).
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> Option<usize> {
        match DocumentFile::from_bytes(bytes) {
            Ok(document) => {
                self.design_name = document.metadata.name.clone();
                Some(self.restore(&document))
            }
            Err(e) => {
                tracing::warn!("Starting empty document, stored data unreadable: {}", e);
                self.restore(&DocumentFile::new(&self.design_name));
                None
            }
        }
    }

    fn restore(&mut self, document: &DocumentFile) -> usize {
        self.collection.clear();
        for layer in document.to_layers(&self.stroke_defaults) {
            self.add_layer(layer);
        }
        self.viewport = document.viewport;
        self.clear_history();
        self.clear_modified();
        self.collection.len()
    }

    /// Save document to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_document().save_to_file(path)?;

        self.current_file_path = Some(path.to_path_buf());
        self.clear_modified();
        Ok(())
    }

    /// Load document from file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = DocumentFile::load_from_file(path)?;

        self.design_name = document.metadata.name.clone();
        self.restore(&document);
        self.current_file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Create new document (clear all).
    pub fn new_document(&mut self) {
        self.collection.clear();
        self.viewport = None;
        self.current_file_path = None;
        self.design_name = "Untitled".to_string();
        self.clear_history();
        self.clear_modified();
    }

    /// Get display name for the document.
    pub fn display_name(&self) -> String {
        let name = if let Some(path) = &self.current_file_path {
            path.file_stem()
                .and_then(|n| n.to_str())
                .unwrap_or(&self.design_name)
        } else {
            &self.design_name
        };

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Title of the layers table window, e.g. "Walks Layers"
    pub fn layers_window_title(&self) -> String {
        let name = self
            .current_file_path
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|n| n.to_str())
            .unwrap_or(&self.design_name);
        format!("{} Layers", name)
    }
}
