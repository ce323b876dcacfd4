//! Document state for UI integration.
//! Owns one document's layers and wires them to the undo history, the map
//! projection and the event dispatcher.
//!
//! This module is split into submodules:
//! - `history`: Undo/redo functionality
//! - `file_io`: Import/export, save/load and naming

mod file_io;
mod history;

use crate::collection::LayerCollection;
use crate::commands::UndoSink;
use crate::history::UndoRedoManager;
use crate::layer::{DrawingLayer, StrokeDefaults};
use geotrace_core::{
    shared, Coordinate, EventDispatcher, LayerEvent, LayerId, Projection, Result, Rgba,
    ScreenPoint, Shared, ViewportRect,
};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::{Rc, Weak};

/// What a click on the map does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Clicks pan and zoom the map
    #[default]
    Map,
    /// Clicks append coordinates to the selected layer
    Drawing,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Map => InteractionMode::Drawing,
            InteractionMode::Drawing => InteractionMode::Map,
        }
    }
}

/// One open document
pub struct DocumentState {
    pub collection: LayerCollection,
    pub stroke_defaults: StrokeDefaults,
    pub viewport: Option<ViewportRect>,
    pub design_name: String,
    pub current_file_path: Option<PathBuf>,
    history: Shared<UndoRedoManager>,
    projection: Option<Weak<dyn Projection>>,
    mode: InteractionMode,
    modified: Rc<Cell<bool>>,
}

impl DocumentState {
    /// Creates an empty, unmodified document.
    pub fn new(stroke_defaults: StrokeDefaults) -> Self {
        let events = EventDispatcher::new();
        let modified = Rc::new(Cell::new(false));
        let flag = modified.clone();
        events.subscribe(move |event| {
            if matches!(
                event,
                LayerEvent::LayerAdded(_)
                    | LayerEvent::LayerRemoved(_)
                    | LayerEvent::CoordinateMutated { .. }
            ) {
                flag.set(true);
            }
        });

        Self {
            collection: LayerCollection::with_dispatcher(events),
            stroke_defaults,
            viewport: None,
            design_name: "Untitled".to_string(),
            current_file_path: None,
            history: shared(UndoRedoManager::new()),
            projection: None,
            mode: InteractionMode::Map,
            modified,
        }
    }

    /// Dispatcher carrying every layer and collection event of this document
    pub fn events(&self) -> &EventDispatcher {
        self.collection.events()
    }

    /// Shared undo history of this document
    pub fn history(&self) -> &Shared<UndoRedoManager> {
        &self.history
    }

    /// Attach the map projection to the document and all of its layers.
    ///
    /// Only a weak handle is kept; the map view owns the projection.
    pub fn set_projection(&mut self, projection: &Rc<dyn Projection>) {
        let handle = Rc::downgrade(projection);
        for index in 0..self.collection.len() {
            if let Some(layer) = self.collection.get_mut(index) {
                layer.set_projection(handle.clone());
            }
        }
        self.projection = Some(handle);
        self.collection.request_redraw_all();
    }

    /// Wire `layer` to this document's collaborators and add it.
    pub fn add_layer(&mut self, mut layer: DrawingLayer) -> LayerId {
        if let Some(projection) = &self.projection {
            layer.set_projection(projection.clone());
        }
        let sink: Rc<RefCell<dyn UndoSink>> = self.history.clone();
        layer.set_undo_sink(Rc::downgrade(&sink));
        self.collection.add_layer(layer)
    }

    /// Add an empty layer with the current stroke defaults
    pub fn add_new_layer(&mut self) -> LayerId {
        let layer = DrawingLayer::new(&self.stroke_defaults);
        self.add_layer(layer)
    }

    /// Give a fresh document its first layer.
    ///
    /// Does nothing when the document already has layers. Returns the id of
    /// the added layer.
    pub fn ensure_initial_layer(&mut self) -> Option<LayerId> {
        if !self.collection.is_empty() {
            return None;
        }
        let id = self.add_new_layer();
        self.modified.set(false);
        Some(id)
    }

    /// Remove the layers at `indices` and forget their history.
    pub fn remove_layers(&mut self, indices: &[usize]) -> usize {
        let removed = self.collection.remove_layers(indices);
        let mut history = self.history.borrow_mut();
        for layer in &removed {
            history.forget_layer(layer.id());
        }
        removed.len()
    }

    pub fn toggle_visibility(&mut self, index: usize) -> Result<bool> {
        self.collection.toggle_visibility(index)
    }

    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        self.collection.select(index)
    }

    pub fn set_stroke_color(&mut self, index: usize, color: Rgba) -> Result<()> {
        self.collection.set_stroke_color(index, color)?;
        self.mark_modified();
        Ok(())
    }

    /// Take over a new preferred line width for new and existing layers
    pub fn apply_line_width(&mut self, width: f64) {
        if !(width.is_finite() && width > 0.0) {
            tracing::warn!("Ignoring invalid line width {}", width);
            return;
        }
        self.stroke_defaults.line_width = width;
        self.collection.apply_line_width(width);
    }

    /// Store the visible map region and redraw
    pub fn set_viewport(&mut self, viewport: ViewportRect) {
        self.viewport = Some(viewport);
        self.collection.request_redraw_all();
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            tracing::debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Switch between map and drawing mode; returns the new mode
    pub fn toggle_mode(&mut self) -> InteractionMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// The layer clicks are drawn into.
    ///
    /// Only set in drawing mode, and only when the selected layer is visible.
    pub fn active_drawing_layer(&self) -> Option<LayerId> {
        if self.mode != InteractionMode::Drawing {
            return None;
        }
        self.collection
            .selected_layer()
            .filter(|layer| layer.is_visible())
            .map(DrawingLayer::id)
    }

    /// Whether the map should hint that there is nothing to draw into
    pub fn needs_target_indicator(&self) -> bool {
        self.active_drawing_layer().is_none()
    }

    /// Append `coordinate` to the active drawing layer.
    ///
    /// Returns `false` without changing anything when there is no active
    /// drawing layer.
    pub fn add_coordinate_at_cursor(&mut self, coordinate: Coordinate) -> bool {
        let Some(id) = self.active_drawing_layer() else {
            tracing::debug!("No active drawing layer, ignoring {}", coordinate);
            return false;
        };
        match self.collection.layer_by_id_mut(id) {
            Some(layer) => {
                layer.add_coordinate(coordinate);
                true
            }
            None => false,
        }
    }

    /// Convert a click position through the projection and draw it.
    pub fn add_point_at_cursor(&mut self, point: ScreenPoint) -> bool {
        let coordinate = self
            .projection
            .as_ref()
            .and_then(Weak::upgrade)
            .and_then(|projection| projection.to_coordinate(point));
        match coordinate {
            Some(coordinate) => self.add_coordinate_at_cursor(coordinate),
            None => false,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }

    /// Mark document as modified.
    pub fn mark_modified(&mut self) {
        self.modified.set(true);
    }

    pub(crate) fn clear_modified(&mut self) {
        self.modified.set(false);
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new(StrokeDefaults::default())
    }
}

impl std::fmt::Debug for DocumentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentState")
            .field("design_name", &self.design_name)
            .field("layers", &self.collection.len())
            .field("mode", &self.mode)
            .field("modified", &self.modified.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_core::EquirectangularProjection;

    #[test]
    fn test_drawing_needs_mode_and_visible_selection() {
        let mut state = DocumentState::default();
        state.add_new_layer();
        assert!(state.needs_target_indicator());
        assert!(!state.add_coordinate_at_cursor(Coordinate::new(1.0, 2.0)));

        assert_eq!(state.toggle_mode(), InteractionMode::Drawing);
        assert!(!state.needs_target_indicator());
        assert!(state.add_coordinate_at_cursor(Coordinate::new(1.0, 2.0)));

        state.toggle_visibility(0).unwrap();
        assert!(state.active_drawing_layer().is_none());
        assert!(!state.add_coordinate_at_cursor(Coordinate::new(3.0, 4.0)));
        assert_eq!(state.collection.get(0).unwrap().len(), 1);
    }

    #[test]
    fn test_modified_tracks_content_changes() {
        let mut state = DocumentState::default();
        assert!(state.ensure_initial_layer().is_some());
        assert!(!state.is_modified());

        state.select(None).unwrap();
        assert!(!state.is_modified());

        state.select(Some(0)).unwrap();
        state.set_mode(InteractionMode::Drawing);
        state.add_coordinate_at_cursor(Coordinate::new(1.0, 1.0));
        assert!(state.is_modified());
    }

    #[test]
    fn test_ensure_initial_layer_only_when_empty() {
        let mut state = DocumentState::default();
        assert!(state.ensure_initial_layer().is_some());
        assert!(state.ensure_initial_layer().is_none());
        assert_eq!(state.collection.len(), 1);
    }

    #[test]
    fn test_click_goes_through_projection() {
        let projection: Rc<dyn Projection> = Rc::new(EquirectangularProjection::new(360.0, 180.0));
        let mut state = DocumentState::default();
        state.add_new_layer();
        state.set_projection(&projection);
        state.set_mode(InteractionMode::Drawing);

        assert!(state.add_point_at_cursor(ScreenPoint::new(180.0, 90.0)));
        assert_eq!(
            state.collection.get(0).unwrap().coordinates(),
            &[Coordinate::new(0.0, 0.0)]
        );
    }

    #[test]
    fn test_line_width_broadcast_updates_defaults() {
        let mut state = DocumentState::default();
        state.add_new_layer();
        state.apply_line_width(2.5);
        assert_eq!(state.stroke_defaults.line_width, 2.5);
        assert_eq!(state.collection.get(0).unwrap().line_width(), 2.5);

        state.add_new_layer();
        assert_eq!(state.collection.get(1).unwrap().line_width(), 2.5);
    }
}
