//! # Layer Collection
//!
//! The ordered set of drawing layers in one document, with single
//! selection by identity.
//!
//! Invariants:
//! - the selected id, when set, belongs to a layer in the collection
//! - removing layers always clears the selection; nothing is reselected
//!
//! Every structural or selection change is announced through the
//! collection's [`EventDispatcher`], which is shared with its layers.

use crate::layer::{DrawingLayer, StrokeDefaults};
use geotrace_core::{Error, EventDispatcher, LayerError, LayerEvent, LayerId, Result, Rgba};

#[derive(Debug, Default)]
pub struct LayerCollection {
    layers: Vec<DrawingLayer>,
    selected: Option<LayerId>,
    events: EventDispatcher,
}

impl LayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection that announces changes on `events`
    pub fn with_dispatcher(events: EventDispatcher) -> Self {
        Self {
            layers: Vec::new(),
            selected: None,
            events,
        }
    }

    /// Dispatcher carrying this collection's events
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Append `layer`, select it, and announce both changes.
    pub fn add_layer(&mut self, mut layer: DrawingLayer) -> LayerId {
        let id = layer.id();
        layer.set_event_dispatcher(self.events.clone());
        tracing::debug!("Adding layer {} ({})", layer.name, id);
        self.layers.push(layer);
        self.selected = Some(id);

        self.events.emit(LayerEvent::LayerAdded(id));
        self.events.emit(LayerEvent::SelectionChanged(Some(id)));
        id
    }

    /// Add an empty layer with a random name.
    pub fn add_new_layer(&mut self, defaults: &StrokeDefaults) -> LayerId {
        self.add_layer(DrawingLayer::new(defaults))
    }

    /// Remove the layers at `indices`, positions taken before any removal.
    ///
    /// Out-of-range and repeated indices are ignored. The selection is
    /// always cleared afterwards. Returns the removed layers, detached from
    /// their collaborators, in collection order.
    pub fn remove_layers(&mut self, indices: &[usize]) -> Vec<DrawingLayer> {
        let mut ids: Vec<LayerId> = Vec::with_capacity(indices.len());
        for &index in indices {
            match self.layers.get(index) {
                Some(layer) if !ids.contains(&layer.id()) => ids.push(layer.id()),
                Some(_) => {}
                None => tracing::warn!(
                    "Ignoring layer index {} (collection has {} layers)",
                    index,
                    self.layers.len()
                ),
            }
        }

        let mut removed = Vec::with_capacity(ids.len());
        let mut kept = Vec::with_capacity(self.layers.len());
        for mut layer in self.layers.drain(..) {
            if ids.contains(&layer.id()) {
                layer.detach();
                removed.push(layer);
            } else {
                kept.push(layer);
            }
        }
        self.layers = kept;

        for layer in &removed {
            tracing::debug!("Removed layer {} ({})", layer.name, layer.id());
            self.events.emit(LayerEvent::LayerRemoved(layer.id()));
        }

        self.selected = None;
        self.events.emit(LayerEvent::SelectionChanged(None));
        removed
    }

    /// Remove every layer.
    pub fn clear(&mut self) -> Vec<DrawingLayer> {
        let all: Vec<usize> = (0..self.layers.len()).collect();
        self.remove_layers(&all)
    }

    /// Flip visibility of the layer at `index`; returns the new visibility.
    pub fn toggle_visibility(&mut self, index: usize) -> Result<bool> {
        let layer = self.get_checked_mut(index)?;
        let visible = !layer.is_visible();
        layer.set_visible(visible);
        let id = layer.id();

        self.events
            .emit(LayerEvent::VisibilityToggled { layer: id, visible });
        Ok(visible)
    }

    /// Change the selection from a table row (`None` clears it).
    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        let selected = match index {
            Some(index) => Some(self.get_checked(index)?.id()),
            None => None,
        };
        self.selected = selected;
        self.events.emit(LayerEvent::SelectionChanged(selected));
        Ok(())
    }

    /// Select the layer with `id`.
    pub fn select_layer(&mut self, id: LayerId) -> Result<()> {
        let index = self.index_of(id).ok_or_else(|| {
            Error::Layer(LayerError::NotFound { id: id.to_string() })
        })?;
        self.select(Some(index))
    }

    pub fn set_stroke_color(&mut self, index: usize, color: Rgba) -> Result<()> {
        self.get_checked_mut(index)?.set_stroke_color(color);
        Ok(())
    }

    /// Push a new line width to every layer
    pub fn apply_line_width(&mut self, width: f64) {
        tracing::debug!("Applying line width {} to {} layers", width, self.len());
        for layer in &mut self.layers {
            layer.set_line_width(width);
        }
    }

    /// Ask for every layer to be drawn again, e.g. after the map region
    /// changed
    pub fn request_redraw_all(&self) {
        for layer in &self.layers {
            layer.request_redraw();
        }
    }

    pub fn get(&self, index: usize) -> Option<&DrawingLayer> {
        self.layers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DrawingLayer> {
        self.layers.get_mut(index)
    }

    pub fn layer_by_id(&self, id: LayerId) -> Option<&DrawingLayer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn layer_by_id_mut(&mut self, id: LayerId) -> Option<&mut DrawingLayer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.selected
    }

    /// Row of the selected layer
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.index_of(id))
    }

    pub fn selected_layer(&self) -> Option<&DrawingLayer> {
        self.selected.and_then(|id| self.layer_by_id(id))
    }

    pub fn selected_layer_mut(&mut self) -> Option<&mut DrawingLayer> {
        let id = self.selected?;
        self.layer_by_id_mut(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawingLayer> {
        self.layers.iter()
    }

    pub fn layers(&self) -> &[DrawingLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn get_checked(&self, index: usize) -> Result<&DrawingLayer> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }

    fn get_checked_mut(&mut self, index: usize) -> Result<&mut DrawingLayer> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }
}

impl<'a> IntoIterator for &'a LayerCollection {
    type Item = &'a DrawingLayer;
    type IntoIter = std::slice::Iter<'a, DrawingLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
