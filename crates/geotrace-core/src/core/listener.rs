//! Layer listener interface
//!
//! Defines a listener trait with one callback per kind of layer event, for
//! owners of a rendering surface that prefer distinct callbacks over a
//! single event match.

use crate::core::event::{EventDispatcher, LayerEvent, SubscriptionId};
use crate::data::LayerId;
use std::rc::Rc;

/// Listener trait for layer events
///
/// Implement this trait to receive notifications of collection and layer
/// changes. Every method has an empty default.
pub trait LayerListener {
    /// Called after a layer was added to the collection
    fn on_layer_added(&self, _layer: LayerId) {}

    /// Called after a layer was removed from the collection
    fn on_layer_removed(&self, _layer: LayerId) {}

    /// Called when the selected layer changes
    fn on_selection_changed(&self, _selected: Option<LayerId>) {}

    /// Called when a layer is shown or hidden
    fn on_visibility_toggled(&self, _layer: LayerId, _visible: bool) {}

    /// Called when a layer's coordinate path changed
    fn on_coordinates_changed(&self, _layer: LayerId, _len: usize) {}

    /// Called when a layer must be drawn again
    fn on_redraw_requested(&self, _layer: LayerId) {}
}

/// Route a single event to the matching listener callback
pub fn deliver(listener: &dyn LayerListener, event: &LayerEvent) {
    match *event {
        LayerEvent::LayerAdded(id) => listener.on_layer_added(id),
        LayerEvent::LayerRemoved(id) => listener.on_layer_removed(id),
        LayerEvent::SelectionChanged(selected) => listener.on_selection_changed(selected),
        LayerEvent::VisibilityToggled { layer, visible } => {
            listener.on_visibility_toggled(layer, visible)
        }
        LayerEvent::CoordinateMutated { layer, len } => {
            listener.on_coordinates_changed(layer, len)
        }
        LayerEvent::RedrawRequested(id) => listener.on_redraw_requested(id),
    }
}

impl EventDispatcher {
    /// Register a [`LayerListener`]; it is kept alive by the dispatcher
    /// until unsubscribed.
    pub fn attach_listener(&self, listener: Rc<dyn LayerListener>) -> SubscriptionId {
        self.subscribe(move |event| deliver(listener.as_ref(), event))
    }
}
