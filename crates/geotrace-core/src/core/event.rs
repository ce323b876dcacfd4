//! Event system for layer notifications
//!
//! Provides:
//! - Event types emitted by drawing layers and the layer collection
//! - Event dispatcher delivering events synchronously to subscribers
//! - Subscription handles and category filters
//!
//! Dispatch happens on the calling thread, in subscription order, before
//! the emitting operation returns.

use crate::data::LayerId;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Layer event types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerEvent {
    /// A layer was appended to the collection
    LayerAdded(LayerId),
    /// A layer was removed from the collection
    LayerRemoved(LayerId),
    /// The selected layer changed (`None` when the selection was cleared)
    SelectionChanged(Option<LayerId>),
    /// A layer was shown or hidden
    VisibilityToggled {
        /// The toggled layer.
        layer: LayerId,
        /// Visibility after the toggle.
        visible: bool,
    },
    /// A coordinate was appended to or removed from a layer's path
    CoordinateMutated {
        /// The mutated layer.
        layer: LayerId,
        /// Number of coordinates after the mutation.
        len: usize,
    },
    /// A layer's appearance changed and it must be drawn again
    RedrawRequested(LayerId),
}

impl LayerEvent {
    /// Category used for filtering
    pub fn category(&self) -> EventCategory {
        match self {
            LayerEvent::LayerAdded(_) | LayerEvent::LayerRemoved(_) => EventCategory::Structure,
            LayerEvent::SelectionChanged(_) => EventCategory::Selection,
            LayerEvent::VisibilityToggled { .. }
            | LayerEvent::CoordinateMutated { .. }
            | LayerEvent::RedrawRequested(_) => EventCategory::Display,
        }
    }

    /// The layer the event is about, if any
    pub fn layer(&self) -> Option<LayerId> {
        match *self {
            LayerEvent::LayerAdded(id)
            | LayerEvent::LayerRemoved(id)
            | LayerEvent::RedrawRequested(id) => Some(id),
            LayerEvent::SelectionChanged(id) => id,
            LayerEvent::VisibilityToggled { layer, .. }
            | LayerEvent::CoordinateMutated { layer, .. } => Some(layer),
        }
    }
}

impl std::fmt::Display for LayerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerEvent::LayerAdded(id) => write!(f, "Added {}", id),
            LayerEvent::LayerRemoved(id) => write!(f, "Removed {}", id),
            LayerEvent::SelectionChanged(Some(id)) => write!(f, "Selected {}", id),
            LayerEvent::SelectionChanged(None) => write!(f, "Selection cleared"),
            LayerEvent::VisibilityToggled { layer, visible } => {
                write!(f, "{} {}", layer, if *visible { "shown" } else { "hidden" })
            }
            LayerEvent::CoordinateMutated { layer, len } => {
                write!(f, "{} now has {} coordinates", layer, len)
            }
            LayerEvent::RedrawRequested(id) => write!(f, "Redraw {}", id),
        }
    }
}

/// Broad grouping of layer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Layers added to or removed from the collection.
    Structure,
    /// Selection changes.
    Selection,
    /// Anything that requires the map surface to redraw.
    Display,
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &LayerEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type EventHandler = Rc<dyn Fn(&LayerEvent)>;

/// Event dispatcher for publishing layer events to subscribers.
///
/// Cloning is cheap and yields a handle to the same subscriber list, so a
/// collection can hand its dispatcher to every layer it owns.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Rc<RefCell<Vec<(SubscriptionId, EventFilter, EventHandler)>>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&LayerEvent) + 'static,
    {
        self.subscribe_filtered(EventFilter::All, handler)
    }

    /// Subscribe to events matching `filter`
    pub fn subscribe_filtered<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&LayerEvent) + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers
            .borrow_mut()
            .push((id, filter, Rc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sub, _, _)| *sub != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Publish an event to all matching subscribers.
    ///
    /// Handlers may subscribe or unsubscribe while being called; such
    /// changes take effect from the next event.
    pub fn emit(&self, event: LayerEvent) {
        let targets: Vec<EventHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, filter, _)| filter.matches(&event))
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();
        tracing::trace!("Dispatching '{}' to {} handlers", event, targets.len());
        for handler in targets {
            handler(&event);
        }
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
