//! # Drawing Layer
//!
//! A drawing layer is one polyline annotation: an ordered coordinate path
//! plus stroke style, visibility and a name.
//!
//! The path is only edited at its tail. Every edit hands its inverse to the
//! attached undo sink, so undoing an append pops the tail and undoing a pop
//! appends the removed coordinate again.
//!
//! A layer never computes screen positions itself; it asks the attached
//! projection for each point when a polyline is requested.

use crate::commands::{LayerCommand, UndoSink, ADD_COORDINATE, REMOVE_COORDINATE};
use geotrace_core::{
    Coordinate, EventDispatcher, LayerEvent, LayerId, Projection, Rgba, ScreenPoint,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

/// Default line width for new layers
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Stroke settings handed to every newly created layer.
///
/// Layers copy these values at creation time and are only updated later by
/// an explicit push (see [`crate::LayerCollection::apply_line_width`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefaults {
    pub line_width: f64,
    pub stroke_color: Rgba,
}

impl Default for StrokeDefaults {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            stroke_color: Rgba::GREEN,
        }
    }
}

impl StrokeDefaults {
    /// Defaults with the given line width and the standard color
    pub fn with_line_width(line_width: f64) -> Self {
        Self {
            line_width,
            ..Self::default()
        }
    }
}

/// Screen-space polyline ready for stroking.
///
/// The path is open: the last point is not joined back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<ScreenPoint>,
    pub stroke_color: Rgba,
    pub line_width: f64,
}

/// Generate a random layer name such as `Layer-3f2a9c01`
pub fn random_layer_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("Layer-{}", &id[..8])
}

/// One polyline annotation drawn over the map.
pub struct DrawingLayer {
    id: LayerId,
    pub name: String,
    coordinates: Vec<Coordinate>,
    stroke_color: Rgba,
    line_width: f64,
    visible: bool,
    projection: Option<Weak<dyn Projection>>,
    undo_sink: Option<Weak<RefCell<dyn UndoSink>>>,
    events: Option<EventDispatcher>,
}

impl DrawingLayer {
    /// Create an empty, visible layer with a random name.
    pub fn new(defaults: &StrokeDefaults) -> Self {
        Self::with_coordinates(random_layer_name(), Vec::new(), defaults)
    }

    /// Create a layer holding an initial path, as produced by an import.
    pub fn with_coordinates(
        name: impl Into<String>,
        coordinates: Vec<Coordinate>,
        defaults: &StrokeDefaults,
    ) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            coordinates,
            stroke_color: defaults.stroke_color,
            line_width: defaults.line_width,
            visible: true,
            projection: None,
            undo_sink: None,
            events: None,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// The tail of the path, i.e. the coordinate an undo of the last add
    /// would remove
    pub fn last_coordinate(&self) -> Option<Coordinate> {
        self.coordinates.last().copied()
    }

    pub fn stroke_color(&self) -> Rgba {
        self.stroke_color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Attach the projection used by [`DrawingLayer::render_path`]
    pub fn set_projection(&mut self, projection: Weak<dyn Projection>) {
        self.projection = Some(projection);
    }

    /// Attach the sink that receives inverse commands
    pub fn set_undo_sink(&mut self, sink: Weak<RefCell<dyn UndoSink>>) {
        self.undo_sink = Some(sink);
    }

    /// Attach the dispatcher that receives this layer's events
    pub fn set_event_dispatcher(&mut self, events: EventDispatcher) {
        self.events = Some(events);
    }

    /// Drop every collaborator handle. Called when the layer leaves its
    /// collection.
    pub fn detach(&mut self) {
        self.projection = None;
        self.undo_sink = None;
        self.events = None;
    }

    pub fn has_undo_sink(&self) -> bool {
        self.undo_sink
            .as_ref()
            .is_some_and(|sink| sink.strong_count() > 0)
    }

    /// Append `coordinate` to the path.
    ///
    /// Records the inverse "remove last coordinate" with the undo sink and
    /// announces the change.
    pub fn add_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinates.push(coordinate);
        tracing::debug!(
            "{} ({}): added {} ({} coordinates)",
            self.name,
            self.id,
            coordinate,
            self.coordinates.len()
        );

        self.record_inverse(
            LayerCommand::RemoveLastCoordinate {
                layer: self.id,
                coordinate,
            },
            ADD_COORDINATE,
            REMOVE_COORDINATE,
        );
        self.emit(LayerEvent::CoordinateMutated {
            layer: self.id,
            len: self.coordinates.len(),
        });
    }

    /// Remove the last coordinate of the path.
    ///
    /// `coordinate` must be the current tail; it is only used to build the
    /// inverse "add coordinate" command. The tail is dropped regardless of
    /// its value. On an empty path nothing happens and nothing is recorded.
    pub fn remove_coordinate(&mut self, coordinate: Coordinate) {
        let Some(removed) = self.coordinates.pop() else {
            tracing::warn!("{} ({}): no coordinate to remove", self.name, self.id);
            return;
        };
        if removed != coordinate {
            tracing::debug!(
                "{} ({}): removed tail {} differs from expected {}",
                self.name,
                self.id,
                removed,
                coordinate
            );
        }
        tracing::debug!(
            "{} ({}): removed {} ({} coordinates)",
            self.name,
            self.id,
            removed,
            self.coordinates.len()
        );

        self.record_inverse(
            LayerCommand::AppendCoordinate {
                layer: self.id,
                coordinate,
            },
            REMOVE_COORDINATE,
            ADD_COORDINATE,
        );
        self.emit(LayerEvent::CoordinateMutated {
            layer: self.id,
            len: self.coordinates.len(),
        });
    }

    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke_color = color;
        self.request_redraw();
    }

    /// Set the stroke width. Non-positive or non-finite widths are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        if !(width.is_finite() && width > 0.0) {
            tracing::warn!("{}: ignoring invalid line width {}", self.name, width);
            return;
        }
        self.line_width = width;
        self.request_redraw();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.request_redraw();
    }

    /// Ask the rendering side to draw this layer again
    pub fn request_redraw(&self) {
        self.emit(LayerEvent::RedrawRequested(self.id));
    }

    /// Project the path to screen space.
    ///
    /// Coordinates the projection cannot place are skipped. Returns `None`
    /// when the layer is hidden, no projection is attached (or it is gone),
    /// or fewer than two points remain.
    pub fn render_path(&self) -> Option<Polyline> {
        if !self.visible {
            return None;
        }
        let projection = self.projection.as_ref()?.upgrade()?;

        let points: Vec<ScreenPoint> = self
            .coordinates
            .iter()
            .filter_map(|coordinate| projection.to_screen(*coordinate))
            .collect();
        if points.len() < 2 {
            return None;
        }

        Some(Polyline {
            points,
            stroke_color: self.stroke_color,
            line_width: self.line_width,
        })
    }

    fn record_inverse(&self, command: LayerCommand, label: &str, undoing_label: &str) {
        let Some(sink) = self.undo_sink.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let Ok(mut sink) = sink.try_borrow_mut() else {
            tracing::warn!("{}: undo history busy, edit not recorded", self.name);
            return;
        };
        let action_name = if sink.is_undoing() {
            undoing_label
        } else {
            label
        };
        sink.record(command, action_name);
    }

    fn emit(&self, event: LayerEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

impl fmt::Debug for DrawingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingLayer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("coordinates", &self.coordinates)
            .field("stroke_color", &self.stroke_color)
            .field("line_width", &self.line_width)
            .field("visible", &self.visible)
            .field("has_projection", &self.projection.is_some())
            .field("has_undo_sink", &self.undo_sink.is_some())
            .finish()
    }
}
