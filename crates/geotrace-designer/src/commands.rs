use crate::collection::LayerCollection;
use geotrace_core::{Coordinate, Error, LayerError, LayerId, Result};

/// Label recorded for appending a coordinate
pub const ADD_COORDINATE: &str = "Add Coordinate";
/// Label recorded for removing a coordinate
pub const REMOVE_COORDINATE: &str = "Remove Coordinate";

/// A reversible edit of a layer's coordinate path.
///
/// Commands are recorded as the *inverse* of the edit that just happened:
/// appending a coordinate records `RemoveLastCoordinate`, removing one
/// records `AppendCoordinate`. Applying a command performs the edit through
/// the layer, which in turn records the next inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerCommand {
    /// Append `coordinate` to the end of the layer's path
    AppendCoordinate {
        layer: LayerId,
        coordinate: Coordinate,
    },
    /// Drop the last coordinate of the layer's path.
    ///
    /// `coordinate` is the value expected at the tail; it is kept so the
    /// inverse can put it back. The tail is removed whatever its value.
    RemoveLastCoordinate {
        layer: LayerId,
        coordinate: Coordinate,
    },
}

impl LayerCommand {
    /// The layer this command edits
    pub fn layer(&self) -> LayerId {
        match *self {
            LayerCommand::AppendCoordinate { layer, .. }
            | LayerCommand::RemoveLastCoordinate { layer, .. } => layer,
        }
    }

    /// The coordinate carried by the command
    pub fn coordinate(&self) -> Coordinate {
        match *self {
            LayerCommand::AppendCoordinate { coordinate, .. }
            | LayerCommand::RemoveLastCoordinate { coordinate, .. } => coordinate,
        }
    }

    /// Perform the edit on the matching layer of `collection`.
    pub fn apply(&self, collection: &mut LayerCollection) -> Result<()> {
        let id = self.layer();
        let layer = collection.layer_by_id_mut(id).ok_or_else(|| {
            Error::Layer(LayerError::NotFound {
                id: id.to_string(),
            })
        })?;

        match *self {
            LayerCommand::AppendCoordinate { coordinate, .. } => layer.add_coordinate(coordinate),
            LayerCommand::RemoveLastCoordinate { coordinate, .. } => {
                layer.remove_coordinate(coordinate);
            }
        }
        Ok(())
    }
}

/// Receiver of inverse commands produced by layer edits.
///
/// Implemented by [`crate::history::UndoRedoManager`]; layers only hold a
/// weak handle to their sink.
pub trait UndoSink {
    /// Record `command` under the user-visible `action_name`.
    fn record(&mut self, command: LayerCommand, action_name: &str);

    /// True while an undo is being replayed.
    ///
    /// Layers use this to label the recorded inverse with the action the
    /// user perceives.
    fn is_undoing(&self) -> bool;
}
