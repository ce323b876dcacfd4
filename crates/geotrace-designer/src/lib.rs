//! # GeoTrace Designer
//!
//! Drawing layers over a map: coordinate paths with undo-aware editing,
//! the layer collection of a document, CSV coordinate interchange and
//! document persistence.
//!
//! ## Core Components
//!
//! - **CSV Parser**: tokenizes file text into rows of fields
//! - **Coordinate Codec**: rows to coordinates, coordinates to export text
//! - **Drawing Layer**: one polyline with style, visibility and name
//! - **Layer Collection**: ordered layers with single selection
//! - **History**: bounded undo/redo stacks of reversible layer commands
//! - **Persistence**: the document blob (layers plus viewport)
//! - **Document State**: one open document wired to its collaborators
//!
//! ## Architecture
//!
//! ```text
//! DocumentState
//!   ├── LayerCollection ── DrawingLayer* ──> EventDispatcher
//!   │                           ├──> UndoSink (UndoRedoManager, weak)
//!   │                           └──> Projection (weak)
//!   ├── UndoRedoManager (LayerCommand history)
//!   └── DocumentFile (save/load)
//!
//! import:  file text -> parse_csv -> decode_rows -> DrawingLayer
//! export:  DrawingLayer -> encode -> .txt (atomic write)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use geotrace_designer::{DocumentState, InteractionMode};
//! use geotrace_core::Coordinate;
//!
//! let mut document = DocumentState::default();
//! document.ensure_initial_layer();
//! document.set_mode(InteractionMode::Drawing);
//! document.add_coordinate_at_cursor(Coordinate::new(45.0, -122.5));
//!
//! assert!(document.undo());
//! assert!(document.collection.get(0).unwrap().is_empty());
//! ```

pub mod collection;
pub mod commands;
pub mod coordinate_codec;
pub mod csv_parser;
pub mod designer_state;
pub mod history;
pub mod import;
pub mod layer;
pub mod serialization;

pub use collection::LayerCollection;
pub use commands::{LayerCommand, UndoSink, ADD_COORDINATE, REMOVE_COORDINATE};
pub use coordinate_codec::{decode_rows, decode_text, encode, EXPORT_HEADER};
pub use csv_parser::parse_csv;
pub use designer_state::{DocumentState, InteractionMode};
pub use history::{HistoryEntry, UndoPhase, UndoRedoManager, DEFAULT_HISTORY_CAPACITY};
pub use import::{
    export_coordinates, export_file_stem, export_path_for, export_paths_for, import_coordinates,
    ImportedCoordinates, EXPORT_EXTENSION,
};
pub use layer::{DrawingLayer, Polyline, StrokeDefaults, DEFAULT_LINE_WIDTH};
pub use serialization::{CoordinateRecord, DocumentFile, DocumentMetadata, LayerRecord};
