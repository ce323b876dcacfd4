//! Error handling for GeoTrace
//!
//! Provides the error types shared by all layers of the application:
//! - Layer errors (index and identity lookups)
//! - Interchange errors (coordinate export)
//! - Document errors (persisted blob encoding)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Import and document loading deliberately do not surface errors to
//! callers; they degrade to empty results instead.

use std::path::PathBuf;
use thiserror::Error;

/// Layer error type
///
/// Represents lookups that do not resolve to a layer of the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// No layer at the requested position
    #[error("Layer index {index} out of range (collection has {len} layers)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of layers at the time of the call.
        len: usize,
    },

    /// No layer with the requested identity
    #[error("Layer {id} not found")]
    NotFound {
        /// Display form of the missing layer id.
        id: String,
    },
}

/// Document error type
///
/// Represents failures to encode a document into its persisted form.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be encoded
    #[error("Failed to encode document: {reason}")]
    Encode {
        /// The reason encoding failed.
        reason: String,
    },

    /// The persisted bytes could not be decoded
    #[error("Failed to decode document: {reason}")]
    Decode {
        /// The reason decoding failed.
        reason: String,
    },
}

/// Main error type for GeoTrace
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Layer lookup error
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// Document encoding error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Writing an export file failed
    #[error("Failed to export coordinates to {}: {source}", path.display())]
    Export {
        /// Destination of the export.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Shorthand for [`LayerError::IndexOutOfRange`]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::Layer(LayerError::IndexOutOfRange { index, len })
    }

    /// Check if this is a layer lookup error
    pub fn is_layer_error(&self) -> bool {
        matches!(self, Error::Layer(_))
    }

    /// Check if this is an export failure
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
