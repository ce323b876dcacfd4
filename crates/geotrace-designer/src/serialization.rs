//! Serialization and deserialization for GeoTrace documents.
//!
//! A document is stored as one JSON blob holding every layer's name,
//! coordinates and stroke color plus the viewport rectangle. Floats are
//! written with enough digits to read back bit-for-bit.
//!
//! Line width and visibility are not part of a document: line width is a
//! process-wide preference and every layer is shown after loading.

use crate::collection::LayerCollection;
use crate::import::write_atomically;
use crate::layer::{DrawingLayer, StrokeDefaults};
use chrono::{DateTime, Utc};
use geotrace_core::{Coordinate, DocumentError, Error, Result, Rgba, ViewportRect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Document format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete document structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: String,
    pub metadata: DocumentMetadata,
    /// Required: data without a layer list is not a document
    pub layers: Vec<LayerRecord>,
    #[serde(default)]
    pub viewport: Option<ViewportRect>,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// One persisted layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub name: String,
    #[serde(default)]
    pub coordinates: Vec<CoordinateRecord>,
    #[serde(default)]
    pub stroke_color: Rgba,
}

/// A coordinate as stored on disk, independent of any map toolkit's point type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for CoordinateRecord {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

impl From<CoordinateRecord> for Coordinate {
    fn from(r: CoordinateRecord) -> Self {
        Coordinate::new(r.latitude, r.longitude)
    }
}

impl LayerRecord {
    pub fn from_layer(layer: &DrawingLayer) -> Self {
        Self {
            name: layer.name.clone(),
            coordinates: layer.coordinates().iter().copied().map(Into::into).collect(),
            stroke_color: layer.stroke_color(),
        }
    }

    /// Build a fresh layer; line width comes from `defaults`.
    pub fn to_layer(&self, defaults: &StrokeDefaults) -> DrawingLayer {
        let coordinates = self.coordinates.iter().copied().map(Into::into).collect();
        let defaults = StrokeDefaults {
            stroke_color: self.stroke_color,
            ..*defaults
        };
        DrawingLayer::with_coordinates(self.name.clone(), coordinates, &defaults)
    }

    fn is_finite(&self) -> bool {
        self.coordinates
            .iter()
            .all(|c| c.latitude.is_finite() && c.longitude.is_finite())
    }
}

impl DocumentFile {
    /// Create an empty document
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
            },
            layers: Vec::new(),
            viewport: None,
        }
    }

    /// Capture the layers of `collection` and the viewport
    pub fn from_collection(
        name: &str,
        collection: &LayerCollection,
        viewport: Option<ViewportRect>,
    ) -> Self {
        let mut document = Self::new(name);
        document.layers = collection.iter().map(LayerRecord::from_layer).collect();
        document.viewport = viewport;
        document
    }

    /// Recreate the stored layers in order
    pub fn to_layers(&self, defaults: &StrokeDefaults) -> Vec<DrawingLayer> {
        self.layers.iter().map(|r| r.to_layer(defaults)).collect()
    }

    /// Encode as a JSON blob.
    ///
    /// Fails if a coordinate or the viewport holds a non-finite value,
    /// since JSON cannot carry it back unchanged.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if let Some(record) = self.layers.iter().find(|r| !r.is_finite()) {
            return Err(DocumentError::Encode {
                reason: format!("layer '{}' has a non-finite coordinate", record.name),
            }
            .into());
        }
        if let Some(v) = &self.viewport {
            if ![v.x, v.y, v.width, v.height].iter().all(|n| n.is_finite()) {
                return Err(DocumentError::Encode {
                    reason: "viewport has a non-finite value".to_string(),
                }
                .into());
            }
        }

        serde_json::to_vec_pretty(self).map_err(|e| {
            DocumentError::Encode {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Decode a JSON blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            Error::from(DocumentError::Decode {
                reason: e.to_string(),
            })
        })
    }

    /// Decode a blob, falling back to a document with no layers and no
    /// viewport if it is empty, corrupt or foreign.
    pub fn decode_or_empty(bytes: &[u8]) -> Self {
        match Self::from_bytes(bytes) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Ignoring unreadable document data: {}", e);
                Self::new("Untitled")
            }
        }
    }

    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        write_atomically(path, &bytes)?;
        tracing::info!(
            "Saved document '{}' with {} layers to {}",
            self.metadata.name,
            self.layers.len(),
            path.display()
        );
        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let document = Self::from_bytes(&bytes)?;
        tracing::info!(
            "Loaded document '{}' with {} layers from {}",
            document.metadata.name,
            document.layers.len(),
            path.display()
        );
        Ok(document)
    }
}
