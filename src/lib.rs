//! # GeoTrace
//!
//! Draw polyline annotations over a map, edit them with undo/redo, and
//! exchange their coordinates as CSV text.
//!
//! ## Architecture
//!
//! GeoTrace is organized as a workspace with multiple crates:
//!
//! 1. **geotrace-core** - Coordinates, colors, layer events, projection trait, errors
//! 2. **geotrace-designer** - Drawing layers, layer collection, undo history,
//!    CSV interchange and document persistence
//! 3. **geotrace-settings** - Process-wide preferences and their storage
//! 4. **geotrace** - Workspace of open documents, logging and the command line tool
//!
//! ## Features
//!
//! - **Drawing Layers**: ordered coordinate paths with stroke color, width and visibility
//! - **Undo/Redo**: every coordinate edit is reversible
//! - **CSV Import/Export**: lenient import, 3-decimal `latitude,longitude` export
//! - **Documents**: exact JSON persistence of layers and viewport
//! - **Preferences**: line width shared by every open document

pub mod cli;
pub mod workspace;

pub use geotrace_core::{
    Coordinate, Error, EventDispatcher, LayerEvent, LayerId, Projection, Result, Rgba,
    ViewportRect,
};
pub use geotrace_designer::{
    DocumentFile, DocumentState, DrawingLayer, InteractionMode, LayerCollection, StrokeDefaults,
    UndoRedoManager,
};
pub use geotrace_settings::{Preferences, PreferencesController, PreferencesStore};
pub use workspace::Workspace;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - INFO level unless RUST_LOG says otherwise
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(tracing::Level::INFO, LogFormat::Pretty)
}

/// Initialize logging with an explicit default level and format.
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init_logging_with(level: tracing::Level, format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
