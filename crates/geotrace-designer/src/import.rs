//! # Coordinate File Import/Export
//!
//! Reads coordinate sets from user-selected text files and writes them
//! back out in the export format.
//!
//! - Import never fails loudly: an unreadable file (missing, not UTF-8)
//!   yields `None`, and rows that do not decode are dropped.
//! - Export writes the whole file or nothing. Failures are returned to the
//!   caller so they can be shown to the user.

use crate::coordinate_codec;
use geotrace_core::{Coordinate, Error, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File extension used for exported coordinate files
pub const EXPORT_EXTENSION: &str = "txt";

/// Coordinates read from a file, named after the file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedCoordinates {
    /// File name without directory and extension
    pub name: String,
    /// Decoded coordinates in file order
    pub coordinates: Vec<Coordinate>,
}

/// Name a layer after the file it was imported from.
///
/// Returns the file stem, or `"Imported"` when the path has none.
pub fn layer_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "Imported".to_string())
}

/// Import the coordinates stored in `path`.
///
/// Returns `None` if the file cannot be read as UTF-8 text. A readable file
/// without any coordinate rows yields an empty coordinate list.
pub fn import_coordinates(path: &Path) -> Option<ImportedCoordinates> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!("Could not read {}: {}", path.display(), err);
            return None;
        }
    };

    let coordinates = coordinate_codec::decode_text(&contents);
    tracing::info!(
        "Imported {} coordinates from {}",
        coordinates.len(),
        path.display()
    );

    Some(ImportedCoordinates {
        name: layer_name_for(path),
        coordinates,
    })
}

/// Fallback file stem for layer names with nothing usable in them
const UNNAMED_EXPORT_STEM: &str = "Layer";

/// Reduce a layer name to a single file-name component.
///
/// Path separators, drive colons, characters Windows rejects and control
/// characters become `_`. Names that end up empty or made only of dots
/// become `Layer`.
pub fn export_file_stem(layer_name: &str) -> String {
    let stem: String = layer_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '<' | '>' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.chars().all(|c| c == '.') {
        UNNAMED_EXPORT_STEM.to_string()
    } else {
        stem
    }
}

/// Suggested export path for a layer inside `directory`
pub fn export_path_for(directory: &Path, layer_name: &str) -> PathBuf {
    directory.join(format!("{}.{}", export_file_stem(layer_name), EXPORT_EXTENSION))
}

/// Export paths inside `directory` for several layers at once.
///
/// Layer names need not be unique, so a name whose file is already taken
/// gets a numeric suffix: `trail.txt`, `trail-1.txt`, `trail-2.txt`.
/// Names are compared case-insensitively.
pub fn export_paths_for<'a, I>(directory: &Path, layer_names: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken = HashSet::new();
    layer_names
        .into_iter()
        .map(|name| {
            let stem = export_file_stem(name);
            let mut candidate = stem.clone();
            let mut suffix = 1;
            while !taken.insert(candidate.to_lowercase()) {
                candidate = format!("{}-{}", stem, suffix);
                suffix += 1;
            }
            directory.join(format!("{}.{}", candidate, EXPORT_EXTENSION))
        })
        .collect()
}

/// Write `coordinates` to `path` in the export format.
pub fn export_coordinates(coordinates: &[Coordinate], path: &Path) -> Result<()> {
    let contents = coordinate_codec::encode(coordinates);
    write_atomically(path, contents.as_bytes()).map_err(|source| {
        tracing::error!("Export to {} failed: {}", path.display(), source);
        Error::Export {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        "Exported {} coordinates to {}",
        coordinates.len(),
        path.display()
    );
    Ok(())
}

/// Replace `path` with `contents` so readers see either the old file or the
/// complete new one.
///
/// The data goes to a temporary sibling first and is renamed over the
/// destination once fully flushed.
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_name = format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        &uuid::Uuid::new_v4().simple().to_string()[..8]
    );
    let temp_path = path.with_file_name(temp_name);

    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
