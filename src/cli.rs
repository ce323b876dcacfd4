//! Command line interface.
//!
//! Drives the document core headlessly: build documents from CSV files,
//! export their layers, inspect stored documents and edit preferences.

use crate::workspace::Workspace;
use crate::{init_logging_with, LogFormat, BUILD_DATE, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geotrace_core::Coordinate;
use geotrace_designer::{export_paths_for, DocumentFile, DocumentState};
use geotrace_settings::PreferencesStore;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "geotrace")]
#[command(about = "Draw, edit and exchange geographic polyline annotations")]
pub struct Cli {
    /// Preferences file (.json or .toml) instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    preferences: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write log events as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a document with one layer per CSV file.
    Import {
        #[arg(value_name = "CSV", required = true)]
        files: Vec<PathBuf>,
        /// Document file to write
        #[arg(short, long, value_name = "DOCUMENT")]
        output: PathBuf,
        /// Document name (defaults to the output file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Export layers of a document as coordinate text files.
    Export {
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,
        /// Only export the layer at this position (0-based)
        #[arg(long)]
        layer: Option<usize>,
        /// Directory receiving one .txt file per layer
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },
    /// Print a summary of a document.
    Inspect {
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change preferences.
    Preferences {
        /// New line width for drawing layers
        #[arg(long)]
        line_width: Option<f64>,
    },
    /// Print version and build date.
    Version,
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    name: String,
    version: String,
    viewport: Option<ViewportOutput>,
    layers: Vec<LayerOutput>,
}

#[derive(Debug, Serialize)]
struct ViewportOutput {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    zoom_level: Option<i32>,
}

#[derive(Debug, Serialize)]
struct LayerOutput {
    name: String,
    coordinates: usize,
    stroke_color: String,
    out_of_range: usize,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging_with(level, format)?;

    match cli.command {
        Commands::Import {
            files,
            output,
            name,
        } => run_import(&workspace(cli.preferences)?, &files, &output, name),
        Commands::Export {
            document,
            layer,
            output_dir,
        } => run_export(&workspace(cli.preferences)?, &document, layer, &output_dir),
        Commands::Inspect { document, json } => run_inspect(&document, json),
        Commands::Preferences { line_width } => {
            run_preferences(&workspace(cli.preferences)?, line_width)
        }
        Commands::Version => {
            println!("geotrace {} (built {})", VERSION, BUILD_DATE);
            Ok(())
        }
    }
}

fn workspace(preferences: Option<PathBuf>) -> Result<Workspace> {
    let store = match preferences {
        Some(path) => PreferencesStore::with_path(path),
        None => PreferencesStore::new().context("failed to locate preferences")?,
    };
    Ok(Workspace::load(store))
}

fn run_import(
    workspace: &Workspace,
    files: &[PathBuf],
    output: &Path,
    name: Option<String>,
) -> Result<()> {
    let mut document = DocumentState::new(workspace.stroke_defaults());
    document.design_name = name.unwrap_or_else(|| {
        output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    for file in files {
        if document.import_file(file).is_none() {
            bail!("could not read {}", file.display());
        }
        if let Some(layer) = document.collection.selected_layer() {
            println!("{}: {} coordinates", layer.name, layer.len());
        }
    }

    document
        .save_to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("saved {}", output.display());
    Ok(())
}

fn run_export(
    workspace: &Workspace,
    path: &Path,
    layer: Option<usize>,
    output_dir: &Path,
) -> Result<()> {
    let mut document = DocumentState::new(workspace.stroke_defaults());
    document
        .load_from_file(path)
        .with_context(|| format!("failed to open document {}", path.display()))?;

    let indices: Vec<usize> = match layer {
        Some(index) if index >= document.collection.len() => bail!(
            "layer {} does not exist ({} layers)",
            index,
            document.collection.len()
        ),
        Some(index) => vec![index],
        None => (0..document.collection.len()).collect(),
    };

    let names: Vec<&str> = indices
        .iter()
        .filter_map(|&index| document.collection.get(index))
        .map(|layer| layer.name.as_str())
        .collect();
    let targets = export_paths_for(output_dir, names);

    for (index, target) in indices.into_iter().zip(targets) {
        document.export_layer(index, &target)?;
        println!("{}", target.display());
    }
    Ok(())
}

fn run_inspect(path: &Path, json: bool) -> Result<()> {
    let document = DocumentFile::load_from_file(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;

    let payload = InspectOutput {
        name: document.metadata.name.clone(),
        version: document.version.clone(),
        viewport: document.viewport.map(|v| ViewportOutput {
            x: v.x,
            y: v.y,
            width: v.width,
            height: v.height,
            zoom_level: v.zoom_level(),
        }),
        layers: document
            .layers
            .iter()
            .map(|layer| LayerOutput {
                name: layer.name.clone(),
                coordinates: layer.coordinates.len(),
                stroke_color: layer.stroke_color.to_hex(),
                out_of_range: layer
                    .coordinates
                    .iter()
                    .filter(|c| !Coordinate::from(**c).is_in_range())
                    .count(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{} (format {})", payload.name, payload.version);
    match &payload.viewport {
        Some(v) => println!(
            "viewport: {} {} {} x {} (zoom {})",
            v.x,
            v.y,
            v.width,
            v.height,
            v.zoom_level
                .map(|z| z.to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        None => println!("viewport: none"),
    }
    for layer in &payload.layers {
        println!(
            "{}: {} coordinates, {}",
            layer.name, layer.coordinates, layer.stroke_color
        );
        if layer.out_of_range > 0 {
            println!("  {} coordinates out of range", layer.out_of_range);
        }
    }
    Ok(())
}

fn run_preferences(workspace: &Workspace, line_width: Option<f64>) -> Result<()> {
    if let Some(width) = line_width {
        workspace
            .set_line_width(width)
            .context("invalid line width")?;
        workspace
            .close_preferences()
            .context("failed to save preferences")?;
    }
    println!("line_width = {}", workspace.preferences().line_width());
    Ok(())
}
