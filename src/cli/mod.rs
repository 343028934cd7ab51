pub mod completions;
pub mod convert;
pub mod formats;
pub mod info;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Manifest;
use crate::error::{EmbError, Result};
use crate::output::{display_path, plural, Printer};
use crate::registry::FormatRegistry;
use crate::types::StitchPattern;

/// embkit - Embroidery pattern converter
#[derive(Parser, Debug)]
#[command(name = "embkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Manifest to load instead of ./embkit.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a pattern from one format to another
    Convert(convert::ConvertArgs),

    /// Show threads, stitch counts and bounds of a pattern
    Info(info::InfoArgs),

    /// List supported formats
    Formats(formats::FormatsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the manifest named on the command line, or discover one in the
/// working directory.
pub fn load_manifest(config: Option<&Path>) -> Result<Manifest> {
    match config {
        Some(path) => Manifest::load(path),
        None => Manifest::discover(Path::new(".")),
    }
}

/// File name used for registry lookup.
fn lookup_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Decode a pattern file with the reader its extension selects.
pub fn decode_file(registry: &FormatRegistry, path: &Path, printer: &Printer) -> Result<StitchPattern> {
    let reader = registry
        .resolve_reader(&lookup_name(path))
        .ok_or_else(|| EmbError::Unsupported {
            path: path.to_path_buf(),
            help: Some("Run `embkit formats` to list readable formats".to_string()),
        })?;

    let file = File::open(path).map_err(|e| EmbError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open pattern: {}", e),
    })?;

    let mut pattern = StitchPattern::new();
    if let Err(e) = reader.read(&mut pattern, &mut BufReader::new(file)) {
        printer.error(
            "Failed",
            &format!(
                "{} after {}",
                display_path(path),
                plural(pattern.len(), "stitch", "stitches")
            ),
        );
        return Err(e);
    }

    printer.status(
        "Decoded",
        &format!(
            "{} ({}, {})",
            display_path(path),
            plural(pattern.threads().len(), "thread", "threads"),
            plural(pattern.len(), "stitch", "stitches"),
        ),
    );
    Ok(pattern)
}
