//! Convert command implementation.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use super::{decode_file, lookup_name};
use crate::config::Manifest;
use crate::error::{EmbError, Result};
use crate::output::{display_path, Printer};

/// Convert a pattern from one format to another
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Pattern to read
    #[arg(required = true)]
    pub input: PathBuf,

    /// Pattern to write; its extension selects the format
    #[arg(required = true)]
    pub output: PathBuf,
}

pub fn run(args: ConvertArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let registry = manifest.registry();

    // Fail on an unwritable format before doing any decoding.
    let writer = registry
        .resolve_writer(&lookup_name(&args.output))
        .ok_or_else(|| EmbError::Unsupported {
            path: args.output.clone(),
            help: Some("Run `embkit formats` to list writable formats".to_string()),
        })?;

    let pattern = decode_file(&registry, &args.input, printer)?;

    let output_path = manifest.output_path(&args.output);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EmbError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let file = File::create(&output_path).map_err(|e| EmbError::Io {
        path: output_path.clone(),
        message: format!("Failed to create file: {}", e),
    })?;
    let mut out = BufWriter::new(file);
    writer.write(&pattern, &mut out)?;
    out.flush()?;

    printer.status("Wrote", &display_path(&output_path));
    Ok(())
}
