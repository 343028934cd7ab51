//! Formats command implementation.

use clap::Args;

use crate::config::Manifest;
use crate::error::Result;
use crate::format::Format;

/// List supported formats
#[derive(Args, Debug)]
pub struct FormatsArgs {}

/// One line per format: extensions, capabilities, name.
pub fn describe(format: &dyn Format) -> String {
    let read = if format.reader().is_some() { 'r' } else { '-' };
    let write = if format.writer().is_some() { 'w' } else { '-' };
    let exts: Vec<String> = format.extensions().iter().map(|e| format!(".{}", e)).collect();

    let mut line = format!("{:<12} {}{}  {}", exts.join(" "), read, write, format.name());
    if let Some(mime) = format.mime() {
        line.push_str(&format!(" ({})", mime));
    }
    line
}

pub fn run(_args: FormatsArgs, manifest: &Manifest) -> Result<()> {
    for format in manifest.registry().formats() {
        println!("{}", describe(format));
    }
    Ok(())
}
