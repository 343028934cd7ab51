//! Info command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::decode_file;
use crate::config::Manifest;
use crate::error::Result;
use crate::output::Printer;
use crate::types::{BoundingBox, MovementKind, StitchPattern, Thread};

/// Show threads, stitch counts and bounds of a pattern
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Pattern file to inspect
    #[arg(required = true)]
    pub file: PathBuf,

    /// Print a JSON summary to stdout
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable pattern summary.
#[derive(Debug, Serialize)]
pub struct PatternSummary<'a> {
    pub threads: &'a [Thread],
    pub stitches: usize,
    pub kinds: BTreeMap<&'static str, usize>,
    pub runs: usize,
    pub bounds: BoundingBox,
}

impl<'a> PatternSummary<'a> {
    pub fn new(pattern: &'a StitchPattern) -> Self {
        let kinds = MovementKind::ALL
            .iter()
            .map(|&kind| (kind.name(), pattern.count_kind(kind)))
            .filter(|&(_, count)| count > 0)
            .collect();

        Self {
            threads: pattern.threads(),
            stitches: pattern.len(),
            kinds,
            runs: pattern.stitch_runs().len(),
            bounds: pattern.bounding_box(),
        }
    }
}

pub fn run(args: InfoArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let registry = manifest.registry();
    let pattern = decode_file(&registry, &args.file, printer)?;
    let summary = PatternSummary::new(&pattern);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for (i, thread) in summary.threads.iter().enumerate() {
        println!("thread {}: {}", i + 1, thread);
    }
    for (kind, count) in &summary.kinds {
        println!("{}: {}", kind, count);
    }
    let b = summary.bounds;
    println!(
        "bounds: {} {} {} {} ({})",
        b.left,
        b.top,
        b.width,
        b.height,
        printer.dim(&format!("{} run(s)", summary.runs))
    );
    Ok(())
}
