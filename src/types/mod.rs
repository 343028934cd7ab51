//! Core types for the stitch pattern model.

mod pattern;
mod stitch;
mod thread;

pub use pattern::{BoundingBox, StitchPattern, StitchRun};
pub use stitch::{MovementKind, Stitch};
pub use thread::{hex_color, parse_color, Thread};
