//! embkit - Embroidery pattern conversion
//!
//! A library for reading and writing embroidery stitch patterns through a
//! registry of file formats, each exposing independent read and write
//! capabilities over a vendor-neutral pattern model.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod output;
pub mod registry;
pub mod svg;
pub mod types;

pub use cancel::CancelToken;
pub use config::Manifest;
pub use error::{EmbError, Result};
pub use format::{Format, Reader, Writer};
pub use registry::{extension_of, FormatRegistry, RegistryBuilder};
pub use svg::{ColorChangeKind, SvgFormat, SvgOptions};
pub use types::{BoundingBox, MovementKind, Stitch, StitchPattern, StitchRun, Thread};
