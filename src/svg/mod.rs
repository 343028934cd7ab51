//! SVG format support.
//!
//! Reading walks the document's `<path>` and `<polyline>` elements and turns
//! their straight-line commands into stitches, one thread per distinct
//! stroke colour. Writing emits one stroked `<path>` per stitch run, sized
//! to the pattern's bounding box.
//!
//! # Usage
//!
//! ```ignore
//! use embkit::format::{Reader, Writer};
//! use embkit::svg::SvgFormat;
//!
//! let mut pattern = StitchPattern::new();
//! SvgFormat::default().read(&mut pattern, &mut File::open("rose.svg")?)?;
//! SvgFormat::default().write(&pattern, &mut File::create("copy.svg")?)?;
//! ```

mod decode;
pub mod element;
mod encode;
pub mod path;

use std::io::{BufReader, Read, Write};

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::format::{Format, Reader, Writer};
use crate::types::{MovementKind, StitchPattern};

pub use decode::PatternDecoder;
pub use element::{ElementAdapter, ElementContext, PathReceiver};
pub use encode::{path_data, write_svg};
pub use path::{Operands, ParseStatus, PathParser, SVG_PATH_COMMANDS};

pub const MIME: &str = "image/svg+xml";
pub const EXT: &str = "svg";

/// Stitch emitted where the stroke colour changes. Both kinds advance the
/// pattern to the next thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChangeKind {
    #[default]
    Stop,
    ColorChange,
}

impl From<ColorChangeKind> for MovementKind {
    fn from(kind: ColorChangeKind) -> Self {
        match kind {
            ColorChangeKind::Stop => MovementKind::Stop,
            ColorChangeKind::ColorChange => MovementKind::ColorChange,
        }
    }
}

/// Decoding choices for SVG input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Movement emitted between paths of different stroke colours.
    pub color_change: ColorChangeKind,

    /// Decode absolute `H`/`V` runs the historical way, where each operand
    /// is replaced by the next one before it is used and the first operand
    /// of a run is lost. Set to `false` to read operands in order.
    pub literal_absolute_lines: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            color_change: ColorChangeKind::Stop,
            literal_absolute_lines: true,
        }
    }
}

/// The SVG codec.
#[derive(Debug, Clone, Default)]
pub struct SvgFormat {
    options: SvgOptions,
}

impl SvgFormat {
    pub fn new(options: SvgOptions) -> Self {
        Self { options }
    }
}

impl Reader for SvgFormat {
    fn read_with(
        &self,
        pattern: &mut StitchPattern,
        input: &mut dyn Read,
        cancel: &CancelToken,
    ) -> Result<()> {
        let decoder = PatternDecoder::new(pattern, &self.options, cancel);
        let mut adapter = ElementAdapter::new(decoder, cancel);
        adapter.run(BufReader::new(input))
    }
}

impl Writer for SvgFormat {
    fn write(&self, pattern: &StitchPattern, output: &mut dyn Write) -> Result<()> {
        write_svg(pattern, output)
    }
}

impl Format for SvgFormat {
    fn name(&self) -> &'static str {
        "SVG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[EXT]
    }

    fn mime(&self) -> Option<&'static str> {
        Some(MIME)
    }

    fn reader(&self) -> Option<&dyn Reader> {
        Some(self)
    }

    fn writer(&self) -> Option<&dyn Writer> {
        Some(self)
    }
}
