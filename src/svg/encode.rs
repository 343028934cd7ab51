//! Pattern to SVG encoding.
//!
//! Each stitch run becomes one `<path>` whose data is a single `M` followed
//! by bare coordinate pairs, which SVG treats as implicit line-tos.

use std::fmt::Write as _;
use std::io::Write;

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::element::{ATTR_DATA, ATTR_FILL, ATTR_HEIGHT, ATTR_STROKE, ATTR_VERSION, ATTR_VIEWBOX, ATTR_WIDTH, NAME_PATH};
use crate::error::Result;
use crate::types::{hex_color, StitchPattern, StitchRun};

pub const NAME_SVG: &str = "svg";
pub const VALUE_NONE: &str = "none";
pub const VALUE_SVG_VERSION: &str = "1.1";
pub const VALUE_XMLNS: &str = "http://www.w3.org/2000/svg";
pub const VALUE_XLINK: &str = "http://www.w3.org/1999/xlink";
pub const VALUE_XMLNS_EV: &str = "http://www.w3.org/2001/xml-events";

/// Write `pattern` as an SVG document.
///
/// # Errors
///
/// Fails only when `output` cannot be written to.
pub fn write_svg(pattern: &StitchPattern, output: &mut dyn Write) -> Result<()> {
    let mut writer = quick_xml::Writer::new(output);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let bounds = pattern.bounding_box();
    let width = bounds.width.to_string();
    let height = bounds.height.to_string();
    let view_box = format!("{} {} {} {}", bounds.left, bounds.top, bounds.width, bounds.height);

    let mut root = BytesStart::new(NAME_SVG);
    root.push_attribute((ATTR_VERSION, VALUE_SVG_VERSION));
    root.push_attribute(("xmlns", VALUE_XMLNS));
    root.push_attribute(("xmlns:xlink", VALUE_XLINK));
    root.push_attribute(("xmlns:ev", VALUE_XMLNS_EV));
    root.push_attribute((ATTR_WIDTH, width.as_str()));
    root.push_attribute((ATTR_HEIGHT, height.as_str()));
    root.push_attribute((ATTR_VIEWBOX, view_box.as_str()));
    writer.write_event(Event::Start(root))?;

    let runs = pattern.stitch_runs();
    let mut data = String::new();
    for run in &runs {
        path_data(run, &mut data);
        let stroke = hex_color(run.color());

        let mut path = BytesStart::new(NAME_PATH);
        path.push_attribute((ATTR_DATA, data.as_str()));
        path.push_attribute((ATTR_FILL, VALUE_NONE));
        path.push_attribute((ATTR_STROKE, stroke.as_str()));
        writer.write_event(Event::Empty(path))?;
    }

    writer.write_event(Event::End(BytesEnd::new(NAME_SVG)))?;
    debug!("encoded {} stitch run(s) as SVG paths", runs.len());
    Ok(())
}

/// Build the path data for one run into `data`, replacing its contents.
///
/// A stitch at the same point as the one before it adds nothing.
pub fn path_data(run: &StitchRun<'_>, data: &mut String) {
    data.clear();
    data.push('M');

    let mut last: Option<(f32, f32)> = None;
    for stitch in run.stitches {
        let point = (stitch.x, stitch.y);
        if last != Some(point) {
            // Writing to a String cannot fail.
            let _ = write!(data, " {},{}", point.0, point.1);
        }
        last = Some(point);
    }
}
