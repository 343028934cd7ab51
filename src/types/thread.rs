//! Thread type and stroke colour parsing.

use std::fmt;

use serde::Serialize;

/// A named, coloured entry in a pattern's thread palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Thread {
    /// 24-bit RGB colour (`0xRRGGBB`).
    pub color: u32,
    /// Human-readable name.
    pub name: String,
    /// Manufacturer catalog code, if known.
    pub catalog: Option<String>,
}

impl Thread {
    /// Create a new thread with no catalog code.
    pub fn new(color: u32, name: impl Into<String>) -> Self {
        Self {
            color: color & 0xFF_FFFF,
            name: name.into(),
            catalog: None,
        }
    }

    /// Attach a catalog code.
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Colour as lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        hex_color(self.color)
    }
}

impl Default for Thread {
    fn default() -> Self {
        Self::new(0x000000, "Black")
    }
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex())?;
        if let Some(catalog) = &self.catalog {
            write!(f, " [{}]", catalog)?;
        }
        Ok(())
    }
}

/// Render a 24-bit colour as lowercase `#rrggbb`.
pub fn hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}

/// Basic CSS colour keywords.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("silver", 0xC0C0C0),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("white", 0xFFFFFF),
    ("maroon", 0x800000),
    ("red", 0xFF0000),
    ("purple", 0x800080),
    ("fuchsia", 0xFF00FF),
    ("magenta", 0xFF00FF),
    ("green", 0x008000),
    ("lime", 0x00FF00),
    ("olive", 0x808000),
    ("yellow", 0xFFFF00),
    ("navy", 0x000080),
    ("blue", 0x0000FF),
    ("teal", 0x008080),
    ("aqua", 0x00FFFF),
    ("cyan", 0x00FFFF),
    ("orange", 0xFFA500),
];

/// Parse a stroke colour value into a 24-bit RGB integer.
///
/// Supports formats:
/// - `#RGB` (3 digits, expanded to 6)
/// - `#RRGGBB` (6 digits)
/// - `rgb(r, g, b)` with 0-255 components
/// - basic CSS colour keywords (`red`, `navy`, ...)
///
/// Anything else, including a missing value, resolves to black.
pub fn parse_color(value: Option<&str>) -> u32 {
    value.and_then(try_parse_color).unwrap_or(0x000000)
}

fn try_parse_color(value: &str) -> Option<u32> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok()
            }
            6 => u32::from_str_radix(hex, 16).ok(),
            _ => None,
        };
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<u8> = args
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<std::result::Result<_, _>>()
            .ok()?;
        if let [r, g, b] = parts[..] {
            return Some(u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b));
        }
        return None;
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, rgb)| rgb)
}
