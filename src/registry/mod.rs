//! Format registry for dispatching files to codecs by extension.
//!
//! The registry maps lowercase file extensions to [`Format`] instances and
//! hands out their read or write capability independently.
//!
//! # Example
//!
//! ```ignore
//! use embkit::registry::FormatRegistry;
//!
//! let registry = FormatRegistry::builtin();
//! let reader = registry.resolve_reader("rose.SVG").expect("svg is built in");
//! reader.read(&mut pattern, &mut file)?;
//! ```

use std::collections::HashMap;

use crate::format::{Format, Reader, Writer};
use crate::svg::SvgFormat;

/// Lookup table from file extension to format.
///
/// The registry is immutable after construction - use `RegistryBuilder`
/// to create a new registry.
#[derive(Debug)]
pub struct FormatRegistry {
    formats: Vec<Box<dyn Format>>,
    by_extension: HashMap<String, usize>,
}

impl FormatRegistry {
    /// Registry with every format this crate implements.
    pub fn builtin() -> Self {
        let mut builder = RegistryBuilder::new();
        builder.register(SvgFormat::default());
        builder.build()
    }

    /// Find the format for a filename, if its extension is registered.
    pub fn resolve(&self, filename: &str) -> Option<&dyn Format> {
        let ext = extension_of(filename)?;
        let index = *self.by_extension.get(&ext)?;
        Some(self.formats[index].as_ref())
    }

    /// Find a reader for a filename.
    ///
    /// Returns `None` when the extension is unknown or its format cannot read.
    pub fn resolve_reader(&self, filename: &str) -> Option<&dyn Reader> {
        self.resolve(filename)?.reader()
    }

    /// Find a writer for a filename.
    ///
    /// Returns `None` when the extension is unknown or its format cannot write.
    pub fn resolve_writer(&self, filename: &str) -> Option<&dyn Writer> {
        self.resolve(filename)?.writer()
    }

    /// All registered formats, in registration order.
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> {
        self.formats.iter().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for constructing a FormatRegistry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    formats: Vec<Box<dyn Format>>,
}

impl RegistryBuilder {
    /// Create an empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a format. A later format claiming an extension replaces the earlier one.
    pub fn register(&mut self, format: impl Format + 'static) -> &mut Self {
        self.formats.push(Box::new(format));
        self
    }

    /// Build the registry.
    pub fn build(self) -> FormatRegistry {
        let mut by_extension = HashMap::new();
        for (index, format) in self.formats.iter().enumerate() {
            for ext in format.extensions() {
                by_extension.insert(ext.to_ascii_lowercase(), index);
            }
        }

        FormatRegistry {
            formats: self.formats,
            by_extension,
        }
    }
}

/// Lowercase extension of a filename, without the dot.
///
/// Names shorter than four characters cannot hold a dot plus a
/// three-letter extension and yield `None`, as do names without a dot.
pub fn extension_of(filename: &str) -> Option<String> {
    if filename.chars().count() < 4 {
        return None;
    }

    let dot = filename.rfind('.')?;
    let ext = &filename[dot + 1..];
    if ext.is_empty() {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::error::Result;
    use crate::types::{MovementKind, StitchPattern};

    #[derive(Debug)]
    struct ListFormat;

    impl Writer for ListFormat {
        fn write(&self, pattern: &StitchPattern, output: &mut dyn std::io::Write) -> Result<()> {
            for s in pattern.stitches() {
                writeln!(output, "{} {} {}", s.x, s.y, s.kind)?;
            }
            Ok(())
        }
    }

    impl Format for ListFormat {
        fn name(&self) -> &'static str {
            "Stitch list"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["lst"]
        }

        fn writer(&self) -> Option<&dyn Writer> {
            Some(self)
        }
    }

    #[derive(Debug)]
    struct OriginFormat;

    impl Reader for OriginFormat {
        fn read_with(
            &self,
            pattern: &mut StitchPattern,
            _input: &mut dyn std::io::Read,
            _cancel: &CancelToken,
        ) -> Result<()> {
            pattern.add_stitch_abs(0.0, 0.0, MovementKind::End);
            Ok(())
        }
    }

    impl Format for OriginFormat {
        fn name(&self) -> &'static str {
            "Origin"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["org"]
        }

        fn reader(&self) -> Option<&dyn Reader> {
            Some(self)
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("pattern.SVG"), Some("svg".to_string()));
        assert_eq!(extension_of("a.b.Dst"), Some("dst".to_string()));
        assert_eq!(extension_of("ab"), None);
        assert_eq!(extension_of("abcd"), None);
        assert_eq!(extension_of("file."), None);
    }

    #[test]
    fn test_resolve_svg_case_insensitive() {
        let registry = FormatRegistry::builtin();
        assert!(registry.resolve_reader("pattern.SVG").is_some());
        assert!(registry.resolve_reader("pattern.svg").is_some());
        assert!(registry.resolve_writer("pattern.Svg").is_some());
        assert_eq!(registry.resolve("pattern.svg").map(|f| f.name()), Some("SVG"));
    }

    #[test]
    fn test_resolve_unsupported() {
        let registry = FormatRegistry::builtin();
        assert!(registry.resolve_reader("ab").is_none());
        assert!(registry.resolve_reader("file.xyz").is_none());
        assert!(registry.resolve_writer("file.xyz").is_none());
    }

    #[test]
    fn test_write_only_format() {
        let mut builder = RegistryBuilder::new();
        builder.register(ListFormat);
        let registry = builder.build();

        assert!(registry.resolve_reader("out.lst").is_none());
        let writer = registry.resolve_writer("out.LST").unwrap();

        let mut pattern = StitchPattern::new();
        pattern.add_stitch_abs(1.0, 2.0, MovementKind::Jump);
        let mut out = Vec::new();
        writer.write(&pattern, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2 jump\n");
    }

    #[test]
    fn test_read_only_format() {
        let mut builder = RegistryBuilder::new();
        builder.register(OriginFormat);
        let registry = builder.build();

        assert!(registry.resolve_writer("in.org").is_none());
        let reader = registry.resolve_reader("in.org").unwrap();

        let mut pattern = StitchPattern::new();
        reader.read(&mut pattern, &mut std::io::empty()).unwrap();
        assert_eq!(pattern.len(), 1);
    }

    #[test]
    fn test_formats_listing() {
        let mut builder = RegistryBuilder::new();
        builder.register(SvgFormat::default()).register(ListFormat);
        let registry = builder.build();

        let names: Vec<&str> = registry.formats().map(|f| f.name()).collect();
        assert_eq!(names, vec!["SVG", "Stitch list"]);
        assert_eq!(registry.len(), 2);
    }
}
