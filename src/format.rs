//! Reader and writer capabilities for pattern file formats.
//!
//! A format may be able to read, write, or both. Each capability is a
//! separate trait so callers that only need one direction never touch the
//! other.

use std::fmt;
use std::io::{Read, Write};

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::types::StitchPattern;

/// Decodes a file into a pattern.
pub trait Reader {
    /// Decode `input` into `pattern`, polling `cancel` as it goes.
    ///
    /// The pattern is mutated in place. On failure it keeps whatever was
    /// decoded before the error; nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed or unreadable input, or
    /// [`EmbError::Cancelled`](crate::EmbError::Cancelled) when `cancel` fires.
    fn read_with(
        &self,
        pattern: &mut StitchPattern,
        input: &mut dyn Read,
        cancel: &CancelToken,
    ) -> Result<()>;

    /// Decode `input` into `pattern` without a way to cancel.
    ///
    /// # Errors
    ///
    /// See [`Reader::read_with`].
    fn read(&self, pattern: &mut StitchPattern, input: &mut dyn Read) -> Result<()> {
        self.read_with(pattern, input, &CancelToken::new())
    }
}

/// Encodes a pattern into a file.
pub trait Writer {
    /// Encode `pattern` to `output`.
    ///
    /// # Errors
    ///
    /// Fails only when `output` cannot be written to.
    fn write(&self, pattern: &StitchPattern, output: &mut dyn Write) -> Result<()>;
}

/// A file format known to the registry.
pub trait Format: fmt::Debug + Send + Sync {
    /// Display name (e.g. "SVG").
    fn name(&self) -> &'static str;

    /// Lowercase file extensions without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type, if the format has one.
    fn mime(&self) -> Option<&'static str> {
        None
    }

    /// Read capability, if supported.
    fn reader(&self) -> Option<&dyn Reader> {
        None
    }

    /// Write capability, if supported.
    fn writer(&self) -> Option<&dyn Writer> {
        None
    }
}
