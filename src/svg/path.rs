//! Path data tokenizer.
//!
//! Splits SVG path data into command letters and hands each command a lazy
//! operand puller. What a command does with its operands is up to the
//! caller; this module only knows the grammar.
//!
//! Numbers are `[+-]digits[.digits][(e|E)[+-]digits]`. Operands may be
//! separated by whitespace, commas, or nothing at all when the next number
//! starts with a sign or a second decimal point (`10-5`, `0.5.5`).

/// Command letters of the SVG path grammar (lowercase; case selects
/// relative or absolute).
pub const SVG_PATH_COMMANDS: &str = "csqtamlzhv";

/// How a parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Every command was dispatched.
    Completed,
    /// A command handler asked to stop.
    Cancelled,
}

/// Tokenizer for a fixed set of command letters.
#[derive(Debug, Clone, Copy)]
pub struct PathParser {
    commands: &'static str,
}

impl Default for PathParser {
    fn default() -> Self {
        Self::new(SVG_PATH_COMMANDS)
    }
}

impl PathParser {
    /// Create a parser recognising `commands` in either case.
    pub fn new(commands: &'static str) -> Self {
        Self { commands }
    }

    fn is_command(&self, c: char) -> bool {
        c.is_ascii_alphabetic() && self.commands.contains(c.to_ascii_lowercase())
    }

    /// Dispatch every command in `data` to `on_command`.
    ///
    /// The handler receives the command letter and the operands that follow
    /// it, up to the next command letter. It returns `true` to cancel, in
    /// which case no further commands are dispatched. Text before the first
    /// command is ignored.
    pub fn parse<F>(&self, data: &str, mut on_command: F) -> ParseStatus
    where
        F: FnMut(char, &mut Operands<'_>) -> bool,
    {
        let mut current: Option<(char, usize)> = None;

        for (i, c) in data.char_indices() {
            if !self.is_command(c) {
                continue;
            }
            if let Some((letter, start)) = current {
                let mut operands = Operands::new(&data[start..i]);
                if on_command(letter, &mut operands) {
                    return ParseStatus::Cancelled;
                }
            }
            current = Some((c, i + c.len_utf8()));
        }

        if let Some((letter, start)) = current {
            let mut operands = Operands::new(&data[start..]);
            if on_command(letter, &mut operands) {
                return ParseStatus::Cancelled;
            }
        }

        ParseStatus::Completed
    }
}

/// Lazy operand puller for a single command.
///
/// Each pull yields the next number or `None` once the operands run out.
/// Running out is not an error: trailing content that does not parse as a
/// number simply ends the run.
#[derive(Debug)]
pub struct Operands<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Operands<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Unconsumed operand text.
    pub fn remainder(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Pull two numbers. `None` unless both are present.
    pub fn next_pair(&mut self) -> Option<(f32, f32)> {
        let a = self.next()?;
        let b = self.next()?;
        Some((a, b))
    }

    fn exhaust(&mut self) -> Option<f32> {
        self.pos = self.src.len();
        None
    }
}

impl Iterator for Operands<'_> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let bytes = self.src.as_bytes();
        let mut i = self.pos;

        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b',') {
            i += 1;
        }

        let start = i;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }

        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let mut digits = i - int_start;

        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            digits += i - frac_start;
        }

        if digits == 0 {
            return self.exhaust();
        }

        // Exponent only counts when digits follow it.
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            let exp_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > exp_start {
                i = j;
            }
        }

        match self.src[start..i].parse::<f32>() {
            Ok(value) => {
                self.pos = i;
                Some(value)
            }
            Err(_) => self.exhaust(),
        }
    }
}
