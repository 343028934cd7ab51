//! SVG to pattern decoding.
//!
//! Only straight-line commands become stitches. Curves, arcs and `z` are
//! tokenized but produce no movement.

use log::{debug, trace, warn};

use super::element::PathReceiver;
use super::path::{Operands, ParseStatus, PathParser};
use super::SvgOptions;
use crate::cancel::CancelToken;
use crate::error::{EmbError, Result};
use crate::types::{hex_color, MovementKind, StitchPattern, Thread};

/// Builds a pattern from the paths of one SVG document.
#[derive(Debug)]
pub struct PatternDecoder<'a> {
    pattern: &'a mut StitchPattern,
    options: &'a SvgOptions,
    cancel: &'a CancelToken,
    parser: PathParser,
    /// Stroke of the previous path; `None` until the first path.
    last_color: Option<u32>,
    paths: usize,
    shift_reported: bool,
}

impl<'a> PatternDecoder<'a> {
    pub fn new(pattern: &'a mut StitchPattern, options: &'a SvgOptions, cancel: &'a CancelToken) -> Self {
        Self {
            pattern,
            options,
            cancel,
            parser: PathParser::default(),
            last_color: None,
            paths: 0,
            shift_reported: false,
        }
    }

    fn switch_color(&mut self, stroke: u32) {
        if self.last_color == Some(stroke) {
            return;
        }

        let name = format!("SVG Color {}", hex_color(stroke));
        trace!("new thread {}", name);
        self.pattern.add_thread(Thread::new(stroke, name));
        if self.last_color.is_some() {
            self.pattern.add_stitch_rel(0.0, 0.0, self.options.color_change.into());
        }
        self.last_color = Some(stroke);
    }
}

impl PathReceiver for PatternDecoder<'_> {
    fn on_start(&mut self) {
        self.last_color = None;
        self.paths = 0;
        self.shift_reported = false;
        debug!("decoding SVG document");
    }

    fn on_path(&mut self, data: &str, stroke: u32) -> Result<()> {
        self.switch_color(stroke);
        self.paths += 1;

        let pattern = &mut *self.pattern;
        let options = self.options;
        let cancel = self.cancel;
        let shift_reported = &mut self.shift_reported;

        let status = self.parser.parse(data, |letter, operands| {
            let shifted = apply_command(pattern, options, letter, operands);
            if shifted && !*shift_reported {
                warn!(
                    "absolute '{}' command: first operand of the run skipped; \
                     set svg.literal_absolute_lines: false to consume operands in order",
                    letter
                );
                *shift_reported = true;
            }
            cancel.is_cancelled()
        });

        match status {
            ParseStatus::Completed => Ok(()),
            ParseStatus::Cancelled => Err(EmbError::Cancelled),
        }
    }

    fn on_finish(&mut self) {
        debug!(
            "decoded {} path(s) into {} stitch(es), {} thread(s)",
            self.paths,
            self.pattern.len(),
            self.pattern.threads().len()
        );
    }

    fn on_error(&mut self, error: &EmbError) {
        warn!(
            "SVG decode stopped after {} path(s), keeping {} stitch(es): {}",
            self.paths,
            self.pattern.len(),
            error
        );
    }
}

/// Translate one path command into stitches.
///
/// Returns `true` when an absolute `H`/`V` run dropped its first operand.
fn apply_command(
    pattern: &mut StitchPattern,
    options: &SvgOptions,
    letter: char,
    operands: &mut Operands<'_>,
) -> bool {
    match letter {
        'm' | 'M' => {
            let absolute = letter == 'M';
            if let Some((x, y)) = operands.next_pair() {
                pattern.add_stitch_rel(0.0, 0.0, MovementKind::Trim);
                stitch_to(pattern, absolute, x, y, MovementKind::Jump);
            }
            while let Some((x, y)) = operands.next_pair() {
                stitch_to(pattern, absolute, x, y, MovementKind::Normal);
            }
        }
        'l' | 'L' => {
            let absolute = letter == 'L';
            while let Some((x, y)) = operands.next_pair() {
                stitch_to(pattern, absolute, x, y, MovementKind::Normal);
            }
        }
        'h' => {
            for dx in operands {
                pattern.add_stitch_rel(dx, 0.0, MovementKind::Normal);
            }
        }
        'v' => {
            for dy in operands {
                pattern.add_stitch_rel(0.0, dy, MovementKind::Normal);
            }
        }
        'H' | 'V' => {
            let horizontal = letter == 'H';
            if !options.literal_absolute_lines {
                for value in operands {
                    absolute_line(pattern, horizontal, value);
                }
                return false;
            }

            // Each pull is overwritten by the next before use, so the run's
            // first operand never produces a stitch.
            let mut value = operands.next();
            let shifted = value.is_some();
            while value.is_some() {
                value = operands.next();
                let Some(v) = value else { break };
                absolute_line(pattern, horizontal, v);
            }
            return shifted;
        }
        _ => trace!("path command '{}' produces no stitches", letter),
    }
    false
}

fn stitch_to(pattern: &mut StitchPattern, absolute: bool, x: f32, y: f32, kind: MovementKind) {
    if absolute {
        pattern.add_stitch_abs(x, y, kind);
    } else {
        pattern.add_stitch_rel(x, y, kind);
    }
}

fn absolute_line(pattern: &mut StitchPattern, horizontal: bool, value: f32) {
    if horizontal {
        pattern.add_stitch_abs(value, pattern.previous_y(), MovementKind::Normal);
    } else {
        pattern.add_stitch_abs(pattern.previous_x(), value, MovementKind::Normal);
    }
}
