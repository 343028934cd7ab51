//! The vendor-neutral stitch pattern.
//!
//! A pattern is an append-only list of absolute stitches plus an ordered
//! thread palette. Every stitch is tagged with the palette index that was
//! current when it was added; a thread-change stitch (stop or colour change)
//! advances that index once it has been recorded.

use serde::Serialize;

use super::{MovementKind, Stitch, Thread};

/// Axis-aligned bounds of all stitch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// A maximal contiguous sequence of stitches sharing one thread.
#[derive(Debug, Clone, Copy)]
pub struct StitchRun<'a> {
    /// Palette index of the run's thread.
    pub index: usize,
    /// The run's thread, if the palette has an entry for it.
    pub thread: Option<&'a Thread>,
    pub stitches: &'a [Stitch],
}

impl StitchRun<'_> {
    /// Thread colour, falling back to black for runs without a palette entry.
    pub fn color(&self) -> u32 {
        self.thread.map_or(0x000000, |t| t.color)
    }
}

/// An embroidery pattern: stitches plus thread palette.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StitchPattern {
    threads: Vec<Thread>,
    stitches: Vec<Stitch>,
    #[serde(skip)]
    current_thread: usize,
}

impl StitchPattern {
    /// Create an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// The thread palette, in registration order.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// All stitches, in order.
    pub fn stitches(&self) -> &[Stitch] {
        &self.stitches
    }

    /// Get a thread by palette index.
    pub fn thread(&self, index: usize) -> Option<&Thread> {
        self.threads.get(index)
    }

    /// Append a thread to the palette, returning its index.
    pub fn add_thread(&mut self, thread: Thread) -> usize {
        self.threads.push(thread);
        self.threads.len() - 1
    }

    /// Palette index the next stitch will be tagged with.
    pub fn current_thread(&self) -> usize {
        self.current_thread
    }

    /// Append a stitch at absolute coordinates.
    pub fn add_stitch_abs(&mut self, x: f32, y: f32, kind: MovementKind) {
        self.stitches
            .push(Stitch::new(x, y, kind, self.current_thread));
        if kind.is_thread_change() {
            self.current_thread += 1;
        }
    }

    /// Append a stitch displaced from the previous stitch (or the origin).
    pub fn add_stitch_rel(&mut self, dx: f32, dy: f32, kind: MovementKind) {
        let x = self.previous_x() + dx;
        let y = self.previous_y() + dy;
        self.add_stitch_abs(x, y, kind);
    }

    /// X of the most recent stitch, or 0 for an empty pattern.
    pub fn previous_x(&self) -> f32 {
        self.stitches.last().map_or(0.0, |s| s.x)
    }

    /// Y of the most recent stitch, or 0 for an empty pattern.
    pub fn previous_y(&self) -> f32 {
        self.stitches.last().map_or(0.0, |s| s.y)
    }

    pub fn len(&self) -> usize {
        self.stitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stitches.is_empty()
    }

    /// Count stitches of a given kind.
    pub fn count_kind(&self, kind: MovementKind) -> usize {
        self.stitches.iter().filter(|s| s.kind == kind).count()
    }

    /// Compute the bounds of all stitch coordinates.
    ///
    /// An empty pattern has an all-zero box.
    pub fn bounding_box(&self) -> BoundingBox {
        let Some(first) = self.stitches.first() else {
            return BoundingBox::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for s in &self.stitches[1..] {
            min_x = min_x.min(s.x);
            min_y = min_y.min(s.y);
            max_x = max_x.max(s.x);
            max_y = max_y.max(s.y);
        }

        BoundingBox {
            left: min_x,
            top: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Split the stitches into maximal runs sharing a thread index.
    pub fn stitch_runs(&self) -> Vec<StitchRun<'_>> {
        self.stitches
            .chunk_by(|a, b| a.thread == b.thread)
            .map(|stitches| {
                let index = stitches[0].thread;
                StitchRun {
                    index,
                    thread: self.threads.get(index),
                    stitches,
                }
            })
            .collect()
    }
}
