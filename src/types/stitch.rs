//! Stitch records and movement kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the machine moves to reach a stitch's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    #[default]
    Normal,
    Jump,
    Trim,
    Stop,
    End,
    ColorChange,
}

impl MovementKind {
    /// All kinds, in flag order.
    pub const ALL: [MovementKind; 6] = [
        MovementKind::Normal,
        MovementKind::Jump,
        MovementKind::Trim,
        MovementKind::Stop,
        MovementKind::End,
        MovementKind::ColorChange,
    ];

    /// Legacy bit value used by machine formats.
    pub fn flag(self) -> u32 {
        match self {
            MovementKind::Normal => 0,
            MovementKind::Jump => 1,
            MovementKind::Trim => 2,
            MovementKind::Stop => 4,
            MovementKind::End => 8,
            MovementKind::ColorChange => 16,
        }
    }

    /// Whether this movement hands over to the next thread.
    pub fn is_thread_change(self) -> bool {
        matches!(self, MovementKind::Stop | MovementKind::ColorChange)
    }

    /// Short name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            MovementKind::Normal => "normal",
            MovementKind::Jump => "jump",
            MovementKind::Trim => "trim",
            MovementKind::Stop => "stop",
            MovementKind::End => "end",
            MovementKind::ColorChange => "color_change",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single absolute coordinate tagged with a movement kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stitch {
    pub x: f32,
    pub y: f32,
    pub kind: MovementKind,
    /// Index into the pattern's thread palette.
    pub thread: usize,
}

impl Stitch {
    pub fn new(x: f32, y: f32, kind: MovementKind, thread: usize) -> Self {
        Self { x, y, kind, thread }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_distinct_bits() {
        let flags: Vec<u32> = MovementKind::ALL.iter().map(|k| k.flag()).collect();
        assert_eq!(flags, vec![0, 1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_thread_change_kinds() {
        assert!(MovementKind::Stop.is_thread_change());
        assert!(MovementKind::ColorChange.is_thread_change());
        assert!(!MovementKind::Jump.is_thread_change());
        assert!(!MovementKind::Trim.is_thread_change());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&MovementKind::ColorChange).unwrap();
        assert_eq!(json, "\"color_change\"");
    }
}
