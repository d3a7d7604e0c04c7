//! Readout snapshots, the renderer seam, and value formatting.

use serde::{Deserialize, Serialize};

/// The readout strings published after every state mutation.
///
/// The primary line is the value being entered or the last result; the
/// secondary line shows the captured left operand and the pending
/// operation's symbol (or is empty when nothing is pending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Primary readout.
    pub primary: String,
    /// Secondary readout.
    pub secondary: String,
}

/// Rendering collaborator.
///
/// The engine pushes a fresh snapshot after each operation; the renderer
/// is otherwise opaque to the engine.
pub trait DisplayRenderer {
    /// Receives the readout strings for the state just produced.
    fn render(&mut self, snapshot: &DisplaySnapshot);
}

/// Renderer that discards snapshots. The default collaborator for
/// headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl DisplayRenderer for NullRenderer {
    fn render(&mut self, _snapshot: &DisplaySnapshot) {}
}

/// Formats a numeric value for the primary readout.
///
/// `f64`'s `Display` prints the shortest decimal string that round-trips,
/// which is exactly the readout behavior wanted here: `7` not `7.0`,
/// `0.001` not `1e-3`. Negative zero normalizes to `"0"`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
