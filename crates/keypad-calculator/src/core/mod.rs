//! Calculator core: the state machine, its operations, and the display seam.
//!
//! Everything observable about a session is a pure function of
//! [`engine::CalculatorState`]; the modules here hold that state, mutate it
//! deterministically, and publish readout snapshots to a renderer.

pub mod display;
pub mod engine;
pub mod history;
pub mod operations;

pub use display::{DisplayRenderer, DisplaySnapshot, NullRenderer};
pub use engine::{CalculatorAction, CalculatorEngine, CalculatorState, Operand};
pub use history::{History, HistoryEntry};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator arithmetic.
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error taxonomy.
///
/// Division by zero is the only recoverable domain error, and it never
/// escapes the engine surface: `calculate` folds it into the error operand
/// so the display always shows something and the session stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a divisor of exactly zero.
    #[error("division by zero")]
    DivisionByZero,
}
