//! Four-function keypad calculator.
//!
//! The core is a small deterministic state machine over the tuple
//! (current operand, captured left operand, pending operation,
//! reset-on-next-input flag). Input adapters — a fixed keyboard table and
//! a button grid — feed it one action at a time, and it publishes readout
//! snapshots to a display renderer after every mutation. Division by zero
//! is the one domain error, carried in-band as an error operand and shown
//! as `Error` on the readout.
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.apply(CalculatorAction::Digit(3));
//! engine.apply(CalculatorAction::Operator(Operation::Add));
//! engine.apply(CalculatorAction::Digit(4));
//! engine.apply(CalculatorAction::Operator(Operation::Multiply));
//! engine.apply(CalculatorAction::Digit(2));
//! engine.apply(CalculatorAction::Equals);
//!
//! // 3 + 4 folds on the multiply press, then 7 × 2
//! assert_eq!(engine.snapshot().primary, "14");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::display::{format_value, DisplayRenderer, DisplaySnapshot, NullRenderer};
    pub use crate::core::engine::{
        CalculatorAction, CalculatorEngine, CalculatorState, Operand, ERROR_READOUT,
    };
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::operations::{round_to_display, Operation};
    pub use crate::core::{CalcError, CalcResult};

    #[cfg(feature = "tui")]
    pub use crate::tui::{render, CalculatorApp, InputHandler, KeyAction, Keypad};
}
