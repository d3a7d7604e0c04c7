//! The four binary operations and display-precision rounding.

use crate::core::{CalcError, CalcResult};

/// A binary operation selected from the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// Returns the symbol shown on the secondary readout.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Applies the operation to two operands.
    ///
    /// Division with a divisor of exactly zero is the single failure case.
    pub fn apply(&self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(lhs / rhs)
                }
            }
        }
    }
}

/// Rounds a result to 8 decimal places before it reaches the readout.
///
/// Absorbs binary floating-point artifacts such as `0.1 + 0.2`.
#[must_use]
pub fn round_to_display(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}
