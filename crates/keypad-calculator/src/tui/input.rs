//! Keyboard input: the fixed key-to-action table.
//!
//! Keys that are not in the table never reach the engine; the adapter is
//! the validation layer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::engine::CalculatorAction;
use crate::core::operations::Operation;

/// What a key press means to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an action to the engine.
    Calculator(CalculatorAction),
    /// Quit the frontend.
    Quit,
    /// Ignored input.
    None,
}

/// Maps key events to actions.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The keyboard table: digits, `.`, `+ - * /`, Enter/`=` (equals),
    /// Esc/Delete (clear), Backspace, `%`; Ctrl+C and Ctrl+Q quit.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c @ '0'..='9') => {
                KeyAction::Calculator(CalculatorAction::Digit(c as u8 - b'0'))
            }
            KeyCode::Char('.') => KeyAction::Calculator(CalculatorAction::DecimalPoint),
            KeyCode::Char('+') => {
                KeyAction::Calculator(CalculatorAction::Operator(Operation::Add))
            }
            KeyCode::Char('-') => {
                KeyAction::Calculator(CalculatorAction::Operator(Operation::Subtract))
            }
            KeyCode::Char('*') => {
                KeyAction::Calculator(CalculatorAction::Operator(Operation::Multiply))
            }
            KeyCode::Char('/') => {
                KeyAction::Calculator(CalculatorAction::Operator(Operation::Divide))
            }
            KeyCode::Char('%') => KeyAction::Calculator(CalculatorAction::Percent),
            KeyCode::Char('=') | KeyCode::Enter => {
                KeyAction::Calculator(CalculatorAction::Equals)
            }
            KeyCode::Esc | KeyCode::Delete => KeyAction::Calculator(CalculatorAction::Clear),
            KeyCode::Backspace => KeyAction::Calculator(CalculatorAction::Backspace),
            _ => KeyAction::None,
        }
    }
}
