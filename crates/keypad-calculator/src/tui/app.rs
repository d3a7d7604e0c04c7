//! Frontend application state: engine, history, keypad highlight.

use crate::core::engine::{CalculatorAction, CalculatorEngine, ERROR_READOUT};
use crate::core::history::History;
use crate::tui::keypad::Keypad;

/// The interactive calculator session.
///
/// Wraps the engine with the pieces only the frontend cares about: the
/// calculation history, the keypad highlight, and the quit flag.
#[derive(Debug)]
pub struct CalculatorApp {
    engine: CalculatorEngine,
    history: History,
    keypad: Keypad,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: CalculatorEngine::new(),
            history: History::new(),
            keypad: Keypad::new(),
            should_quit: false,
        }
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// The completed calculations so far.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The keypad grid (for rendering).
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Mutable keypad access (for mouse hit-testing state).
    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    /// Marks the session for shutdown.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// True once a quit key has been seen.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Forwards one action to the engine, recording the calculation in the
    /// history when an equals press folds a full expression.
    pub fn apply(&mut self, action: CalculatorAction) {
        self.keypad.highlight_action(action);

        // Capture the expression text before the fold consumes it.
        let folding = action == CalculatorAction::Equals
            && self.engine.state().pending.is_some()
            && !self.engine.state().reset_on_next_input;
        let expression = if folding {
            let snapshot = self.engine.snapshot();
            Some(format!("{} {}", snapshot.secondary, snapshot.primary))
        } else {
            None
        };

        self.engine.apply(action);

        if let Some(expression) = expression {
            let result = self.engine.snapshot().primary;
            // Failed calculations are not history.
            if result != ERROR_READOUT {
                self.history.record(&expression, &result);
            }
        }
    }
}
