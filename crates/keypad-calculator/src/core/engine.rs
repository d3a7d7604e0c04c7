//! The calculator state machine.
//!
//! A session moves through four shapes of the (pending operation,
//! reset-on-next-input) pair: idle entry, awaiting the second operand,
//! entering the second operand, and result shown. Every public operation
//! runs to completion and then publishes a [`DisplaySnapshot`] to the
//! renderer, so the display is never out of step with the state.

use std::fmt;

use tracing::{debug, warn};

use crate::core::display::{format_value, DisplayRenderer, DisplaySnapshot, NullRenderer};
use crate::core::operations::{round_to_display, Operation};
use crate::core::CalcError;

/// Primary readout shown after a division by zero.
pub const ERROR_READOUT: &str = "Error";

/// The value occupying the primary readout.
///
/// Division by zero is carried as a distinct variant rather than a magic
/// string, so arithmetic never sees it; it becomes the literal `"Error"`
/// only at the display edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A syntactically valid, possibly partial decimal numeral
    /// (`"0"`, `"12."`, `"-3.5"`).
    Number(String),
    /// The divide-by-zero marker.
    Error,
}

impl Operand {
    /// The string shown on the primary readout.
    #[must_use]
    pub fn readout(&self) -> &str {
        match self {
            Self::Number(s) => s,
            Self::Error => ERROR_READOUT,
        }
    }

    /// Numeric value of the operand, if it has one.
    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(s) => s.parse().ok(),
            Self::Error => None,
        }
    }

    fn zero() -> Self {
        Self::Number("0".to_string())
    }
}

/// The full mutable state of a calculator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    /// Value being entered or displayed.
    pub current: Operand,
    /// Left operand captured when an operation was selected; empty when
    /// no operand is pending.
    pub previous: String,
    /// Operation waiting for its right operand.
    pub pending: Option<Operation>,
    /// The next digit or decimal-point entry overwrites `current`
    /// instead of appending to it.
    pub reset_on_next_input: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl CalculatorState {
    /// The state every session starts in and `Clear` returns to.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            current: Operand::zero(),
            previous: String::new(),
            pending: None,
            reset_on_next_input: false,
        }
    }
}

/// One user action, as delivered by an input adapter (keyboard table or
/// keypad button). `CalculatorEngine::apply` maps each variant to exactly
/// one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorAction {
    /// A digit key, 0 through 9.
    Digit(u8),
    /// The decimal-point key.
    DecimalPoint,
    /// One of the four binary operation keys.
    Operator(Operation),
    /// The percent key.
    Percent,
    /// The equals key.
    Equals,
    /// Clear: reset the whole session.
    Clear,
    /// Backspace: delete the last entered character.
    Backspace,
}

/// Owns the calculator state and publishes a snapshot to its renderer
/// after every mutation.
pub struct CalculatorEngine {
    state: CalculatorState,
    renderer: Box<dyn DisplayRenderer>,
}

impl fmt::Debug for CalculatorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates a headless engine (snapshots are discarded).
    #[must_use]
    pub fn new() -> Self {
        Self::with_renderer(Box::new(NullRenderer))
    }

    /// Creates an engine publishing to the given renderer.
    ///
    /// The renderer receives the initial `("0", "")` snapshot immediately,
    /// so the display is populated before any input arrives.
    #[must_use]
    pub fn with_renderer(renderer: Box<dyn DisplayRenderer>) -> Self {
        let mut engine = Self {
            state: CalculatorState::fresh(),
            renderer,
        };
        engine.publish();
        engine
    }

    /// Read access to the session state.
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Builds the readout strings for the current state.
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        let secondary = match self.state.pending {
            Some(op) => format!("{} {}", self.state.previous, op.symbol()),
            None => self.state.previous.clone(),
        };
        DisplaySnapshot {
            primary: self.state.current.readout().to_string(),
            secondary,
        }
    }

    /// Dispatches one adapter action to the matching operation.
    pub fn apply(&mut self, action: CalculatorAction) {
        debug!(?action, "apply");
        match action {
            CalculatorAction::Digit(d) => self.input_digit(d),
            CalculatorAction::DecimalPoint => self.input_decimal_point(),
            CalculatorAction::Operator(op) => self.input_operation(op),
            CalculatorAction::Percent => self.input_percent(),
            CalculatorAction::Equals => self.calculate(),
            CalculatorAction::Clear => self.reset(),
            CalculatorAction::Backspace => self.delete_last(),
        }
    }

    /// Returns the session to the fresh state. Always succeeds.
    pub fn reset(&mut self) {
        self.state = CalculatorState::fresh();
        self.publish();
    }

    /// Enters one digit.
    ///
    /// With the reset flag set the digit starts a new number; otherwise it
    /// appends, except that a lone `"0"` is replaced (leading-zero
    /// suppression). Values above 9 are ignored — adapters are the
    /// validation layer.
    pub fn input_digit(&mut self, d: u8) {
        let Some(digit) = char::from_digit(u32::from(d), 10) else {
            return;
        };
        if self.state.reset_on_next_input {
            self.state.current = Operand::Number(digit.to_string());
            self.state.reset_on_next_input = false;
        } else {
            match &mut self.state.current {
                Operand::Number(s) => {
                    if s == "0" {
                        s.clear();
                    }
                    s.push(digit);
                }
                Operand::Error => {
                    self.state.current = Operand::Number(digit.to_string());
                }
            }
        }
        self.publish();
    }

    /// Appends a decimal point.
    ///
    /// With the reset flag set the entry becomes `"0."`; a second point in
    /// the same operand is a no-op.
    pub fn input_decimal_point(&mut self) {
        if self.state.reset_on_next_input {
            self.state.current = Operand::Number("0.".to_string());
            self.state.reset_on_next_input = false;
        } else if let Operand::Number(s) = &mut self.state.current {
            if !s.contains('.') {
                s.push('.');
            }
        }
        self.publish();
    }

    /// Removes the last entered character.
    ///
    /// A single-character value, or a sign with one digit, collapses to
    /// `"0"` rather than leaving an empty or bare-sign readout. Applied to
    /// the error marker it also collapses to `"0"`. Never errors.
    pub fn delete_last(&mut self) {
        match &mut self.state.current {
            Operand::Number(s) => {
                if s.len() == 1 || (s.len() == 2 && s.starts_with('-')) {
                    "0".clone_into(s);
                } else {
                    s.pop();
                }
            }
            Operand::Error => self.state.current = Operand::zero(),
        }
        self.publish();
    }

    /// Selects a binary operation.
    ///
    /// If an operation is already pending and a second operand has been
    /// typed, the pending operation is folded first, so `3 + 4 ×` computes
    /// 7 before the multiply starts. Ignored while the readout shows the
    /// error marker; the error clears through digit entry, backspace, or
    /// clear.
    pub fn input_operation(&mut self, op: Operation) {
        if self.state.current == Operand::Error {
            self.publish();
            return;
        }
        if self.state.pending.is_some() && !self.state.reset_on_next_input {
            self.calculate();
            // The fold itself can divide by zero; never capture the error
            // marker as a left operand.
            if self.state.current == Operand::Error {
                return;
            }
        }
        self.state.previous = self.state.current.readout().to_string();
        self.state.pending = Some(op);
        self.state.reset_on_next_input = true;
        self.publish();
    }

    /// Divides the current operand by 100.
    ///
    /// A pure transform of the entry: the captured operand and pending
    /// operation are untouched, and no rounding pass is applied.
    pub fn input_percent(&mut self) {
        if let Some(value) = self.state.current.as_number() {
            self.state.current = Operand::Number(format_value(value / 100.0));
        }
        self.publish();
    }

    /// Folds the pending operation into the current value (the equals key).
    ///
    /// A no-op when nothing is pending or when no second operand has been
    /// typed. Numeric results are rounded to display precision; a division
    /// by zero produces the error operand instead, unrounded. Either way
    /// the pending state is consumed and the next digit starts fresh.
    pub fn calculate(&mut self) {
        let Some(op) = self.state.pending else {
            return;
        };
        if self.state.reset_on_next_input {
            return;
        }
        let (Ok(lhs), Some(rhs)) = (
            self.state.previous.parse::<f64>(),
            self.state.current.as_number(),
        ) else {
            return;
        };

        self.state.current = match op.apply(lhs, rhs) {
            Ok(value) => Operand::Number(format_value(round_to_display(value))),
            Err(CalcError::DivisionByZero) => {
                warn!(lhs, rhs, "division by zero");
                Operand::Error
            }
        };
        self.state.previous.clear();
        self.state.pending = None;
        self.state.reset_on_next_input = true;
        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.renderer.render(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Renderer that keeps every snapshot it was handed.
    #[derive(Debug, Default, Clone)]
    struct RecordingRenderer(Rc<RefCell<Vec<DisplaySnapshot>>>);

    impl DisplayRenderer for RecordingRenderer {
        fn render(&mut self, snapshot: &DisplaySnapshot) {
            self.0.borrow_mut().push(snapshot.clone());
        }
    }

    fn engine_after(actions: &[CalculatorAction]) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        for &action in actions {
            engine.apply(action);
        }
        engine
    }

    fn primary(engine: &CalculatorEngine) -> String {
        engine.snapshot().primary
    }

    use CalculatorAction::{Backspace, Clear, DecimalPoint, Digit, Equals, Operator, Percent};
    use Operation::{Add, Divide, Multiply, Subtract};

    // ===== Constructor tests =====

    #[test]
    fn test_new_starts_fresh() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.state(), &CalculatorState::fresh());
        assert_eq!(primary(&engine), "0");
        assert_eq!(engine.snapshot().secondary, "");
    }

    #[test]
    fn test_default_matches_new() {
        let engine = CalculatorEngine::default();
        assert_eq!(engine.state(), &CalculatorState::fresh());
    }

    #[test]
    fn test_with_renderer_publishes_initial_snapshot() {
        let recorder = RecordingRenderer::default();
        let log = Rc::clone(&recorder.0);
        let _engine = CalculatorEngine::with_renderer(Box::new(recorder));
        let snapshots = log.borrow();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].primary, "0");
        assert_eq!(snapshots[0].secondary, "");
    }

    // ===== Digit entry tests =====

    #[test]
    fn test_digits_append() {
        let engine = engine_after(&[Digit(1), Digit(2), Digit(3)]);
        assert_eq!(primary(&engine), "123");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let engine = engine_after(&[Digit(0), Digit(0), Digit(7)]);
        assert_eq!(primary(&engine), "7");
    }

    #[test]
    fn test_zero_after_decimal_kept() {
        let engine = engine_after(&[Digit(0), DecimalPoint, Digit(0), Digit(5)]);
        assert_eq!(primary(&engine), "0.05");
    }

    #[test]
    fn test_digit_out_of_range_ignored() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit(10);
        assert_eq!(primary(&engine), "0");
    }

    #[test]
    fn test_digit_after_operator_starts_second_operand() {
        let engine = engine_after(&[Digit(5), Operator(Add), Digit(3)]);
        assert_eq!(primary(&engine), "3");
        assert_eq!(engine.snapshot().secondary, "5 +");
    }

    // ===== Decimal point tests =====

    #[test]
    fn test_decimal_point_appends() {
        let engine = engine_after(&[Digit(1), DecimalPoint, Digit(5)]);
        assert_eq!(primary(&engine), "1.5");
    }

    #[test]
    fn test_decimal_point_idempotent() {
        let engine = engine_after(&[Digit(1), DecimalPoint, DecimalPoint]);
        assert_eq!(primary(&engine), "1.");
    }

    #[test]
    fn test_decimal_point_after_operator() {
        let engine = engine_after(&[Digit(5), Operator(Add), DecimalPoint]);
        assert_eq!(primary(&engine), "0.");
        assert!(!engine.state().reset_on_next_input);
    }

    #[test]
    fn test_decimal_point_on_fresh_zero() {
        let engine = engine_after(&[DecimalPoint, Digit(5)]);
        assert_eq!(primary(&engine), "0.5");
    }

    // ===== Backspace tests =====

    #[test]
    fn test_backspace_removes_last_char() {
        let engine = engine_after(&[Digit(1), Digit(2), Digit(3), Backspace]);
        assert_eq!(primary(&engine), "12");
    }

    #[test]
    fn test_backspace_single_char_collapses_to_zero() {
        let engine = engine_after(&[Digit(7), Backspace]);
        assert_eq!(primary(&engine), "0");
    }

    #[test]
    fn test_backspace_on_zero_stays_zero() {
        let engine = engine_after(&[Backspace]);
        assert_eq!(primary(&engine), "0");
    }

    #[test]
    fn test_backspace_negative_single_digit_collapses() {
        // 3 - 5 = -2, then backspace
        let engine = engine_after(&[
            Digit(3),
            Operator(Subtract),
            Digit(5),
            Equals,
            Backspace,
        ]);
        assert_eq!(primary(&engine), "0");
    }

    #[test]
    fn test_backspace_trailing_decimal_point() {
        let engine = engine_after(&[Digit(1), DecimalPoint, Backspace]);
        assert_eq!(primary(&engine), "1");
    }

    // ===== Operation selection tests =====

    #[test]
    fn test_operation_captures_left_operand() {
        let engine = engine_after(&[Digit(4), Digit(2), Operator(Multiply)]);
        let state = engine.state();
        assert_eq!(state.previous, "42");
        assert_eq!(state.pending, Some(Multiply));
        assert!(state.reset_on_next_input);
        assert_eq!(engine.snapshot().secondary, "42 ×");
    }

    #[test]
    fn test_operator_replaced_before_second_operand() {
        let engine = engine_after(&[Digit(3), Operator(Add), Operator(Multiply)]);
        let state = engine.state();
        assert_eq!(state.previous, "3");
        assert_eq!(state.pending, Some(Multiply));
        assert_eq!(primary(&engine), "3");
    }

    #[test]
    fn test_chained_operations_fold() {
        // 3 + 4 × 2 = 14 (3+4 folds on the multiply press)
        let mut engine = engine_after(&[Digit(3), Operator(Add), Digit(4), Operator(Multiply)]);
        assert_eq!(engine.snapshot().secondary, "7 ×");
        engine.apply(Digit(2));
        engine.apply(Equals);
        assert_eq!(primary(&engine), "14");
    }

    #[test]
    fn test_operation_after_result_uses_result() {
        let engine = engine_after(&[Digit(3), Operator(Add), Digit(4), Equals, Operator(Add)]);
        assert_eq!(engine.state().previous, "7");
        assert_eq!(engine.snapshot().secondary, "7 +");
    }

    // ===== Percent tests =====

    #[test]
    fn test_percent_divides_by_hundred() {
        let engine = engine_after(&[Digit(5), Digit(0), Percent]);
        assert_eq!(primary(&engine), "0.5");
    }

    #[test]
    fn test_percent_preserves_pending_operation() {
        let engine = engine_after(&[Digit(8), Operator(Add), Digit(5), Digit(0), Percent]);
        let state = engine.state();
        assert_eq!(state.previous, "8");
        assert_eq!(state.pending, Some(Add));
        assert_eq!(primary(&engine), "0.5");
    }

    #[test]
    fn test_percent_of_zero() {
        let engine = engine_after(&[Percent]);
        assert_eq!(primary(&engine), "0");
    }

    #[test]
    fn test_percent_unrounded() {
        // 0.33333333 / 100 has 10 fraction digits; percent must keep them
        let engine = engine_after(&[
            Digit(1),
            Operator(Divide),
            Digit(3),
            Equals,
            Percent,
        ]);
        assert!(primary(&engine).starts_with("0.00333333"));
    }

    // ===== Calculate tests =====

    #[test]
    fn test_calculate_add() {
        let engine = engine_after(&[Digit(3), Operator(Add), Digit(4), Equals]);
        assert_eq!(primary(&engine), "7");
        let state = engine.state();
        assert_eq!(state.previous, "");
        assert_eq!(state.pending, None);
        assert!(state.reset_on_next_input);
    }

    #[test]
    fn test_calculate_subtract_to_negative() {
        let engine = engine_after(&[Digit(3), Operator(Subtract), Digit(5), Equals]);
        assert_eq!(primary(&engine), "-2");
    }

    #[test]
    fn test_calculate_rounds_float_artifact() {
        let engine = engine_after(&[
            Digit(0),
            DecimalPoint,
            Digit(1),
            Operator(Add),
            Digit(0),
            DecimalPoint,
            Digit(2),
            Equals,
        ]);
        assert_eq!(primary(&engine), "0.3");
    }

    #[test]
    fn test_calculate_repeating_decimal_rounded() {
        let engine = engine_after(&[Digit(1), Operator(Divide), Digit(3), Equals]);
        assert_eq!(primary(&engine), "0.33333333");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let mut engine = engine_after(&[Digit(4), Digit(2)]);
        let before = engine.state().clone();
        engine.apply(Equals);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_equals_without_second_operand_is_noop() {
        let mut engine = engine_after(&[Digit(5), Operator(Add)]);
        let before = engine.state().clone();
        engine.apply(Equals);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_equals_twice_second_is_noop() {
        let mut engine = engine_after(&[Digit(2), Operator(Multiply), Digit(3), Equals]);
        let before = engine.state().clone();
        engine.apply(Equals);
        assert_eq!(engine.state(), &before);
        assert_eq!(primary(&engine), "6");
    }

    #[test]
    fn test_partial_operands_parse() {
        // "3." as left operand and "2." as right operand are both valid
        let engine = engine_after(&[
            Digit(3),
            DecimalPoint,
            Operator(Add),
            Digit(2),
            DecimalPoint,
            Equals,
        ]);
        assert_eq!(primary(&engine), "5");
    }

    // ===== Divide-by-zero tests =====

    #[test]
    fn test_divide_by_zero_shows_error() {
        let engine = engine_after(&[Digit(1), Digit(0), Operator(Divide), Digit(0), Equals]);
        assert_eq!(primary(&engine), "Error");
        let state = engine.state();
        assert_eq!(state.current, Operand::Error);
        assert_eq!(state.previous, "");
        assert_eq!(state.pending, None);
        assert!(state.reset_on_next_input);
    }

    #[test]
    fn test_digit_after_error_starts_fresh() {
        let engine = engine_after(&[
            Digit(1),
            Operator(Divide),
            Digit(0),
            Equals,
            Digit(5),
        ]);
        assert_eq!(primary(&engine), "5");
        assert!(!engine.state().reset_on_next_input);
    }

    #[test]
    fn test_operator_after_error_ignored() {
        let engine = engine_after(&[Digit(1), Operator(Divide), Digit(0), Equals, Operator(Add)]);
        let state = engine.state();
        assert_eq!(state.current, Operand::Error);
        assert_eq!(state.pending, None);
        assert_eq!(state.previous, "");
    }

    #[test]
    fn test_percent_after_error_ignored() {
        let engine = engine_after(&[Digit(1), Operator(Divide), Digit(0), Equals, Percent]);
        assert_eq!(primary(&engine), "Error");
    }

    #[test]
    fn test_backspace_after_error_collapses_to_zero() {
        let engine = engine_after(&[Digit(1), Operator(Divide), Digit(0), Equals, Backspace]);
        assert_eq!(primary(&engine), "0");
    }

    #[test]
    fn test_implicit_fold_divide_by_zero_stops_chain() {
        // 8 ÷ 0 + : the fold errors, so no new operation is installed
        let engine = engine_after(&[Digit(8), Operator(Divide), Digit(0), Operator(Add)]);
        let state = engine.state();
        assert_eq!(state.current, Operand::Error);
        assert_eq!(state.pending, None);
        assert_eq!(state.previous, "");
    }

    #[test]
    fn test_dividing_zero_is_fine() {
        let engine = engine_after(&[Digit(0), Operator(Divide), Digit(4), Equals]);
        assert_eq!(primary(&engine), "0");
    }

    // ===== Reset tests =====

    #[test]
    fn test_reset_from_mid_entry() {
        let engine = engine_after(&[Digit(9), DecimalPoint, Digit(9), Clear]);
        assert_eq!(engine.state(), &CalculatorState::fresh());
    }

    #[test]
    fn test_reset_from_pending_operation() {
        let engine = engine_after(&[Digit(9), Operator(Add), Clear]);
        assert_eq!(engine.state(), &CalculatorState::fresh());
    }

    #[test]
    fn test_reset_from_error() {
        let engine = engine_after(&[Digit(1), Operator(Divide), Digit(0), Equals, Clear]);
        assert_eq!(engine.state(), &CalculatorState::fresh());
    }

    // ===== Renderer notification tests =====

    #[test]
    fn test_every_action_publishes() {
        let recorder = RecordingRenderer::default();
        let log = Rc::clone(&recorder.0);
        let mut engine = CalculatorEngine::with_renderer(Box::new(recorder));

        engine.apply(Digit(3));
        engine.apply(Operator(Add));
        engine.apply(Digit(4));

        let snapshots = log.borrow();
        // initial + one per action
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[1].primary, "3");
        assert_eq!(snapshots[2].secondary, "3 +");
        assert_eq!(snapshots[3].primary, "4");
    }

    #[test]
    fn test_secondary_readout_clears_after_equals() {
        let recorder = RecordingRenderer::default();
        let log = Rc::clone(&recorder.0);
        let mut engine = CalculatorEngine::with_renderer(Box::new(recorder));

        for action in [Digit(6), Operator(Multiply), Digit(7), Equals] {
            engine.apply(action);
        }

        let snapshots = log.borrow();
        let last = snapshots.last().unwrap();
        assert_eq!(last.primary, "42");
        assert_eq!(last.secondary, "");
    }

    // ===== State invariant tests =====

    #[test]
    fn test_pending_implies_previous_nonempty() {
        let engine = engine_after(&[Digit(2), Operator(Add)]);
        let state = engine.state();
        assert!(state.pending.is_some());
        assert!(!state.previous.is_empty());
    }

    #[test]
    fn test_at_most_one_decimal_point() {
        let engine = engine_after(&[
            Digit(1),
            DecimalPoint,
            Digit(2),
            DecimalPoint,
            DecimalPoint,
            Digit(3),
        ]);
        assert_eq!(primary(&engine), "1.23");
    }
}
