//! The on-screen button grid.
//!
//! Layout (the bottom row is three wider keys):
//! ```text
//! [ C ] [ ⌫ ] [ % ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ − ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [  0  ] [  .  ] [  =  ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::engine::CalculatorAction;
use crate::core::operations::Operation;

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A single keypad button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The symbol on the button face.
    pub label: &'static str,
    /// The action the button delivers to the engine.
    pub action: CalculatorAction,
    /// Whether the button is currently highlighted.
    pub pressed: bool,
}

impl KeypadButton {
    fn new(label: &'static str, action: CalculatorAction) -> Self {
        Self {
            label,
            action,
            pressed: false,
        }
    }

    /// Creates a digit button; digits above 9 fall back to `0`.
    #[must_use]
    pub fn digit(d: u8) -> Self {
        let label = DIGIT_LABELS.get(usize::from(d)).unwrap_or(&"0");
        Self::new(label, CalculatorAction::Digit(d))
    }

    /// Creates an operator button labeled with the operation symbol.
    #[must_use]
    pub fn operator(op: Operation) -> Self {
        Self::new(op.symbol(), CalculatorAction::Operator(op))
    }

    /// Creates the decimal-point button.
    #[must_use]
    pub fn decimal() -> Self {
        Self::new(".", CalculatorAction::DecimalPoint)
    }

    /// Creates the equals button.
    #[must_use]
    pub fn equals() -> Self {
        Self::new("=", CalculatorAction::Equals)
    }

    /// Creates the clear button.
    #[must_use]
    pub fn clear() -> Self {
        Self::new("C", CalculatorAction::Clear)
    }

    /// Creates the backspace button.
    #[must_use]
    pub fn backspace() -> Self {
        Self::new("⌫", CalculatorAction::Backspace)
    }

    /// Creates the percent button.
    #[must_use]
    pub fn percent() -> Self {
        Self::new("%", CalculatorAction::Percent)
    }

    /// True for the operator/equals column styling.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        matches!(
            self.action,
            CalculatorAction::Operator(_) | CalculatorAction::Equals
        )
    }
}

/// The button grid: four rows of four keys and a bottom row of three.
#[derive(Debug, Clone)]
pub struct Keypad {
    rows: Vec<Vec<KeypadButton>>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout.
    #[must_use]
    pub fn new() -> Self {
        let rows = vec![
            vec![
                KeypadButton::clear(),
                KeypadButton::backspace(),
                KeypadButton::percent(),
                KeypadButton::operator(Operation::Divide),
            ],
            vec![
                KeypadButton::digit(7),
                KeypadButton::digit(8),
                KeypadButton::digit(9),
                KeypadButton::operator(Operation::Multiply),
            ],
            vec![
                KeypadButton::digit(4),
                KeypadButton::digit(5),
                KeypadButton::digit(6),
                KeypadButton::operator(Operation::Subtract),
            ],
            vec![
                KeypadButton::digit(1),
                KeypadButton::digit(2),
                KeypadButton::digit(3),
                KeypadButton::operator(Operation::Add),
            ],
            vec![
                KeypadButton::digit(0),
                KeypadButton::decimal(),
                KeypadButton::equals(),
            ],
        ];
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of buttons.
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// The buttons of one row.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[KeypadButton]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterates over all buttons, row-major.
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.rows.iter().flatten()
    }

    /// The button at a grid position.
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Finds the button that delivers the given action.
    #[must_use]
    pub fn find_by_action(&self, action: CalculatorAction) -> Option<&KeypadButton> {
        self.buttons().find(|b| b.action == action)
    }

    /// Highlights the button for an action, releasing all others.
    pub fn highlight_action(&mut self, action: CalculatorAction) {
        for button in self.rows.iter_mut().flatten() {
            button.pressed = button.action == action;
        }
    }

    /// Releases every button.
    pub fn release_all(&mut self) {
        for button in self.rows.iter_mut().flatten() {
            button.pressed = false;
        }
    }

    /// Maps a click inside `area` to the grid position it landed on.
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
        if !area.contains(ratatui::layout::Position { x, y }) {
            return None;
        }
        let cell_h = area.height / self.row_count() as u16;
        if cell_h == 0 {
            return None;
        }
        let row = usize::from((y - area.y) / cell_h);
        let cols = self.rows.get(row)?.len();
        let cell_w = area.width / cols as u16;
        if cell_w == 0 {
            return None;
        }
        let col = usize::from((x - area.x) / cell_w);
        if col < cols {
            Some((row, col))
        } else {
            None
        }
    }

    /// Maps a click inside `area` to the action of the button it hit.
    #[must_use]
    pub fn click(&self, area: Rect, x: u16, y: u16) -> Option<CalculatorAction> {
        let (row, col) = self.hit_test(area, x, y)?;
        self.button_at(row, col).map(|b| b.action)
    }
}

/// Ratatui widget that draws the keypad grid.
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Wraps a keypad for rendering.
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }

    fn button_style(button: &KeypadButton) -> Style {
        if button.pressed {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if button.is_operator() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.keypad.row_count() as u16;
        if rows == 0 || area.height < rows {
            return;
        }
        let cell_h = area.height / rows;

        for (r, row) in (0u16..).zip(&self.keypad.rows) {
            let cols = row.len() as u16;
            if cols == 0 || area.width < cols {
                continue;
            }
            let cell_w = area.width / cols;
            for (c, button) in (0u16..).zip(row) {
                let cell = Rect::new(area.x + c * cell_w, area.y + r * cell_h, cell_w, cell_h);
                Paragraph::new(button.label)
                    .alignment(Alignment::Center)
                    .style(Self::button_style(button))
                    .block(Block::default().borders(Borders::ALL))
                    .render(cell, buf);
            }
        }
    }
}
