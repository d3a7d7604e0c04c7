//! Terminal frontend: keyboard table, keypad grid, app state, rendering.

pub mod app;
pub mod input;
pub mod keypad;
pub mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::render;
