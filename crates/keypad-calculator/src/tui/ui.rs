//! Screen layout and rendering.
//!
//! Three columns: the readout with history underneath, the keypad grid,
//! and a keyboard-shortcut sidebar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::core::engine::ERROR_READOUT;
use crate::tui::app::CalculatorApp;
use crate::tui::keypad::KeypadWidget;

const HELP_LINES: [&str; 9] = [
    "0-9      digits",
    ".        decimal point",
    "+ - * /  operations",
    "%        percent",
    "= Enter  equals",
    "Backsp   delete",
    "Esc Del  clear",
    "Ctrl+Q   quit",
    "Ctrl+C   quit",
];

/// Draws the whole screen for one frame.
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(30),
            Constraint::Length(26),
            Constraint::Length(24),
        ])
        .split(frame.area());

    render_readout_column(app, frame, columns[0]);
    render_keypad(app, frame, columns[1]);
    render_help(frame, columns[2]);
}

fn render_readout_column(app: &CalculatorApp, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_display(app, frame, rows[0]);
    render_history(app, frame, rows[1]);
}

fn render_display(app: &CalculatorApp, frame: &mut Frame, area: Rect) {
    let snapshot = app.engine().snapshot();

    let primary_style = if snapshot.primary == ERROR_READOUT {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::styled(snapshot.secondary, Style::default().fg(Color::DarkGray)),
        Line::styled(snapshot.primary, primary_style),
    ];

    let display = Paragraph::new(lines)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("Display"));
    frame.render_widget(display, area);
}

fn render_history(app: &CalculatorApp, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .history()
        .iter_rev()
        .map(|entry| ListItem::new(entry.display()))
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title("History"));
    frame.render_widget(list, area);
}

fn render_keypad(app: &CalculatorApp, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Keypad");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(KeypadWidget::new(app.keypad()), inner);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = HELP_LINES.iter().map(|s| Line::from(*s)).collect();
    let help = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Keys"));
    frame.render_widget(help, area);
}
