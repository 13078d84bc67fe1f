//! Status bar
//!
//! Shows the latest status message, or key hints for the current screen.

use podrace_app::Screen;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const SELECTION_HINTS: &str = "Tab switch list | Up/Down move | Enter choose | s start | q quit";
const RACE_HINTS: &str = "Space accelerate | n new race | q quit";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.screen() {
        Screen::Selection => SELECTION_HINTS,
        Screen::Race => RACE_HINTS,
    };

    let line = match app.status_message() {
        Some(message) => Line::from(vec![
            Span::raw(" "),
            Span::raw(message.to_string()),
            Span::styled(format!("  ({hints})"), Style::default().fg(Color::Gray)),
        ]),
        None => Line::from(vec![Span::raw(" "), Span::raw(hints)]),
    };

    let paragraph =
        Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
