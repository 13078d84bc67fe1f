//! Selection screen
//!
//! Track and driver lists side by side. The focused list shows the cursor;
//! the chosen entry of each list is starred.

use podrace_app::{CatalogState, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::App;

const CURSOR_PREFIX: &str = "> ";
const NO_CURSOR_PREFIX: &str = "  ";
const SELECTED_MARKER: &str = " *";

/// Render the selection screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let [tracks_area, racers_area] = chunks.as_ref() else {
        return;
    };

    let selected_track = app.session().selected_track();
    let tracks = app.tracks().iter().map(|t| (t.name.clone(), Some(t.id) == selected_track));
    render_list(frame, app, *tracks_area, " Tracks ", Focus::Tracks, app.track_cursor(), tracks);

    let selected_driver = app.session().selected_driver();
    let racers = app.racers().iter().map(|r| {
        let label = format!(
            "{}  spd {} acc {} hdl {}",
            r.driver_name, r.top_speed, r.acceleration, r.handling
        );
        (label, Some(r.id) == selected_driver)
    });
    render_list(frame, app, *racers_area, " Drivers ", Focus::Racers, app.racer_cursor(), racers);
}

fn render_list(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    list_focus: Focus,
    cursor: usize,
    entries: impl Iterator<Item = (String, bool)>,
) {
    let focused = app.focus() == list_focus;

    let mut items: Vec<ListItem> = entries
        .enumerate()
        .map(|(i, (label, selected))| {
            let prefix = if focused && i == cursor { CURSOR_PREFIX } else { NO_CURSOR_PREFIX };
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if selected { SELECTED_MARKER } else { "" };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(label, style),
                Span::styled(marker, Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    if items.is_empty() {
        let placeholder = match app.catalog() {
            CatalogState::Loading => "Loading...",
            CatalogState::Ready => "Nothing available",
            CatalogState::Failed => "Unavailable",
        };
        items.push(ListItem::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray))));
    }

    let border_style =
        if focused { Style::default().fg(Color::Cyan) } else { Style::default() };
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(title);

    frame.render_widget(List::new(items).block(block), area);
}
