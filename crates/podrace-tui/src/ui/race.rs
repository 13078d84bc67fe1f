//! Race screen
//!
//! Track header with countdown or race state, then the live leaderboard.
//! Once the race finishes the final results replace the leaderboard.

use podrace_core::{RacePhase, Standing};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::App;

const HEADER_HEIGHT: u16 = 3;

/// Render the race screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(1)])
        .split(area);

    let [header_area, board_area] = chunks.as_ref() else {
        return;
    };

    render_header(frame, app, *header_area);
    render_board(frame, app, *board_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.race();
    let track = view.race.as_ref().map_or("", |race| race.track.name.as_str());

    let state = match view.phase {
        RacePhase::Idle | RacePhase::Created => Span::raw("Get ready"),
        RacePhase::Countdown => Span::styled(
            format!("Starting in {}", view.countdown.unwrap_or_default()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        RacePhase::Started | RacePhase::Racing => Span::styled(
            format!("Racing | accelerations: {}", view.accelerations),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        RacePhase::Finished => Span::styled("Finished", Style::default().fg(Color::Cyan)),
        RacePhase::Failed => Span::styled("Race failed", Style::default().fg(Color::Red)),
    };

    let block = Block::default().borders(Borders::ALL).title(format!(" {track} "));
    frame.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), state])).block(block), area);
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.race();
    let (title, rows, show_segment) = if view.results.is_empty() {
        (" Leaderboard ", &view.standings, true)
    } else {
        (" Results ", &view.results, false)
    };

    let items: Vec<ListItem> = rows.iter().map(|row| standing_item(row, show_segment)).collect();
    let block = Block::default().borders(Borders::ALL).title(title);

    frame.render_widget(List::new(items).block(block), area);
}

fn standing_item(standing: &Standing, show_segment: bool) -> ListItem<'static> {
    let style = if standing.is_you {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::raw(" "), Span::styled(standing.to_string(), style)];
    if show_segment {
        spans.push(Span::styled(
            format!("  segment {}", standing.segment),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}
