//! Status bar
//!
//! Displays connection state, endpoint and buffer size.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tailsocket_app::{App, ConnectionState, Transport};

/// Render the status bar.
pub fn render<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Open => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Closed => Span::styled("Disconnected", Style::default().fg(Color::Red)),
    };

    let buffer = app.buffer();
    let mut info = format!(" | {} | Entries: {}", app.session().endpoint(), buffer.len());
    if buffer.evicted() > 0 {
        info.push_str(&format!(" ({} dropped)", buffer.evicted()));
    }

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(info, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
