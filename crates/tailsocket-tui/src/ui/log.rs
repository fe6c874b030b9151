//! Log view
//!
//! Displays the accumulated log text, pinned to the newest line unless the
//! operator scrolled back.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tailsocket_app::{App, EntryKind, Transport};

const BORDER_SIZE: u16 = 2;

/// Render the log view.
pub fn render<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let buffer = app.buffer();

    let title = match app.scroll_back() {
        0 => " Log ".to_string(),
        n => format!(" Log (+{n} below) "),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if buffer.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            app.placeholder(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let end = buffer.line_count().saturating_sub(app.scroll_back());
    let start = end.saturating_sub(visible_height);

    let status_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = buffer
        .entries()
        .flat_map(|entry| {
            let style = match entry.kind {
                EntryKind::Status => status_style,
                EntryKind::Chunk => Style::default(),
            };
            entry.text.split('\n').map(move |line| Line::styled(line, style))
        })
        .skip(start)
        .take(end - start)
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
