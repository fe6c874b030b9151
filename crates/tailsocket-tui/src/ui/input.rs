//! Request field
//!
//! Displays the file path field, the activation control and the hints below
//! them. Both controls are greyed out until the connection opens.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tailsocket_app::{App, FilePathInput, Focus, INPUT_HINTS, Transport};

const BUTTON_LABEL: &str = "Tail it!";
const BUTTON_WIDTH: u16 = 12;
const FIELD_MIN_WIDTH: u16 = 10;
const BORDER_OFFSET: u16 = 1; // inside left/top border

/// Render the field and the activation control.
pub fn render<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(FIELD_MIN_WIDTH), Constraint::Length(BUTTON_WIDTH)])
        .split(area);

    let [field_area, button_area] = chunks.as_ref() else {
        return;
    };

    let input = app.input();
    let enabled = FilePathInput::is_enabled(app.connection_state());
    let focused = |focus: Focus| enabled && input.focus() == focus;

    let field_block = Block::default()
        .borders(Borders::ALL)
        .title(" Log file path ")
        .border_style(border_style(focused(Focus::Field)));
    let field_style = if enabled { Style::default().fg(Color::White) } else { disabled() };
    let field = Paragraph::new(input.value()).style(field_style).block(field_block);
    frame.render_widget(field, *field_area);

    let button_style = if !app.can_submit() {
        disabled()
    } else if focused(Focus::Button) {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let button_block =
        Block::default().borders(Borders::ALL).border_style(border_style(focused(Focus::Button)));
    let button = Paragraph::new(BUTTON_LABEL).style(button_style).centered().block(button_block);
    frame.render_widget(button, *button_area);

    if focused(Focus::Field) {
        let inner_width = field_area.width.saturating_sub(2 * BORDER_OFFSET + 1);
        let cursor_offset = (input.cursor() as u16).min(inner_width);
        let cursor_x = field_area.x.saturating_add(BORDER_OFFSET).saturating_add(cursor_offset);
        let cursor_y = field_area.y.saturating_add(BORDER_OFFSET);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Render the usage hints.
pub fn render_hints(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = INPUT_HINTS.iter().map(|hint| Line::from(format!(" {hint}"))).collect();
    let hints = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}

fn border_style(focused: bool) -> Style {
    if focused { Style::default().fg(Color::Cyan) } else { Style::default().fg(Color::DarkGray) }
}

fn disabled() -> Style {
    Style::default().fg(Color::DarkGray)
}
