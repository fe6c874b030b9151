//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.
//!
//! ```text
//! ┌ Log file path ───────────────────┐┌──────────┐
//! │/var/log/syslog                   ││ Tail it! │
//! └──────────────────────────────────┘└──────────┘
//!  hint
//!  hint
//! ┌ Log ───────────────────────────────────────────┐
//! │Connected! Please enter a path to a log file ...│
//! └────────────────────────────────────────────────┘
//!  status bar
//! ```

mod input;
mod log;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use tailsocket_app::{App, Transport};

/// Render the entire UI.
pub fn render<T: Transport>(frame: &mut Frame, app: &App<T>) {
    const INPUT_HEIGHT: u16 = 3;
    const HINTS_HEIGHT: u16 = 2;
    const LOG_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(HINTS_HEIGHT),
            Constraint::Min(LOG_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [input_area, hints_area, log_area, status_area] = chunks.as_ref() else {
        return;
    };

    input::render(frame, app, *input_area);
    input::render_hints(frame, *hints_area);
    log::render(frame, app, *log_area);
    status::render(frame, app, *status_area);
}
