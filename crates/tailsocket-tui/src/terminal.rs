//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Transport events arrive on the
//! channel returned by [`tailsocket_client::WsConnector::new`].

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    cursor::Show,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tailsocket_app::{App, AppEvent, ConfigError, Driver, KeyInput, TransportEvent};
use tailsocket_client::{TransportError, WsTransport};
use thiserror::Error;
use tokio::{
    sync::mpsc::UnboundedReceiver,
    time::{Interval, MissedTickBehavior},
};

use crate::ui;

/// Interval between [`AppEvent::Tick`]s.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid session configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be set up.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal while active: raw mode and the alternate screen are
/// entered on construction and left again by [`Driver::stop`] or on drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    transport_events: UnboundedReceiver<TransportEvent>,
    /// Every transport sender is gone.
    transport_done: bool,
    tick: Interval,
    active: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(transport_events: UnboundedReceiver<TransportEvent>) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        let mut tick = tokio::time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ok(Self {
            terminal,
            event_stream,
            transport_events,
            transport_done: false,
            tick,
            active: true,
        })
    }

    /// Convert a crossterm key event to `KeyInput`.
    ///
    /// Ctrl-C maps to Esc so both quit.
    pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(KeyInput::Esc),
                _ => None,
            };
        }

        match event.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::PageUp => Some(KeyInput::PageUp),
            KeyCode::PageDown => Some(KeyInput::PageDown),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Transport = WsTransport;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            tokio::select! {
                biased;

                // Terminal events
                maybe_event = self.event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        if let Some(key) = Self::convert_key(key_event) {
                            return Ok(Some(AppEvent::Key(key)));
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        return Ok(Some(AppEvent::Resize(cols, rows)));
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(TerminalError::Io(e)),
                    None => return Ok(None),
                },

                // Transport events
                maybe_event = self.transport_events.recv(), if !self.transport_done => {
                    match maybe_event {
                        Some(event) => return Ok(Some(AppEvent::Transport(event))),
                        None => {
                            tracing::debug!("transport channel closed");
                            self.transport_done = true;
                        },
                    }
                },

                _ = self.tick.tick() => return Ok(Some(AppEvent::Tick)),
            }
        }
    }

    fn render(&mut self, app: &App<WsTransport>) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = stdout().execute(Show);
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
