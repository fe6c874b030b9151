//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the session's
//! [`ConnectionManager`] and the shell-side state around it (request field,
//! scroll position, terminal size).
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Feeds transport events to the manager and turns its notifications into
//!   render requests.
//! - Pins the log view to the newest line after every append.
//! - Routes keys to the request path, scroll-back, or quit.

use crate::{
    AppAction, AppEvent, ConnectionManager, ConnectionState, FilePathInput, KeyInput, LogBuffer,
    Notification, Session, Transport,
};

/// Rows taken by everything that is not the log view.
const CHROME_ROWS: u16 = 8;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies, fully testable with a mock transport.
#[derive(Debug)]
pub struct App<T: Transport> {
    manager: ConnectionManager<T>,
    input: FilePathInput,
    /// Lines scrolled back from the bottom. 0 means pinned to the newest line.
    scroll_back: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl<T: Transport> App<T> {
    /// Wrap a freshly opened manager. The request field is pre-filled from
    /// the session's initial path.
    pub fn new(manager: ConnectionManager<T>) -> Self {
        let input = FilePathInput::new(manager.session().initial_path());
        Self { manager, input, scroll_back: 0, terminal_size: (80, 24) }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Transport(event) => {
                let notes = self.manager.handle(event);
                self.apply(&notes)
            },
        }
    }

    /// Dispose the session and quit.
    pub fn quit(&mut self) -> Vec<AppAction> {
        let _ = self.manager.dispose();
        vec![AppAction::Quit]
    }

    /// Release the transport. Idempotent.
    pub fn dispose(&mut self) {
        let notes = self.manager.dispose();
        let _ = self.apply(&notes);
    }

    /// Submit the request field through the activation control.
    pub fn activate(&mut self) -> Vec<AppAction> {
        self.input.activate(&mut self.manager)
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => self.quit(),
            KeyInput::Up => self.scroll_up(1),
            KeyInput::Down => self.scroll_down(1),
            KeyInput::PageUp => self.scroll_up(self.page_size()),
            KeyInput::PageDown => self.scroll_down(self.page_size()),
            _ => self.input.handle_key(key, &mut self.manager),
        }
    }

    fn apply(&mut self, notes: &[Notification]) -> Vec<AppAction> {
        if notes.is_empty() {
            return vec![];
        }

        if notes.contains(&Notification::BufferChanged) {
            self.scroll_back = 0;
        }
        vec![AppAction::Render]
    }

    fn scroll_up(&mut self, lines: usize) -> Vec<AppAction> {
        let max = self.manager.buffer().line_count().saturating_sub(1);
        self.scroll_back = (self.scroll_back + lines).min(max);
        vec![AppAction::Render]
    }

    fn scroll_down(&mut self, lines: usize) -> Vec<AppAction> {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
        vec![AppAction::Render]
    }

    fn page_size(&self) -> usize {
        usize::from(self.terminal_size.1.saturating_sub(CHROME_ROWS).max(1))
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    /// Session being watched.
    pub fn session(&self) -> &Session {
        self.manager.session()
    }

    /// Accumulated log text.
    pub fn buffer(&self) -> &LogBuffer {
        self.manager.buffer()
    }

    /// Request field state.
    pub fn input(&self) -> &FilePathInput {
        &self.input
    }

    /// Activation control is enabled.
    pub fn can_submit(&self) -> bool {
        self.input.can_submit(self.manager.state())
    }

    /// Lines scrolled back from the newest line. 0 when pinned to the bottom.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Text shown while nothing has been received yet.
    pub fn placeholder(&self) -> String {
        format!("Hello! Connecting to {}...", self.manager.session().host_port())
    }

    /// Underlying connection manager.
    pub fn manager(&self) -> &ConnectionManager<T> {
        &self.manager
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{Connector, SessionConfig, TransportEvent};

    #[derive(Debug)]
    struct NullTransport(Rc<RefCell<usize>>);

    impl Transport for NullTransport {
        fn send(&mut self, _payload: &str) {}

        fn close(&mut self) {
            *self.0.borrow_mut() += 1;
        }
    }

    struct NullConnector(Rc<RefCell<usize>>);

    impl Connector for NullConnector {
        type Transport = NullTransport;

        fn connect(&mut self, _endpoint: &str) -> NullTransport {
            NullTransport(Rc::clone(&self.0))
        }
    }

    fn app() -> (App<NullTransport>, Rc<RefCell<usize>>) {
        let closes = Rc::new(RefCell::new(0));
        let mut connector = NullConnector(Rc::clone(&closes));
        let config = SessionConfig::new("localhost:8888").with_initial_path(Some("/a.log".into()));
        let manager = ConnectionManager::open(config.into_session(), &mut connector);
        (App::new(manager), closes)
    }

    fn open_with_lines(app: &mut App<NullTransport>, n: usize) {
        app.handle(AppEvent::Transport(TransportEvent::Opened));
        for i in 0..n {
            app.handle(AppEvent::Transport(TransportEvent::Message(format!("line {i}"))));
        }
    }

    #[test]
    fn initial_path_prefills_input() {
        let (app, _) = app();
        assert_eq!(app.input().value(), "/a.log");
        assert!(!app.can_submit());
        assert_eq!(app.placeholder(), "Hello! Connecting to localhost:8888...");
    }

    #[test]
    fn transport_events_request_render() {
        let (mut app, _) = app();

        let actions = app.handle(AppEvent::Transport(TransportEvent::Opened));
        assert_eq!(actions, [AppAction::Render]);
        assert!(app.can_submit());

        // Ignored events produce nothing to render
        let actions = app.handle(AppEvent::Transport(TransportEvent::Opened));
        assert!(actions.is_empty());
    }

    #[test]
    fn append_repins_to_bottom() {
        let (mut app, _) = app();
        open_with_lines(&mut app, 20);

        app.handle(AppEvent::Key(KeyInput::Up));
        app.handle(AppEvent::Key(KeyInput::Up));
        assert_eq!(app.scroll_back(), 2);

        app.handle(AppEvent::Transport(TransportEvent::Message("new".into())));
        assert_eq!(app.scroll_back(), 0);
    }

    #[test]
    fn scroll_is_clamped() {
        let (mut app, _) = app();
        open_with_lines(&mut app, 3);

        for _ in 0..10 {
            app.handle(AppEvent::Key(KeyInput::PageUp));
        }
        assert_eq!(app.scroll_back(), 3);

        app.handle(AppEvent::Key(KeyInput::PageDown));
        assert_eq!(app.scroll_back(), 0);
    }

    #[test]
    fn esc_quits_and_disposes() {
        let (mut app, closes) = app();
        open_with_lines(&mut app, 1);

        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), [AppAction::Quit]);
        assert_eq!(app.connection_state(), ConnectionState::Closed);

        app.dispose();
        drop(app);
        assert_eq!(*closes.borrow(), 1);
    }

    #[test]
    fn resize_updates_size() {
        let (mut app, _) = app();
        assert_eq!(app.handle(AppEvent::Resize(120, 40)), [AppAction::Render]);
        assert_eq!(app.terminal_size(), (120, 40));
    }
}
