//! Fuzz target for the App shell
//!
//! Keyboard editing and scrolling must never panic on arbitrary text
//!
//! # Strategy
//!
//! - Multibyte characters typed at arbitrary cursor positions
//! - Scrolling across buffers of any size and terminal sizes near zero
//! - Transport events interleaved with key input
//!
//! # Invariants
//!
//! - Cursor stays within the field's character count
//! - Scroll-back never exceeds the buffer's line count
//! - Every outbound request is the field's non-empty value

#![no_main]

use std::{cell::RefCell, rc::Rc};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tailsocket_app::{
    App, AppEvent, ConnectionManager, Connector, KeyInput, SessionConfig, Transport,
    TransportEvent,
};

#[derive(Debug, Clone, Arbitrary)]
enum Input {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Resize(u16, u16),
    Opened,
    Message(String),
    Closed,
}

impl Input {
    fn into_event(self) -> AppEvent {
        match self {
            Input::Char(c) => AppEvent::Key(KeyInput::Char(c)),
            Input::Enter => AppEvent::Key(KeyInput::Enter),
            Input::Backspace => AppEvent::Key(KeyInput::Backspace),
            Input::Delete => AppEvent::Key(KeyInput::Delete),
            Input::Tab => AppEvent::Key(KeyInput::Tab),
            Input::Left => AppEvent::Key(KeyInput::Left),
            Input::Right => AppEvent::Key(KeyInput::Right),
            Input::Up => AppEvent::Key(KeyInput::Up),
            Input::Down => AppEvent::Key(KeyInput::Down),
            Input::PageUp => AppEvent::Key(KeyInput::PageUp),
            Input::PageDown => AppEvent::Key(KeyInput::PageDown),
            Input::Home => AppEvent::Key(KeyInput::Home),
            Input::End => AppEvent::Key(KeyInput::End),
            Input::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            Input::Opened => AppEvent::Transport(TransportEvent::Opened),
            Input::Message(chunk) => AppEvent::Transport(TransportEvent::Message(chunk)),
            Input::Closed => AppEvent::Transport(TransportEvent::Closed),
        }
    }
}

struct SinkTransport(Rc<RefCell<Vec<String>>>);

impl Transport for SinkTransport {
    fn send(&mut self, payload: &str) {
        self.0.borrow_mut().push(payload.to_string());
    }

    fn close(&mut self) {}
}

struct SinkConnector(Rc<RefCell<Vec<String>>>);

impl Connector for SinkConnector {
    type Transport = SinkTransport;

    fn connect(&mut self, _endpoint: &str) -> SinkTransport {
        SinkTransport(Rc::clone(&self.0))
    }
}

fuzz_target!(|data: (Option<String>, Vec<Input>)| {
    let (initial_path, inputs) = data;

    let sent = Rc::new(RefCell::new(Vec::new()));
    let mut connector = SinkConnector(Rc::clone(&sent));
    let config = SessionConfig::new("localhost:8888").with_initial_path(initial_path);
    let mut app = App::new(ConnectionManager::open(config.into_session(), &mut connector));

    for input in inputs {
        let sends_before = sent.borrow().len();
        app.handle(input.into_event());

        let field = app.input();
        assert!(field.cursor() <= field.value().chars().count());
        assert!(app.scroll_back() <= app.buffer().line_count());

        let sent = sent.borrow();
        if sent.len() > sends_before {
            assert_eq!(sent.len(), sends_before + 1);
            assert_eq!(sent.last().map(String::as_str), Some(field.value()));
            assert!(!field.value().is_empty());
        }
    }
});
