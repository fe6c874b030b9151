//! End-to-end session scenarios against a recording transport.
//!
//! Each test drives an [`App`] through the same event sequence a real stream
//! would deliver and ends with oracle checks on:
//! - the endpoint the transport was opened toward
//! - the payloads forwarded to the transport
//! - the exact accumulated log text
//! - how often the transport was closed

use std::{cell::RefCell, rc::Rc};

use tailsocket_app::{
    App, AppAction, AppEvent, CONNECTED_NOTICE, ConnectionManager, ConnectionState, Connector,
    DISCONNECTED_NOTICE, KeyInput, LogBuffer, Session, SessionConfig, SessionId, Transport,
    TransportEvent,
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Wire {
    endpoints: Vec<String>,
    sent: Vec<String>,
    closes: usize,
}

#[derive(Debug)]
struct RecordingTransport(Rc<RefCell<Wire>>);

impl Transport for RecordingTransport {
    fn send(&mut self, payload: &str) {
        self.0.borrow_mut().sent.push(payload.to_string());
    }

    fn close(&mut self) {
        self.0.borrow_mut().closes += 1;
    }
}

#[derive(Default)]
struct RecordingConnector(Rc<RefCell<Wire>>);

impl Connector for RecordingConnector {
    type Transport = RecordingTransport;

    fn connect(&mut self, endpoint: &str) -> RecordingTransport {
        self.0.borrow_mut().endpoints.push(endpoint.to_string());
        RecordingTransport(Rc::clone(&self.0))
    }
}

fn session(config: SessionConfig) -> Session {
    let id = SessionId::from_uuid(Uuid::from_u128(0x1111_2222_3333_4444_5555_6666_7777_8888));
    Session::with_id(config, id)
}

fn start(config: SessionConfig) -> (App<RecordingTransport>, Rc<RefCell<Wire>>) {
    let mut connector = RecordingConnector::default();
    let wire = Rc::clone(&connector.0);
    let manager = ConnectionManager::open(session(config), &mut connector);
    (App::new(manager), wire)
}

fn deliver(app: &mut App<RecordingTransport>, event: TransportEvent) -> Vec<AppAction> {
    app.handle(AppEvent::Transport(event))
}

fn type_path(app: &mut App<RecordingTransport>, path: &str) {
    for c in path.chars() {
        app.handle(AppEvent::Key(KeyInput::Char(c)));
    }
}

#[test]
fn tail_a_file_then_server_disconnects() {
    let (mut app, wire) = start(SessionConfig::new("localhost:8888"));

    assert_eq!(wire.borrow().endpoints, [
        "ws://localhost:8888/websocket/11112222-3333-4444-5555-666677778888"
    ]);
    assert_eq!(app.connection_state(), ConnectionState::Connecting);
    assert!(app.buffer().is_empty());

    deliver(&mut app, TransportEvent::Opened);
    assert_eq!(app.connection_state(), ConnectionState::Open);

    type_path(&mut app, "/var/log/app.log");
    app.handle(AppEvent::Key(KeyInput::Enter));
    assert_eq!(wire.borrow().sent, ["/var/log/app.log"]);

    deliver(&mut app, TransportEvent::Message("line1".into()));
    deliver(&mut app, TransportEvent::Message("line2".into()));
    deliver(&mut app, TransportEvent::Closed);

    assert_eq!(
        app.buffer().text(),
        format!("{CONNECTED_NOTICE}\nline1\nline2\n{DISCONNECTED_NOTICE}\n")
    );
    assert_eq!(app.connection_state(), ConnectionState::Closed);
    assert_eq!(app.input().value(), "/var/log/app.log");

    // Submission is disabled once closed
    app.handle(AppEvent::Key(KeyInput::Enter));
    assert!(app.activate().is_empty());
    assert_eq!(wire.borrow().sent.len(), 1);
}

#[test]
fn refused_connection_only_reports_disconnect() {
    let (mut app, wire) = start(SessionConfig::new("localhost:8888"));

    deliver(&mut app, TransportEvent::Closed);

    assert_eq!(app.buffer().text(), format!("{DISCONNECTED_NOTICE}\n"));
    assert_eq!(app.connection_state(), ConnectionState::Closed);
    assert!(!app.can_submit());

    app.dispose();
    assert_eq!(wire.borrow().closes, 1);
}

#[test]
fn secure_origin_selects_wss() {
    let config = SessionConfig::from_origin("https://logs.example.com").expect("valid origin");
    let (_app, wire) = start(config);

    assert_eq!(wire.borrow().endpoints, [
        "wss://logs.example.com/websocket/11112222-3333-4444-5555-666677778888"
    ]);
}

#[test]
fn host_port_override_wins_over_origin() {
    let config = SessionConfig::from_origin("http://localhost:8888")
        .expect("valid origin")
        .with_host_port(Some("10.0.0.5:9000".into()));
    let (_app, wire) = start(config);

    assert!(wire.borrow().endpoints[0].starts_with("ws://10.0.0.5:9000/websocket/"));
}

#[test]
fn every_activation_sends_again() {
    let config = SessionConfig::new("localhost:8888").with_initial_path(Some("/a.log".into()));
    let (mut app, wire) = start(config);
    deliver(&mut app, TransportEvent::Opened);

    app.activate();
    app.handle(AppEvent::Key(KeyInput::Enter));
    app.handle(AppEvent::Key(KeyInput::Tab));
    app.handle(AppEvent::Key(KeyInput::Enter));

    assert_eq!(wire.borrow().sent, ["/a.log", "/a.log", "/a.log"]);
}

#[test]
fn teardown_closes_transport_once() {
    let (mut app, wire) = start(SessionConfig::new("localhost:8888"));
    deliver(&mut app, TransportEvent::Opened);
    deliver(&mut app, TransportEvent::Message("x".into()));

    assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), [AppAction::Quit]);
    app.dispose();

    // Late events from the transport task are ignored after teardown
    assert!(deliver(&mut app, TransportEvent::Message("late".into())).is_empty());
    assert!(deliver(&mut app, TransportEvent::Closed).is_empty());
    drop(app);

    let wire = wire.borrow();
    assert_eq!(wire.closes, 1);
}

#[test]
fn teardown_while_connecting() {
    let (mut app, wire) = start(SessionConfig::new("localhost:8888"));

    app.dispose();

    assert_eq!(app.connection_state(), ConnectionState::Closed);
    assert_eq!(app.buffer().text(), format!("{DISCONNECTED_NOTICE}\n"));
    assert_eq!(wire.borrow().closes, 1);
}

#[test]
fn bounded_buffer_keeps_newest_entries() {
    let mut connector = RecordingConnector::default();
    let manager = ConnectionManager::open_with_buffer(
        session(SessionConfig::new("localhost:8888")),
        &mut connector,
        LogBuffer::with_entry_limit(2),
    );
    let mut app = App::new(manager);

    deliver(&mut app, TransportEvent::Opened);
    for chunk in ["a", "b", "c"] {
        deliver(&mut app, TransportEvent::Message(chunk.into()));
    }

    assert_eq!(app.buffer().text(), "b\nc\n");
    assert_eq!(app.buffer().evicted(), 2);
}
