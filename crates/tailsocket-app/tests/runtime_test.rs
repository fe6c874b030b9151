//! Runtime loop tests with a scripted driver.
//!
//! The driver replays a fixed event queue and records what it was asked to
//! render, so the loop's exit paths and teardown can be checked without a
//! terminal or a network.

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Arc, Mutex},
};

use tailsocket_app::{
    App, AppEvent, ConnectionManager, ConnectionState, Connector, DISCONNECTED_NOTICE, Driver,
    KeyInput, Runtime, SessionConfig, Transport, TransportEvent,
};

#[derive(Debug, Default)]
struct Wire {
    sent: Vec<String>,
    closes: usize,
}

#[derive(Debug)]
struct SharedTransport(Arc<Mutex<Wire>>);

impl Transport for SharedTransport {
    fn send(&mut self, payload: &str) {
        if let Ok(mut wire) = self.0.lock() {
            wire.sent.push(payload.to_string());
        }
    }

    fn close(&mut self) {
        if let Ok(mut wire) = self.0.lock() {
            wire.closes += 1;
        }
    }
}

#[derive(Default)]
struct SharedConnector(Arc<Mutex<Wire>>);

impl Connector for SharedConnector {
    type Transport = SharedTransport;

    fn connect(&mut self, _endpoint: &str) -> SharedTransport {
        SharedTransport(Arc::clone(&self.0))
    }
}

/// What the driver observed.
#[derive(Debug, Default)]
struct Screen {
    frames: Vec<String>,
    stopped: usize,
}

struct ScriptedDriver {
    events: VecDeque<AppEvent>,
    screen: Arc<Mutex<Screen>>,
    fail_render_after: Option<usize>,
}

impl ScriptedDriver {
    fn new(events: impl IntoIterator<Item = AppEvent>) -> (Self, Arc<Mutex<Screen>>) {
        let screen = Arc::new(Mutex::new(Screen::default()));
        let driver = Self {
            events: events.into_iter().collect(),
            screen: Arc::clone(&screen),
            fail_render_after: None,
        };
        (driver, screen)
    }
}

impl Driver for ScriptedDriver {
    type Error = std::io::Error;
    type Transport = SharedTransport;

    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send {
        let next = self.events.pop_front();
        async move { Ok(next) }
    }

    fn render(&mut self, app: &App<SharedTransport>) -> Result<(), Self::Error> {
        let mut screen = self.screen.lock().map_err(|_| std::io::Error::other("poisoned"))?;
        if self.fail_render_after.is_some_and(|n| screen.frames.len() >= n) {
            return Err(std::io::Error::other("terminal gone"));
        }
        screen.frames.push(app.buffer().text());
        Ok(())
    }

    fn stop(&mut self) {
        if let Ok(mut screen) = self.screen.lock() {
            screen.stopped += 1;
        }
    }
}

fn app() -> (App<SharedTransport>, Arc<Mutex<Wire>>) {
    let mut connector = SharedConnector::default();
    let wire = Arc::clone(&connector.0);
    let config = SessionConfig::new("localhost:8888").with_initial_path(Some("/a.log".into()));
    let manager = ConnectionManager::open(config.into_session(), &mut connector);
    (App::new(manager), wire)
}

#[tokio::test]
async fn quit_key_disposes_and_stops() {
    let (app, wire) = app();
    let (driver, screen) = ScriptedDriver::new([
        AppEvent::Transport(TransportEvent::Opened),
        AppEvent::Key(KeyInput::Enter),
        AppEvent::Transport(TransportEvent::Message("line1".into())),
        AppEvent::Key(KeyInput::Esc),
        AppEvent::Transport(TransportEvent::Message("never seen".into())),
    ]);

    Runtime::new(driver, app).run().await.expect("runtime ok");

    let wire = wire.lock().expect("lock");
    assert_eq!(wire.sent, ["/a.log"]);
    assert_eq!(wire.closes, 1);

    let screen = screen.lock().expect("lock");
    assert_eq!(screen.stopped, 1);
    assert!(screen.frames.iter().all(|f| !f.contains("never seen")));
    assert!(screen.frames.last().is_some_and(|f| f.ends_with("line1\n")));
}

#[tokio::test]
async fn exhausted_events_still_tear_down() {
    let (app, wire) = app();
    let (driver, screen) = ScriptedDriver::new([AppEvent::Transport(TransportEvent::Opened)]);

    let runtime = Runtime::new(driver, app);
    assert_eq!(runtime.app().connection_state(), ConnectionState::Connecting);
    runtime.run().await.expect("runtime ok");

    assert_eq!(wire.lock().expect("lock").closes, 1);
    assert_eq!(screen.lock().expect("lock").stopped, 1);
}

#[tokio::test]
async fn render_error_propagates_after_teardown() {
    let (app, wire) = app();
    let (mut driver, screen) = ScriptedDriver::new([
        AppEvent::Transport(TransportEvent::Opened),
        AppEvent::Transport(TransportEvent::Closed),
    ]);
    driver.fail_render_after = Some(1);

    let err = Runtime::new(driver, app).run().await.expect_err("render fails");
    assert_eq!(err.to_string(), "terminal gone");

    assert_eq!(wire.lock().expect("lock").closes, 1);
    let screen = screen.lock().expect("lock");
    assert_eq!(screen.stopped, 1);
    assert_eq!(screen.frames.len(), 1);
}

#[tokio::test]
async fn server_close_is_rendered() {
    let (app, _) = app();
    let (driver, screen) = ScriptedDriver::new([
        AppEvent::Transport(TransportEvent::Opened),
        AppEvent::Transport(TransportEvent::Closed),
        AppEvent::Tick,
    ]);

    Runtime::new(driver, app).run().await.expect("runtime ok");

    let screen = screen.lock().expect("lock");
    assert!(screen.frames.last().is_some_and(|f| f.ends_with(&format!("{DISCONNECTED_NOTICE}\n"))));
}
