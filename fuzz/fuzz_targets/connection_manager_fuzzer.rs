//! Fuzz target for ConnectionManager lifecycle
//!
//! Prevent state regressions and duplicate notices under hostile event order
//!
//! # Strategy
//!
//! - Transport events in any order: duplicate opens, messages before open,
//!   events after close
//! - Outbound sends interleaved at every state
//! - Repeated disposal, before and after a server-side close
//!
//! # Invariants
//!
//! - State only moves Connecting -> Open -> Closed (or Connecting -> Closed)
//! - Buffer text equals a shadow model built from accepted events
//! - Sends reach the transport only while Open, verbatim
//! - Transport close runs at most once, and exactly once after dispose

#![no_main]

use std::{cell::RefCell, rc::Rc};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tailsocket_app::{
    ConnectionManager, ConnectionState, Connector, SessionConfig, Transport, TransportEvent,
    CONNECTED_NOTICE, DISCONNECTED_NOTICE,
};

#[derive(Debug, Clone, Arbitrary)]
enum ManagerOp {
    Opened,
    Message(String),
    Closed,
    Send(String),
    Dispose,
}

#[derive(Debug, Default)]
struct Wire {
    sent: Vec<String>,
    closes: usize,
}

struct FuzzTransport(Rc<RefCell<Wire>>);

impl Transport for FuzzTransport {
    fn send(&mut self, payload: &str) {
        self.0.borrow_mut().sent.push(payload.to_string());
    }

    fn close(&mut self) {
        self.0.borrow_mut().closes += 1;
    }
}

struct FuzzConnector(Rc<RefCell<Wire>>);

impl Connector for FuzzConnector {
    type Transport = FuzzTransport;

    fn connect(&mut self, _endpoint: &str) -> FuzzTransport {
        FuzzTransport(Rc::clone(&self.0))
    }
}

fn rank(state: ConnectionState) -> u8 {
    match state {
        ConnectionState::Connecting => 0,
        ConnectionState::Open => 1,
        ConnectionState::Closed => 2,
    }
}

fn push_line(model: &mut String, text: &str) {
    model.push_str(text);
    model.push('\n');
}

fuzz_target!(|ops: Vec<ManagerOp>| {
    let wire = Rc::new(RefCell::new(Wire::default()));
    let mut connector = FuzzConnector(Rc::clone(&wire));
    let session = SessionConfig::new("localhost:8888").into_session();
    let mut manager = ConnectionManager::open(session, &mut connector);

    let mut model = String::new();
    let mut expected_sent: Vec<String> = Vec::new();
    let mut disposed = false;

    for op in ops {
        let before = manager.state();

        match op {
            ManagerOp::Opened => {
                manager.handle(TransportEvent::Opened);
                if before == ConnectionState::Connecting {
                    push_line(&mut model, CONNECTED_NOTICE);
                }
            }
            ManagerOp::Message(chunk) => {
                manager.handle(TransportEvent::Message(chunk.clone()));
                if before == ConnectionState::Open {
                    push_line(&mut model, &chunk);
                }
            }
            ManagerOp::Closed => {
                manager.handle(TransportEvent::Closed);
                if before != ConnectionState::Closed {
                    push_line(&mut model, DISCONNECTED_NOTICE);
                }
            }
            ManagerOp::Send(path) => {
                let forwarded = manager.send(&path);
                assert_eq!(forwarded, before == ConnectionState::Open);
                if forwarded {
                    expected_sent.push(path);
                }
            }
            ManagerOp::Dispose => {
                manager.dispose();
                if !disposed && before != ConnectionState::Closed {
                    push_line(&mut model, DISCONNECTED_NOTICE);
                }
                disposed = true;
                assert!(manager.is_disposed());
                assert_eq!(manager.state(), ConnectionState::Closed);
            }
        }

        let after = manager.state();
        assert!(rank(after) >= rank(before), "state regressed: {before} -> {after}");
        assert_eq!(manager.buffer().text(), model);
        assert_eq!(wire.borrow().sent, expected_sent);
        assert!(wire.borrow().closes <= 1);
    }

    drop(manager);
    assert_eq!(wire.borrow().closes, 1);
});
