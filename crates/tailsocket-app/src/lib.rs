//! Application layer for Tailsocket
//!
//! Pure state machines and a generic runtime for watching a remote log file
//! over a single bidirectional text stream. Nothing in this crate performs
//! I/O: transports and terminals plug in through traits, so the same code runs
//! in production and in tests.
//!
//! # Components
//!
//! - [`ConnectionManager`]: connection lifecycle state machine that owns the
//!   [`Transport`] and the [`LogBuffer`]
//! - [`FilePathInput`]: the outbound request path (file path field and the
//!   activation control)
//! - [`App`]: shell state machine (keyboard, scrolling, render requests)
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using a Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod manager;
mod path_input;
mod runtime;
mod session;
mod state;
mod transport;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::{AppEvent, KeyInput};
pub use manager::{CONNECTED_NOTICE, ConnectionManager, DISCONNECTED_NOTICE, Notification};
pub use path_input::{FilePathInput, Focus, INPUT_HINTS};
pub use runtime::Runtime;
pub use session::{ConfigError, DEFAULT_ORIGIN, ENDPOINT_PATH, Session, SessionConfig, SessionId};
pub use state::{ConnectionState, EntryKind, LogBuffer, LogEntry};
pub use transport::{Connector, Transport, TransportEvent};
