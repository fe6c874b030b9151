//! Terminal UI for Tailsocket
//!
//! A thin shell over [`tailsocket_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`tailsocket_app::Runtime`]; the stream itself is handled by
//! [`tailsocket_client`].
//!
//! This crate only handles arguments, logging setup and terminal rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use cli::Args;
pub use tailsocket_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
