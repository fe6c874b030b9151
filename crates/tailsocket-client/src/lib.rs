//! Client
//!
//! WebSocket implementation of the [`tailsocket_app::Connector`] and
//! [`tailsocket_app::Transport`] seams. Protocol logic stays in the Sans-IO
//! [`tailsocket_app::ConnectionManager`]; this crate only moves text frames
//! between the network and a channel of [`tailsocket_app::TransportEvent`]s.
//!
//! # Components
//!
//! - [`WsConnector`]: opens one stream per session on the tokio runtime
//! - [`WsTransport`]: handle used by the manager to send and close
//! - [`TransportError`]: failures inside the stream task

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod transport;

pub use transport::{TransportError, WsConnector, WsTransport};
