//! Connection lifecycle state machine.
//!
//! [`ConnectionManager`] owns the session's single [`Transport`] and is the
//! only writer of its [`ConnectionState`] and [`LogBuffer`]. Transport events
//! are fed in through [`ConnectionManager::handle`], which returns the
//! [`Notification`]s the shell should react to.
//!
//! # Invariants
//!
//! - State only moves forward: `Connecting → Open → Closed` or
//!   `Connecting → Closed`. Events arriving after `Closed` are ignored.
//! - The connected and disconnected notices are appended exactly once each.
//! - Chunks are appended in delivery order.
//! - The transport is closed at most once, by [`ConnectionManager::dispose`]
//!   or on drop.

use crate::{Connector, ConnectionState, LogBuffer, Session, Transport, TransportEvent};

/// Status line appended when the transport opens.
pub const CONNECTED_NOTICE: &str = "Connected! Please enter a path to a log file above.";

/// Status line appended when the transport closes.
pub const DISCONNECTED_NOTICE: &str = "WebSocket disconnected!";

/// Change notifications for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Connection state moved to the contained value.
    StateChanged(ConnectionState),
    /// Text was appended to the log buffer.
    BufferChanged,
}

/// Connection lifecycle state machine.
#[derive(Debug)]
pub struct ConnectionManager<T: Transport> {
    session: Session,
    state: ConnectionState,
    buffer: LogBuffer,
    /// Owned transport. `None` once disposed.
    transport: Option<T>,
}

impl<T: Transport> ConnectionManager<T> {
    /// Start connecting the session with an unbounded log buffer.
    pub fn open<C>(session: Session, connector: &mut C) -> Self
    where
        C: Connector<Transport = T>,
    {
        Self::open_with_buffer(session, connector, LogBuffer::new())
    }

    /// Start connecting the session, accumulating into `buffer`.
    ///
    /// Returns immediately in [`ConnectionState::Connecting`].
    pub fn open_with_buffer<C>(session: Session, connector: &mut C, buffer: LogBuffer) -> Self
    where
        C: Connector<Transport = T>,
    {
        let endpoint = session.endpoint();
        tracing::info!(session = %session.id(), %endpoint, "opening transport");

        let transport = connector.connect(&endpoint);
        Self { session, state: ConnectionState::Connecting, buffer, transport: Some(transport) }
    }

    /// Process a transport event and return resulting notifications.
    pub fn handle(&mut self, event: TransportEvent) -> Vec<Notification> {
        match event {
            TransportEvent::Opened => self.on_open(),
            TransportEvent::Message(chunk) => self.on_message(chunk),
            TransportEvent::Closed => self.on_close(),
        }
    }

    /// Forward `path` verbatim to the transport.
    ///
    /// Only permitted while [`ConnectionState::Open`]; otherwise nothing is
    /// sent. Returns whether the path was forwarded.
    pub fn send(&mut self, path: &str) -> bool {
        if !self.state.is_open() {
            tracing::warn!(state = %self.state, "send while not open, dropping request");
            return false;
        }

        let Some(transport) = self.transport.as_mut() else {
            return false;
        };

        tracing::info!(session = %self.session.id(), path, "requesting tail");
        transport.send(path);
        true
    }

    /// Close the transport and release it.
    ///
    /// Idempotent: the transport's `close` runs exactly once no matter how
    /// often this is called or whether the stream already closed itself. A
    /// session that was not yet closed moves to [`ConnectionState::Closed`].
    pub fn dispose(&mut self) -> Vec<Notification> {
        let Some(mut transport) = self.transport.take() else {
            return vec![];
        };

        tracing::debug!(session = %self.session.id(), "disposing transport");
        transport.close();
        self.on_close()
    }

    /// Transport has been released by [`ConnectionManager::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.transport.is_none()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Accumulated log text.
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    /// Session this manager serves.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn on_open(&mut self) -> Vec<Notification> {
        if !self.transition(ConnectionState::Open) {
            tracing::debug!(state = %self.state, "ignoring open event");
            return vec![];
        }

        self.buffer.push_status(CONNECTED_NOTICE);
        vec![Notification::StateChanged(ConnectionState::Open), Notification::BufferChanged]
    }

    fn on_message(&mut self, chunk: String) -> Vec<Notification> {
        if !self.state.is_open() {
            tracing::warn!(state = %self.state, bytes = chunk.len(), "ignoring message");
            return vec![];
        }

        tracing::trace!(bytes = chunk.len(), "chunk received");
        self.buffer.push_chunk(chunk);
        vec![Notification::BufferChanged]
    }

    fn on_close(&mut self) -> Vec<Notification> {
        if !self.transition(ConnectionState::Closed) {
            tracing::debug!("ignoring close event after close");
            return vec![];
        }

        self.buffer.push_status(DISCONNECTED_NOTICE);
        vec![Notification::StateChanged(ConnectionState::Closed), Notification::BufferChanged]
    }

    fn transition(&mut self, next: ConnectionState) -> bool {
        if !self.state.can_transition_to(next) {
            return false;
        }

        tracing::info!(session = %self.session.id(), from = %self.state, to = %next, "connection state changed");
        self.state = next;
        true
    }
}

impl<T: Transport> Drop for ConnectionManager<T> {
    fn drop(&mut self) {
        let _ = self.dispose();
    }
}
