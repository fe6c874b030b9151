//! Transport abstraction.
//!
//! A transport is a bidirectional, message-oriented text stream to a fixed
//! endpoint. Sending and closing are fire-and-forget; everything the stream
//! reports back arrives later as a [`TransportEvent`], in stream order, through
//! whatever channel the runtime polls.

/// Events reported by a transport.
///
/// Every termination cause, including a refused connection, surfaces as
/// [`TransportEvent::Closed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Stream established and ready for sends.
    Opened,
    /// Text chunk received.
    Message(String),
    /// Stream terminated for any reason.
    Closed,
}

/// Outbound half of a transport.
///
/// Implementations must never block the caller.
pub trait Transport {
    /// Queue a raw text payload. No envelope or framing is added.
    fn send(&mut self, payload: &str);

    /// Request termination. Safe to call on an already closed stream.
    fn close(&mut self);
}

/// Factory that starts a transport toward an endpoint.
pub trait Connector {
    /// Transport produced by this connector.
    type Transport: Transport;

    /// Start connecting to `endpoint` and return immediately.
    ///
    /// Establishment (or failure) is reported asynchronously as
    /// [`TransportEvent::Opened`] or [`TransportEvent::Closed`].
    fn connect(&mut self, endpoint: &str) -> Self::Transport;
}
