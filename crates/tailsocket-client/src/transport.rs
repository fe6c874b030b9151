//! WebSocket transport for the client.
//!
//! Each [`WsConnector::connect`] spawns one task that owns the socket. The
//! task reports [`TransportEvent`]s on the connector's shared channel and
//! takes outbound commands from the [`WsTransport`] handle. It always finishes
//! by reporting [`TransportEvent::Closed`], whether the server hung up, the
//! handshake failed, or the handle asked it to stop.

use futures::{SinkExt, StreamExt};
use tailsocket_app::{Connector, Transport, TransportEvent};
use thiserror::Error;
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tokio_tungstenite::tungstenite::Message;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No tokio runtime to spawn the stream task on.
    #[error("no async runtime available: {0}")]
    NoRuntime(String),

    /// Handshake failed or the server refused the connection.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Stream error after the connection was established.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Outbound commands for the stream task.
#[derive(Debug)]
enum Command {
    Text(String),
    Close,
}

/// Opens WebSocket streams on the current tokio runtime.
#[derive(Debug, Clone)]
pub struct WsConnector {
    runtime: Handle,
    events: UnboundedSender<TransportEvent>,
}

impl WsConnector {
    /// Create a connector bound to the current tokio runtime.
    ///
    /// Returns the connector and the receiving end of its event channel.
    /// Events from every stream it opens arrive on that one receiver, in the
    /// order the stream delivered them.
    pub fn new() -> Result<(Self, UnboundedReceiver<TransportEvent>), TransportError> {
        let runtime = Handle::try_current().map_err(|e| TransportError::NoRuntime(e.to_string()))?;

        // Another component may already have installed a provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let (events, rx) = mpsc::unbounded_channel();
        Ok((Self { runtime, events }, rx))
    }
}

impl Connector for WsConnector {
    type Transport = WsTransport;

    fn connect(&mut self, endpoint: &str) -> WsTransport {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        self.runtime.spawn(run_stream(endpoint.to_string(), commands_rx, self.events.clone()));
        WsTransport { commands }
    }
}

/// Handle to a stream task.
///
/// Dropping the handle without calling [`Transport::close`] also ends the
/// task once it notices the command channel is gone.
#[derive(Debug)]
pub struct WsTransport {
    commands: UnboundedSender<Command>,
}

impl Transport for WsTransport {
    fn send(&mut self, payload: &str) {
        if self.commands.send(Command::Text(payload.to_string())).is_err() {
            tracing::warn!("stream task gone, dropping outbound message");
        }
    }

    fn close(&mut self) {
        // The task may already have exited after a server-side close
        let _ = self.commands.send(Command::Close);
    }
}

/// Run one stream to completion, then report the close.
async fn run_stream(
    endpoint: String,
    mut commands: UnboundedReceiver<Command>,
    events: UnboundedSender<TransportEvent>,
) {
    match stream(&endpoint, &mut commands, &events).await {
        Ok(()) => tracing::info!(%endpoint, "stream closed"),
        Err(e) => tracing::warn!(%endpoint, error = %e, "stream failed"),
    }

    let _ = events.send(TransportEvent::Closed);
}

async fn stream(
    endpoint: &str,
    commands: &mut UnboundedReceiver<Command>,
    events: &UnboundedSender<TransportEvent>,
) -> Result<(), TransportError> {
    let connect = tokio_tungstenite::connect_async(endpoint);
    tokio::pin!(connect);

    let ws = loop {
        tokio::select! {
            result = &mut connect => {
                let (ws, _response) = result.map_err(|e| TransportError::Connect(e.to_string()))?;
                break ws;
            },
            command = commands.recv() => match command {
                Some(Command::Close) | None => {
                    tracing::debug!("closed before handshake completed");
                    return Ok(());
                },
                Some(Command::Text(_)) => {
                    tracing::warn!("dropping outbound message sent before open");
                },
            },
        }
    };

    tracing::debug!(endpoint, "stream open");
    if events.send(TransportEvent::Opened).is_err() {
        return Ok(());
    }

    let (mut sink, mut source) = ws.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Text(payload)) => {
                    sink.send(Message::Text(payload))
                        .await
                        .map_err(|e| TransportError::Stream(format!("send failed: {e}")))?;
                },
                Some(Command::Close) | None => {
                    if let Err(e) = sink.close().await {
                        tracing::debug!(error = %e, "close handshake failed");
                    }
                    return Ok(());
                },
            },
            message = source.next() => {
                let chunk = match message {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Binary(bytes))) => String::from_utf8_lossy(&bytes).into_owned(),
                    Some(Ok(Message::Close(frame))) => {
                        tracing::debug!(?frame, "server closed stream");
                        return Ok(());
                    },
                    Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                    Some(Err(e)) => return Err(TransportError::Stream(e.to_string())),
                    None => return Ok(()),
                };

                if events.send(TransportEvent::Message(chunk)).is_err() {
                    return Ok(());
                }
            },
        }
    }
}
