//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{App, AppEvent, Transport};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations multiplex every event source (keyboard, resize, ticks and
/// the transport's event channel) into one ordered stream of [`AppEvent`]s.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, ratatui for rendering,
///   tokio-tungstenite events forwarded over a channel
/// - **Tests**: scripted event queues
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Transport owned by the session this driver renders.
    type Transport: Transport;

    /// Wait for the next input event.
    ///
    /// Returns `None` once every event source is exhausted.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App<Self::Transport>) -> Result<(), Self::Error>;

    /// Release platform resources. Called once when the runtime exits.
    fn stop(&mut self);
}
