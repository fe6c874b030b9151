//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions ([`KeyInput`], resize) and system ticks.
//! - Transport notifications (open, message, close).

use crate::TransportEvent;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Event reported by the session's transport.
    Transport(TransportEvent),
}

/// Keys the shell reacts to, independent of the terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (submit the focused control).
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (move focus between the path field and the button).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key (scroll the log back one line).
    Up,
    /// Down arrow key (scroll the log forward one line).
    Down,
    /// Page up key (scroll the log back one page).
    PageUp,
    /// Page down key (scroll the log forward one page).
    PageDown,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}
