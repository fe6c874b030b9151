//! Outbound request path.
//!
//! [`FilePathInput`] owns the file path field and the activation control. It
//! gates submission on the connection being open and the field being
//! non-empty, then hands the path to [`ConnectionManager::send`] exactly once.
//! Submitting leaves the field untouched so the operator keeps seeing what
//! was requested.

use crate::{AppAction, ConnectionManager, ConnectionState, KeyInput, Transport};

/// Help lines shown below the field.
pub const INPUT_HINTS: [&str; 2] = [
    "Paths can be absolute or relative to the server's working directory",
    "Files must be readable by the owner of the server process",
];

/// Which control receives Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The text field.
    #[default]
    Field,
    /// The activation control.
    Button,
}

/// File path field plus activation control.
#[derive(Debug, Clone, Default)]
pub struct FilePathInput {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    focus: Focus,
}

impl FilePathInput {
    /// Create the field, optionally pre-filled. The cursor starts at the end.
    pub fn new(initial: Option<&str>) -> Self {
        let value = initial.unwrap_or_default().to_string();
        let cursor = value.chars().count();
        Self { value, cursor, focus: Focus::Field }
    }

    /// Current field text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Focused control.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Field and button accept input only while the connection is open.
    pub fn is_enabled(state: ConnectionState) -> bool {
        state.is_open()
    }

    /// Submission is permitted: connection open and field non-empty.
    pub fn can_submit(&self, state: ConnectionState) -> bool {
        Self::is_enabled(state) && !self.value.is_empty()
    }

    /// Handle a key aimed at the field set.
    ///
    /// Ignored entirely while the connection is not open. Enter submits from
    /// either control.
    pub fn handle_key<T: Transport>(
        &mut self,
        key: KeyInput,
        manager: &mut ConnectionManager<T>,
    ) -> Vec<AppAction> {
        if !Self::is_enabled(manager.state()) {
            return vec![];
        }

        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.char_len();
                vec![AppAction::Render]
            },
            KeyInput::Tab => {
                self.focus = match self.focus {
                    Focus::Field => Focus::Button,
                    Focus::Button => Focus::Field,
                };
                vec![AppAction::Render]
            },
            KeyInput::Enter => match self.focus {
                Focus::Field => self.submit(manager),
                Focus::Button => self.activate(manager),
            },
            KeyInput::Esc
            | KeyInput::Up
            | KeyInput::Down
            | KeyInput::PageUp
            | KeyInput::PageDown => vec![],
        }
    }

    /// Activation control ("Tail it!").
    pub fn activate<T: Transport>(&self, manager: &mut ConnectionManager<T>) -> Vec<AppAction> {
        self.submit(manager)
    }

    /// Forward the field's value once, if permitted.
    pub fn submit<T: Transport>(&self, manager: &mut ConnectionManager<T>) -> Vec<AppAction> {
        if !self.can_submit(manager.state()) {
            tracing::debug!(state = %manager.state(), empty = self.value.is_empty(), "submit rejected");
            return vec![];
        }

        manager.send(&self.value);
        vec![AppAction::Render]
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value.char_indices().nth(char_idx).map_or(self.value.len(), |(i, _)| i)
    }
}
