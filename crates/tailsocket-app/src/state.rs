//! Observable connection state.
//!
//! [`ConnectionState`] is the three-valued lifecycle marker of a session's
//! transport and [`LogBuffer`] is the text shown to the operator. Both are
//! owned and mutated exclusively by [`crate::ConnectionManager`]; everything
//! else only reads them.

use std::{collections::VecDeque, fmt};

/// Connection lifecycle state.
///
/// ```text
/// ┌────────────┐  opened  ┌──────┐  closed  ┌────────┐
/// │ Connecting │─────────>│ Open │─────────>│ Closed │
/// └────────────┘          └──────┘          └────────┘
///        │                                       ↑
///        └───────────────── closed ──────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Transport requested, not yet confirmed.
    Connecting,
    /// Transport confirmed ready.
    Open,
    /// Transport closed or failed. Terminal.
    Closed,
}

impl ConnectionState {
    /// Outbound requests are permitted.
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// No further transitions are possible.
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }

    /// Whether `next` is a valid successor of this state.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Connecting, Self::Open) | (Self::Connecting | Self::Open, Self::Closed)
        )
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Origin of a buffer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Synthetic status line (connected / disconnected notices).
    Status,
    /// Chunk received from the transport.
    Chunk,
}

/// One appended piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Where the text came from.
    pub kind: EntryKind,
    /// Text exactly as appended, without the separating newline.
    pub text: String,
}

impl LogEntry {
    fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// Append-only accumulated text.
///
/// Entries are kept in delivery order and rendered each followed by a
/// newline. Appends are O(1) amortized. Unbounded unless built with
/// [`LogBuffer::with_entry_limit`], in which case the oldest entries are
/// evicted first.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    /// Maximum retained entries. `None` for unbounded.
    limit: Option<usize>,
    /// Display lines across retained entries.
    lines: usize,
    /// Entries dropped by the retention limit.
    evicted: u64,
}

impl LogBuffer {
    /// Create an empty, unbounded buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer retaining at most `limit` entries.
    ///
    /// A limit of zero is treated as one so the latest entry is always shown.
    pub fn with_entry_limit(limit: usize) -> Self {
        Self { limit: Some(limit.max(1)), ..Self::default() }
    }

    pub(crate) fn push_status(&mut self, text: &str) {
        self.push(LogEntry { kind: EntryKind::Status, text: text.to_string() });
    }

    pub(crate) fn push_chunk(&mut self, text: String) {
        self.push(LogEntry { kind: EntryKind::Chunk, text });
    }

    fn push(&mut self, entry: LogEntry) {
        self.lines += entry.line_count();
        self.entries.push_back(entry);

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                if let Some(old) = self.entries.pop_front() {
                    self.lines -= old.line_count();
                    self.evicted += 1;
                }
            }
        }
    }

    /// Full accumulated text: every entry followed by a newline.
    pub fn text(&self) -> String {
        let capacity = self.entries.iter().map(|e| e.text.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for entry in &self.entries {
            text.push_str(&entry.text);
            text.push('\n');
        }
        text
    }

    /// Display lines in order. Chunks spanning several lines are split.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().flat_map(|e| e.text.split('\n'))
    }

    /// Number of display lines returned by [`LogBuffer::lines`].
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Retained entries in delivery order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// Most recently appended entry. `None` if empty.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nothing appended yet (or everything evicted).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retention limit. `None` if unbounded.
    pub fn entry_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Entries dropped by the retention limit.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}
