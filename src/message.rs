//! Message records read from chat exports.
//!
//! [`Message`] is the normalized form of one line of chat history. Parsers
//! convert their platform's raw records into it; the cleaning and pairing
//! stages only ever see this type.
//!
//! # Example
//!
//! ```
//! use chattune::Message;
//!
//! let msg = Message::new("Alice", "Hello, world!");
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.content(), "Hello, world!");
//! assert!(msg.timestamp().is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message: who sent it, what it said, and when.
///
/// Messages are read once from an export and are not mutated afterwards;
/// cleaning produces new values via [`with_content`](Self::with_content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    pub sender: String,

    /// Text content of the message.
    pub content: String,

    /// When the message was sent, if the export records it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Creates a new message without a timestamp.
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp: None,
        }
    }

    /// Builder method to set the timestamp.
    ///
    /// ```rust
    /// use chattune::Message;
    /// use chrono::Utc;
    ///
    /// let msg = Message::new("Alice", "Hello").with_timestamp(Utc::now());
    /// assert!(msg.timestamp().is_some());
    /// ```
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Returns a copy of this message with different content.
    #[must_use]
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            sender: self.sender.clone(),
            content: content.into(),
            timestamp: self.timestamp,
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp, if available.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Returns `true` if this message was sent by `self_name`.
    pub fn is_from(&self, self_name: &str) -> bool {
        self.sender == self_name
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
