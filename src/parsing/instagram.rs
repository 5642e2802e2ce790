//! Raw Instagram DM export structures.
//!
//! Each conversation in `your_instagram_activity/messages/inbox/<thread>/`
//! is one or more `message_N.json` files shaped like:
//!
//! ```json
//! {"participants": [...], "messages": [
//!     {"sender_name": "Sam", "timestamp_ms": 1705315860000, "content": "hey"}
//! ]}
//! ```
//!
//! Messages are stored newest-first.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::Message;
use crate::core::normalize::fix_mojibake_encoding;

/// Raw Instagram message structure for deserialization.
///
/// Media-only messages have no `content`; they come through with empty
/// content and are dropped during cleaning.
#[derive(Debug, Deserialize)]
pub struct InstagramRawMessage {
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub timestamp_ms: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Instagram conversation file wrapper.
#[derive(Debug, Deserialize)]
pub struct InstagramExport {
    pub messages: Vec<InstagramRawMessage>,
}

/// Parses a millisecond timestamp to DateTime.
pub fn parse_ms_timestamp(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}

/// Converts a raw record into a [`Message`].
///
/// Content is passed through untouched (cleaning normalizes it later).
/// The sender name gets the mojibake fix when `fix_encoding` is set so it
/// can be compared against a properly encoded self-identity.
pub fn parse_instagram_message(msg: &InstagramRawMessage, fix_encoding: bool) -> Message {
    let sender = if fix_encoding {
        fix_mojibake_encoding(&msg.sender_name)
    } else {
        msg.sender_name.clone()
    };

    let mut message = Message::new(sender, msg.content.clone().unwrap_or_default());
    if let Some(ts) = msg.timestamp_ms.and_then(parse_ms_timestamp) {
        message = message.with_timestamp(ts);
    }
    message
}
