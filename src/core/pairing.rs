//! Turn a cleaned conversation into user/assistant pairs.
//!
//! The extractor walks a conversation in chronological order with two
//! states:
//!
//! | State | Other sender | Self |
//! |-------|--------------|------|
//! | `AwaitingOther` | hold it → `HaveOther` | drop it |
//! | `HaveOther(held)` | replace `held` | emit pair → `AwaitingOther` |
//!
//! Only the *latest* message from the other party before a self reply is
//! used as the `user` turn. A self message with nothing held is dropped,
//! so a burst of self messages contributes only its first line. A trailing
//! unanswered message is discarded.
//!
//! ```
//! use chattune::Message;
//! use chattune::core::pairing::extract_pairs;
//!
//! let convo = vec![
//!     Message::new("Sam", "hi"),
//!     Message::new("Me", "hello"),
//!     Message::new("Me", "how are you?"),
//! ];
//! let pairs = extract_pairs(convo, "Me");
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].user_content(), Some("hi"));
//! assert_eq!(pairs[0].assistant_content(), Some("hello"));
//! ```

use crate::Message;
use crate::core::filter::BoilerplateFilter;
use crate::core::models::TrainingRecord;
use crate::core::normalize::normalize_text;

/// Pairing state between messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PairState {
    /// Nothing held; waiting for the other party to say something.
    #[default]
    AwaitingOther,
    /// Holding the most recent message from the other party.
    HaveOther(Message),
}

/// Incremental pair extractor for a single conversation.
#[derive(Debug, Clone)]
pub struct PairExtractor {
    self_name: String,
    state: PairState,
}

impl PairExtractor {
    /// Creates an extractor for the account identified by `self_name`.
    pub fn new(self_name: impl Into<String>) -> Self {
        Self {
            self_name: self_name.into(),
            state: PairState::AwaitingOther,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PairState {
        &self.state
    }

    /// Feeds the next message and returns a pair when one completes.
    pub fn push(&mut self, msg: Message) -> Option<TrainingRecord> {
        if !msg.is_from(&self.self_name) {
            self.state = PairState::HaveOther(msg);
            return None;
        }

        match std::mem::take(&mut self.state) {
            PairState::HaveOther(held) => Some(TrainingRecord::pair(held.content, msg.content)),
            PairState::AwaitingOther => None,
        }
    }

    /// Ends the conversation, returning the unpaired message if one was held.
    pub fn finish(self) -> Option<Message> {
        match self.state {
            PairState::HaveOther(held) => Some(held),
            PairState::AwaitingOther => None,
        }
    }
}

/// Pairs a chronological conversation.
pub fn extract_pairs(
    messages: impl IntoIterator<Item = Message>,
    self_name: &str,
) -> Vec<TrainingRecord> {
    let mut extractor = PairExtractor::new(self_name);
    messages
        .into_iter()
        .filter_map(|msg| extractor.push(msg))
        .collect()
}

/// Normalizes every message and drops boilerplate.
///
/// Order is preserved. Messages that are empty after normalization are
/// dropped too.
pub fn clean_conversation(
    messages: impl IntoIterator<Item = Message>,
    filter: &BoilerplateFilter,
    fix_encoding: bool,
) -> Vec<Message> {
    messages
        .into_iter()
        .filter_map(|msg| {
            let content = normalize_text(&msg.content, fix_encoding);
            if filter.is_boilerplate(&content) {
                None
            } else {
                Some(msg.with_content(content))
            }
        })
        .collect()
}
