//! Fine-tuning record types.
//!
//! A [`TrainingRecord`] serializes to exactly the shape the completion
//! service expects for chat fine-tuning:
//!
//! ```json
//! {"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who authored a turn from the model's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The other party in the conversation.
    User,
    /// The account owner, whose voice the model learns.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged turn inside a training record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One fine-tuning example.
///
/// Either a user/assistant pair taken from a conversation, or a single
/// assistant turn for self-authored text that answers nobody (profile
/// prompt answers, outgoing dating-app messages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub messages: Vec<Turn>,
}

impl TrainingRecord {
    /// Creates a `user` → `assistant` pair.
    pub fn pair(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            messages: vec![Turn::user(user), Turn::assistant(assistant)],
        }
    }

    /// Creates a record holding a single assistant turn.
    pub fn assistant_only(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Turn::assistant(content)],
        }
    }

    /// Returns `true` if this record is a user/assistant pair.
    pub fn is_pair(&self) -> bool {
        matches!(
            self.messages.as_slice(),
            [
                Turn {
                    role: Role::User,
                    ..
                },
                Turn {
                    role: Role::Assistant,
                    ..
                }
            ]
        )
    }

    /// Content of the first user turn, if any.
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
    }

    /// Content of the last assistant turn, if any.
    pub fn assistant_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }
}
