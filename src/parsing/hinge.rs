//! Hinge export structures, raw and cleaned.
//!
//! Hinge's data download is a directory of JSON files. Three matter here:
//!
//! - `matches.json`: array of matches, each with an optional `chats` array
//!   of `{body, timestamp}` (only messages the account owner sent)
//! - `prompts.json`: array of profile prompts `{prompt, text, created}`
//! - `user.json`: profile, carrying `first_name`
//!
//! The cleaned form, [`HingeData`], is what the `hinge` step writes and the
//! `extract` step reads back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One chat line inside a match.
#[derive(Debug, Deserialize)]
pub struct HingeRawChat {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub timestamp: Value,
}

/// One match. Matches that never chatted have no `chats` key.
#[derive(Debug, Deserialize)]
pub struct HingeRawMatch {
    #[serde(default)]
    pub chats: Option<Vec<HingeRawChat>>,
}

/// `matches.json`: a bare array, or an object with a `matches` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HingeMatches {
    List(Vec<HingeRawMatch>),
    Wrapped { matches: Vec<HingeRawMatch> },
}

impl HingeMatches {
    pub fn matches(&self) -> &[HingeRawMatch] {
        match self {
            HingeMatches::List(m) | HingeMatches::Wrapped { matches: m } => m,
        }
    }
}

/// One answered (or unanswered) profile prompt.
#[derive(Debug, Deserialize)]
pub struct HingeRawPrompt {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created: Value,
}

/// `prompts.json`: a bare array, or an object with a `prompts` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HingePrompts {
    List(Vec<HingeRawPrompt>),
    Wrapped { prompts: Vec<HingeRawPrompt> },
}

impl HingePrompts {
    pub fn prompts(&self) -> &[HingeRawPrompt] {
        match self {
            HingePrompts::List(p) | HingePrompts::Wrapped { prompts: p } => p,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HingeProfile {
    #[serde(default)]
    pub first_name: Option<String>,
}

/// `user.json`. Older exports put `first_name` at the top level, newer ones
/// under `profile`.
#[derive(Debug, Default, Deserialize)]
pub struct HingeUser {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub profile: Option<HingeProfile>,
}

impl HingeUser {
    /// The account owner's first name, or `""` if the export lacks it.
    pub fn first_name(&self) -> String {
        self.first_name
            .as_deref()
            .or_else(|| self.profile.as_ref().and_then(|p| p.first_name.as_deref()))
            .unwrap_or_default()
            .to_string()
    }
}

/// A cleaned outgoing Hinge message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HingeMessage {
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

/// A cleaned profile prompt answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HingePrompt {
    #[serde(default)]
    pub prompt_question: String,
    pub text: String,
    #[serde(default)]
    pub created: String,
}

/// The cleaned Hinge document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HingeData {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub messages: Vec<HingeMessage>,
    #[serde(default)]
    pub prompts: Vec<HingePrompt>,
}

/// Renders a loosely-typed timestamp field as text.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flattens every match's chats into non-empty, trimmed messages.
pub fn flatten_matches(matches: &HingeMatches) -> Vec<HingeMessage> {
    matches
        .matches()
        .iter()
        .filter_map(|m| m.chats.as_ref())
        .flatten()
        .filter_map(|chat| {
            let body = chat.body.as_deref()?.trim();
            if body.is_empty() {
                return None;
            }
            Some(HingeMessage {
                message: body.to_string(),
                timestamp: value_to_text(&chat.timestamp),
            })
        })
        .collect()
}

/// Keeps prompts that have an answer.
pub fn flatten_prompts(prompts: &HingePrompts) -> Vec<HingePrompt> {
    prompts
        .prompts()
        .iter()
        .filter_map(|p| {
            let text = p.text.as_deref().filter(|t| !t.is_empty())?;
            Some(HingePrompt {
                prompt_question: p.prompt.clone().unwrap_or_default(),
                text: text.to_string(),
                created: value_to_text(&p.created),
            })
        })
        .collect()
}
