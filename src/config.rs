//! Configuration types for extraction and chat.
//!
//! Plain structs with builder methods and serde derives, so they can be
//! filled from CLI flags or deserialized from a file by library users.
//!
//! - [`ExtractConfig`] - Instagram inbox + Hinge data → JSONL dataset
//! - [`HingeConfig`] - raw Hinge export → cleaned Hinge document
//! - [`ChatConfig`] - completion model and persona prompt
//! - [`VoiceConfig`] - text-to-speech voice and audio format
//!
//! # Example
//!
//! ```rust
//! use chattune::config::ExtractConfig;
//!
//! let config = ExtractConfig::new("inbox/", "Lydia Graveline")
//!     .with_hinge_data("clean_data/lydia_hinge_data.json")
//!     .with_output("dataset.jsonl");
//!
//! assert!(config.fix_encoding);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ChattuneError, Result};

/// Default dataset file name.
pub const DEFAULT_OUTPUT: &str = "formatted_finetuning_data.jsonl";

/// Default completion endpoint (OpenAI-compatible).
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";

/// Default speech-synthesis endpoint.
pub const DEFAULT_SPEECH_BASE_URL: &str = "https://api.elevenlabs.io";

/// Env var holding the completion API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Env var holding the speech API key.
pub const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

/// Configuration for building the fine-tuning dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Instagram `messages/inbox` directory, walked recursively for `*.json`.
    pub inbox_dir: PathBuf,

    /// Cleaned Hinge document produced by the `hinge` step (optional).
    pub hinge_data: Option<PathBuf>,

    /// Where to write the JSONL dataset.
    pub output: PathBuf,

    /// Sender name of the account owner (the assistant's voice).
    pub self_name: String,

    /// Undo Meta's Latin-1 mojibake (default: true)
    pub fix_encoding: bool,
}

impl ExtractConfig {
    pub fn new(inbox_dir: impl Into<PathBuf>, self_name: impl Into<String>) -> Self {
        Self {
            inbox_dir: inbox_dir.into(),
            hinge_data: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            self_name: self_name.into(),
            fix_encoding: true,
        }
    }

    #[must_use]
    pub fn with_hinge_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.hinge_data = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }
}

/// Configuration for cleaning a raw Hinge export.
///
/// The input directory must hold `matches.json`, `prompts.json` and
/// `user.json` as found in Hinge's data download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HingeConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl HingeConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn matches_file(&self) -> PathBuf {
        self.input_dir.join("matches.json")
    }

    pub fn prompts_file(&self) -> PathBuf {
        self.input_dir.join("prompts.json")
    }

    pub fn user_file(&self) -> PathBuf {
        self.input_dir.join("user.json")
    }
}

/// Persona prompt sent as the developer message on every turn.
pub fn default_system_prompt(bot_name: &str) -> String {
    format!(
        "Your name is {bot_name}, and you're having a conversation with someone you've just met. \
         Start by introducing yourself and asking them about themselves.\n\n\
         Please respond as if you were having a conversation with someone you're interested in \
         getting to know. Ask follow-up questions, share your own thoughts and experiences, and \
         be open and honest in your responses."
    )
}

/// Configuration for the completion side of the chatbot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Fine-tuned model id, e.g. `ft:gpt-4o-2024-08-06:personal:...`.
    pub model: String,

    /// Persona name used in the default system prompt.
    pub bot_name: String,

    /// Developer/system message sent with every request.
    pub system_prompt: String,

    /// Sampling temperature (default: 0.9)
    pub temperature: f32,

    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
}

impl ChatConfig {
    pub fn new(model: impl Into<String>, bot_name: impl Into<String>) -> Self {
        let bot_name = bot_name.into();
        Self {
            model: model.into(),
            system_prompt: default_system_prompt(&bot_name),
            bot_name,
            temperature: 0.9,
            base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Configuration for the speech side of the voice chatbot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub voice_id: String,

    /// Speech model (default: `eleven_flash_v2_5`, the fast cheap one)
    pub model_id: String,

    /// Audio encoding (default: `mp3_44100_128`)
    pub output_format: String,

    pub base_url: String,
}

impl VoiceConfig {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            model_id: "eleven_flash_v2_5".to_string(),
            output_format: "mp3_44100_128".to_string(),
            base_url: DEFAULT_SPEECH_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Normalize API keys pasted by users.
/// - Trims whitespace
/// - Strips surrounding ASCII or unicode quotes (" ' “ ” ‘ ’)
pub fn normalize_api_key(raw: &str) -> String {
    fn is_quote_char(c: char) -> bool {
        matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’')
    }

    raw.trim()
        .trim_matches(is_quote_char)
        .trim()
        .to_string()
}

/// Reads an API key from the environment.
///
/// # Errors
///
/// Returns [`ChattuneError::MissingEnv`] when the variable is unset or blank.
pub fn api_key_from_env(var: &str) -> Result<String> {
    let key = std::env::var(var)
        .map(|v| normalize_api_key(&v))
        .unwrap_or_default();
    if key.is_empty() {
        return Err(ChattuneError::missing_env(var));
    }
    Ok(key)
}
