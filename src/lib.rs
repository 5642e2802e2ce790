//! # chattune
//!
//! Turn your own chat history into a fine-tuning dataset, then talk to the
//! model trained on it.
//!
//! ## Overview
//!
//! The pipeline has three steps:
//! - **Hinge cleaning**: flatten a Hinge data download into one small
//!   JSON document ([`parsers::HingeParser`])
//! - **Extraction**: walk an Instagram DM inbox, drop platform noise, pair
//!   each reply of yours with the message it answered, and write
//!   `{"messages": [...]}` records as JSONL ([`core::build_dataset`])
//! - **Chat**: a terminal loop against the fine-tuned model, with optional
//!   text-to-speech ([`chat::ChatSession`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chattune::config::ExtractConfig;
//! use chattune::core::{BoilerplateFilter, build_dataset, write_jsonl};
//!
//! fn main() -> chattune::Result<()> {
//!     let config = ExtractConfig::new("messages/inbox", "Lydia Graveline");
//!     let dataset = build_dataset(&config, &BoilerplateFilter::default())?;
//!     write_jsonl(&dataset.records, &config.output)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - normalization, boilerplate filter, pairing, JSONL output
//! - [`parsers`] - Instagram and Hinge export readers
//! - [`parsing`] - raw export structures
//! - [`chat`] - chat loop, completion and speech clients
//! - [`config`] - configuration structs
//! - [`cli`] - CLI argument types (`cli` feature)
//! - [`error`] - unified error type ([`ChattuneError`], [`Result`])

pub mod chat;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChattuneError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chattune::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ChattuneError, Result};

    pub use crate::config::{ChatConfig, ExtractConfig, HingeConfig, VoiceConfig};

    pub use crate::core::{
        BoilerplateFilter, Dataset, ExtractionStats, Role, TrainingRecord, Turn, build_dataset,
        clean_conversation, extract_pairs, normalize_text, to_jsonl, write_jsonl,
    };

    pub use crate::parsers::{HingeParser, InstagramParser};

    pub use crate::chat::{ChatSession, Responder, Speaker};
}
