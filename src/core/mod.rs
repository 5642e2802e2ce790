//! Core processing logic for chattune.
//!
//! This module contains:
//! - [`normalize`] - Whitespace, URL and mojibake cleanup
//! - [`filter`] - Boilerplate notice detection
//! - [`pairing`] - The user/assistant pairing state machine
//! - [`models`] - Training record types
//! - [`processor`] - Full dataset assembly and statistics
//! - [`output`] - JSONL writer
//!
//! # Quick Start
//!
//! ```rust
//! use chattune::core::{BoilerplateFilter, clean_conversation, extract_pairs, to_jsonl};
//! use chattune::Message;
//!
//! let convo = vec![
//!     Message::new("Sam", "hi"),
//!     Message::new("Sam", "Reacted 😂 to your message"),
//!     Message::new("Me", "hello"),
//! ];
//! let cleaned = clean_conversation(convo, &BoilerplateFilter::default(), true);
//! let records = extract_pairs(cleaned, "Me");
//! let jsonl = to_jsonl(&records)?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok::<(), chattune::ChattuneError>(())
//! ```

pub mod filter;
pub mod models;
pub mod normalize;
pub mod output;
pub mod pairing;
pub mod processor;

// Re-export main types for convenience
pub use filter::BoilerplateFilter;
pub use models::{Role, TrainingRecord, Turn};
pub use normalize::{fix_mojibake_encoding, normalize_text, remove_urls};
pub use output::{to_jsonl, write_jsonl};
pub use pairing::{PairExtractor, PairState, clean_conversation, extract_pairs};
pub use processor::{Dataset, ExtractionStats, build_dataset};

// Re-export Message from the crate root
pub use crate::Message;
