//! Raw export structures and per-record conversion.
//!
//! Parsers in [`crate::parsers`] read files; the types here describe what
//! is inside them.

pub mod hinge;
pub mod instagram;

pub use hinge::{HingeData, HingeMessage, HingePrompt};
pub use instagram::{InstagramRawMessage, parse_instagram_message};
