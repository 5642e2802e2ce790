//! Chat export parsers.
//!
//! - [`InstagramParser`] - Instagram DM inbox (one JSON file per conversation)
//! - [`HingeParser`] - Hinge data download (matches, prompts, user)
//!
//! # Example
//!
//! ```rust,no_run
//! use chattune::parsers::InstagramParser;
//! use std::path::Path;
//!
//! let parser = InstagramParser::new();
//! let messages = parser.parse(Path::new("inbox/sam_123/message_1.json"))?;
//! # Ok::<(), chattune::ChattuneError>(())
//! ```

mod hinge;
mod instagram;

pub use hinge::{HingeParser, hinge_data_file_name, hinge_records, load_hinge_data, write_hinge_data};
pub use instagram::{Conversation, InstagramParser};
