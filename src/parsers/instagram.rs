//! Instagram JSON export parser.
//!
//! Handles Meta's JSON exports with Mojibake encoding fix.
//!
//! Instagram exports messages as JSON (from "Download Your Data" feature),
//! one file per conversation chunk under `messages/inbox/<thread>/`. Files
//! list messages newest-first; the parser returns them oldest-first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::Message;
use crate::error::{ChattuneError, Result};
use crate::parsing::instagram::{InstagramExport, parse_instagram_message};

/// One conversation file, in chronological order.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub path: PathBuf,
    pub messages: Vec<Message>,
}

/// Parser for Instagram JSON exports.
///
/// # Example
///
/// ```rust,no_run
/// use chattune::parsers::InstagramParser;
///
/// let parser = InstagramParser::new();
/// let conversations = parser.parse_inbox("your_instagram_activity/messages/inbox".as_ref())?;
/// # Ok::<(), chattune::ChattuneError>(())
/// ```
#[derive(Debug, Clone)]
pub struct InstagramParser {
    fix_encoding: bool,
}

impl InstagramParser {
    /// Creates a parser that fixes sender-name mojibake.
    pub fn new() -> Self {
        Self { fix_encoding: true }
    }

    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }

    pub fn name(&self) -> &'static str {
        "Instagram"
    }

    /// Parses one conversation file.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        self.parse_content(&content)
            .map_err(|e| ChattuneError::instagram_parse(e, Some(path.to_path_buf())))
    }

    /// Parses conversation JSON from a string.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        self.parse_content(content)
            .map_err(|e| ChattuneError::instagram_parse(e, None))
    }

    /// Walks `inbox_dir` recursively and parses every `*.json` file.
    ///
    /// Files are visited in sorted path order so runs are reproducible.
    /// Symlinks are not followed.
    pub fn parse_inbox(&self, inbox_dir: &Path) -> Result<Vec<Conversation>> {
        collect_json_files(inbox_dir)?
            .into_iter()
            .map(|path| {
                let messages = self.parse(&path)?;
                tracing::debug!(path = %path.display(), messages = messages.len(), "parsed conversation");
                Ok(Conversation { path, messages })
            })
            .collect()
    }

    fn parse_content(&self, content: &str) -> std::result::Result<Vec<Message>, serde_json::Error> {
        let export: InstagramExport = serde_json::from_str(content)?;

        let mut messages: Vec<Message> = export
            .messages
            .iter()
            .map(|msg| parse_instagram_message(msg, self.fix_encoding))
            .collect();

        // Instagram stores messages newest-first, reverse for chronological order
        messages.reverse();

        Ok(messages)
    }
}

impl Default for InstagramParser {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "json") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
