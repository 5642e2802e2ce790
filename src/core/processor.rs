//! End-to-end dataset assembly.
//!
//! [`build_dataset`] runs the whole extraction for an [`ExtractConfig`]:
//! every Instagram conversation is cleaned and paired, then the optional
//! Hinge document is appended as assistant-only records. The result is a
//! [`Dataset`] value; nothing is accumulated globally.

use crate::Message;
use crate::config::ExtractConfig;
use crate::core::filter::BoilerplateFilter;
use crate::core::models::TrainingRecord;
use crate::core::pairing::{clean_conversation, extract_pairs};
use crate::error::Result;
use crate::parsers::{InstagramParser, hinge_records, load_hinge_data};
use crate::parsing::hinge::HingeData;

/// Counters collected while building a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Conversation files read.
    pub conversations: usize,
    /// Raw messages across all conversations.
    pub messages_read: usize,
    /// Messages left after normalization and boilerplate filtering.
    pub messages_kept: usize,
    /// User/assistant pairs produced.
    pub pairs: usize,
    /// Assistant-only records from Hinge.
    pub singletons: usize,
}

impl ExtractionStats {
    /// Total records in the dataset.
    pub fn records(&self) -> usize {
        self.pairs + self.singletons
    }

    /// Percentage of raw messages dropped as noise.
    pub fn filtered_ratio(&self) -> f64 {
        if self.messages_read == 0 {
            return 0.0;
        }
        (1.0 - (self.messages_kept as f64 / self.messages_read as f64)) * 100.0
    }
}

/// The records of one extraction run plus its counters.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<TrainingRecord>,
    pub stats: ExtractionStats,
}

impl Dataset {
    /// Cleans and pairs chronological conversations.
    pub fn from_conversations(
        conversations: impl IntoIterator<Item = Vec<Message>>,
        self_name: &str,
        filter: &BoilerplateFilter,
        fix_encoding: bool,
    ) -> Self {
        let mut stats = ExtractionStats::default();
        let mut records = Vec::new();

        for messages in conversations {
            stats.conversations += 1;
            stats.messages_read += messages.len();

            let cleaned = clean_conversation(messages, filter, fix_encoding);
            stats.messages_kept += cleaned.len();

            let pairs = extract_pairs(cleaned, self_name);
            stats.pairs += pairs.len();
            records.extend(pairs);
        }

        Self { records, stats }
    }

    /// Appends Hinge messages and prompt answers as assistant-only records.
    #[must_use]
    pub fn with_hinge(mut self, data: &HingeData, fix_encoding: bool) -> Self {
        let singletons = hinge_records(data, fix_encoding);
        self.stats.singletons += singletons.len();
        self.records.extend(singletons);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the inbox (and Hinge document, if configured) and builds the dataset.
pub fn build_dataset(config: &ExtractConfig, filter: &BoilerplateFilter) -> Result<Dataset> {
    let parser = InstagramParser::new().with_fix_encoding(config.fix_encoding);
    let conversations = parser.parse_inbox(&config.inbox_dir)?;

    let mut dataset = Dataset::from_conversations(
        conversations.into_iter().map(|c| c.messages),
        &config.self_name,
        filter,
        config.fix_encoding,
    );

    if let Some(path) = &config.hinge_data {
        let data = load_hinge_data(path)?;
        tracing::debug!(path = %path.display(), user = %data.user_name, "loaded hinge data");
        dataset = dataset.with_hinge(&data, config.fix_encoding);
    }

    Ok(dataset)
}
