//! Hinge export parser.
//!
//! Two steps, matching how the data flows:
//!
//! 1. [`HingeParser::parse_dir`] reads the raw export directory and
//!    [`write_hinge_data`] saves the cleaned [`HingeData`] document.
//! 2. [`load_hinge_data`] reads that document back and [`hinge_records`]
//!    turns it into assistant-only training records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::HingeConfig;
use crate::core::models::TrainingRecord;
use crate::core::normalize::normalize_text;
use crate::error::{ChattuneError, Result};
use crate::parsing::hinge::{
    HingeData, HingeMatches, HingePrompts, HingeUser, flatten_matches, flatten_prompts,
};

/// Parser for a raw Hinge data download.
#[derive(Debug, Clone, Default)]
pub struct HingeParser;

impl HingeParser {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "Hinge"
    }

    /// Reads `matches.json`, `prompts.json` and `user.json` and flattens
    /// them into a cleaned document.
    pub fn parse_dir(&self, config: &HingeConfig) -> Result<HingeData> {
        let matches: HingeMatches = read_json(&config.matches_file())?;
        let user: HingeUser = read_json(&config.user_file())?;
        let prompts: HingePrompts = read_json(&config.prompts_file())?;

        Ok(HingeData {
            user_name: user.first_name(),
            messages: flatten_matches(&matches),
            prompts: flatten_prompts(&prompts),
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ChattuneError::hinge_parse(e, Some(path.to_path_buf())))
}

/// File name the cleaned document is saved under.
pub fn hinge_data_file_name(user_name: &str) -> String {
    format!("{}_hinge_data.json", user_name.to_lowercase())
}

/// Writes `data` as pretty JSON into `output_dir`, creating it if needed.
///
/// Returns the path written.
pub fn write_hinge_data(data: &HingeData, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(hinge_data_file_name(&data.user_name));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;

    Ok(path)
}

/// Reads a cleaned Hinge document.
pub fn load_hinge_data(path: &Path) -> Result<HingeData> {
    read_json(path)
}

/// Turns a cleaned document into assistant-only records.
///
/// Outgoing chat messages come first, then prompt answers. Both are
/// self-authored statements with no reply partner. Text is normalized the
/// same way as Instagram messages; entries that end up empty are skipped.
pub fn hinge_records(data: &HingeData, fix_encoding: bool) -> Vec<TrainingRecord> {
    let chats = data.messages.iter().map(|m| m.message.as_str());
    let answers = data.prompts.iter().map(|p| p.text.as_str());

    chats
        .chain(answers)
        .map(|text| normalize_text(text, fix_encoding))
        .filter(|text| !text.is_empty())
        .map(TrainingRecord::assistant_only)
        .collect()
}
