//! JSON Lines (JSONL) dataset writer.
//!
//! One [`TrainingRecord`] per line, the format fine-tuning uploads expect:
//!
//! ```jsonl
//! {"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}
//! {"messages":[{"role":"assistant","content":"Tacos, obviously"}]}
//! ```
//!
//! `serde_json` leaves non-ASCII text unescaped, so emoji and Cyrillic
//! survive as written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::models::TrainingRecord;
use crate::error::Result;

/// Writes records to a JSONL file, replacing it if it exists.
///
/// Returns the number of records written.
pub fn write_jsonl(records: &[TrainingRecord], output_path: impl AsRef<Path>) -> Result<usize> {
    let file = File::create(output_path.as_ref())?;
    let mut writer = BufWriter::new(file);
    let count = write_records(records, &mut writer)?;
    writer.flush()?;
    Ok(count)
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[TrainingRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(records, &mut buf)?;
    Ok(String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?)
}

fn write_records<W: Write>(records: &[TrainingRecord], writer: &mut W) -> Result<usize> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(records.len())
}
