//! Dataset writers.
//!
//! - [`write_jsonl`] / [`to_jsonl`]: one training record per line, ready to
//!   upload for chat fine-tuning.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chattune::Result<()> {
//! use chattune::core::models::TrainingRecord;
//! use chattune::core::output::write_jsonl;
//!
//! let records = vec![TrainingRecord::pair("hi", "hello")];
//! let written = write_jsonl(&records, "formatted_finetuning_data.jsonl")?;
//! println!("Processed {written} conversations for fine-tuning.");
//! # Ok(())
//! # }
//! ```

mod jsonl_writer;

pub use jsonl_writer::{to_jsonl, write_jsonl};
