//! Unified error types for chattune.
//!
//! This module provides a single [`ChattuneError`] enum that covers every
//! failure in the library: reading exports, writing the dataset, and talking
//! to the hosted completion and speech services.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chattune operations.
///
/// # Example
///
/// ```rust
/// use chattune::error::Result;
/// use chattune::core::models::TrainingRecord;
///
/// fn my_function() -> Result<Vec<TrainingRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChattuneError>;

/// The error type for all chattune operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChattuneError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - An export file or the inbox directory doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing the dataset)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse an export file.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Instagram JSON", "Hinge matches")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A boilerplate pattern failed to compile.
    #[error("Invalid boilerplate pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A required environment variable (usually an API key) is not set.
    #[error("Environment variable {name} is not set (add it to .env or export it)")]
    MissingEnv {
        /// Name of the variable
        name: String,
    },

    /// Network error while calling a hosted service.
    #[cfg(feature = "chat")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A hosted service answered with a non-success status.
    #[error("{service} returned {status}: {body}")]
    Api {
        /// Which service failed ("completion", "speech")
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Local audio playback failed.
    #[error("Audio playback failed: {0}")]
    Playback(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChattuneError {
    /// Creates a parse error for an Instagram conversation file.
    pub fn instagram_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChattuneError::Parse {
            format: "Instagram JSON",
            source,
            path,
        }
    }

    /// Creates a parse error for one of the Hinge export files.
    pub fn hinge_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChattuneError::Parse {
            format: "Hinge JSON",
            source,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChattuneError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a missing environment variable error.
    pub fn missing_env(name: impl Into<String>) -> Self {
        ChattuneError::MissingEnv { name: name.into() }
    }

    /// Creates an API status error.
    pub fn api(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        ChattuneError::Api {
            service,
            status,
            body: body.into(),
        }
    }

    /// Creates a playback error.
    pub fn playback(message: impl Into<String>) -> Self {
        ChattuneError::Playback(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChattuneError::Io(_))
    }

    /// Returns `true` if a file could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChattuneError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }

    /// Returns `true` if input JSON was malformed.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChattuneError::Parse { .. } | ChattuneError::Json(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChattuneError::InvalidFormat { .. })
    }
}
