//! Text normalization applied to every message before filtering.
//!
//! Three steps, in this order:
//!
//! 1. trim surrounding whitespace
//! 2. remove URL-shaped spans (`http` followed by non-whitespace)
//! 3. optionally undo Meta's Latin-1 mojibake
//!
//! None of these can fail; the worst case is returning the input unchanged.
//!
//! ```
//! use chattune::core::normalize::normalize_text;
//!
//! assert_eq!(normalize_text("  look https://x.co/a here ", true), "look  here");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());

/// Removes every `http…` span up to the next whitespace character.
///
/// Surrounding text, including the whitespace around the URL, is kept
/// as is.
pub fn remove_urls(text: &str) -> Cow<'_, str> {
    URL_RE.replace_all(text, "")
}

/// Fix Meta's broken encoding (Mojibake).
///
/// Meta exports UTF-8 text encoded as if it were ISO-8859-1: every UTF-8
/// byte is stored as its own code point, so "Привет" arrives as
/// "ÐŸÑ€Ð¸Ð²ÐµÑ‚". Re-packing each char as one byte and decoding as UTF-8
/// restores it.
///
/// Text that cannot be mojibake (any char above U+00FF) or whose bytes
/// are not valid UTF-8 is returned unchanged.
pub fn fix_mojibake_encoding(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    for c in s.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => bytes.push(b),
            Err(_) => return s.to_string(),
        }
    }
    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Full normalization pipeline for one raw message body.
pub fn normalize_text(raw: &str, fix_encoding: bool) -> String {
    let stripped = remove_urls(raw.trim());
    if fix_encoding {
        fix_mojibake_encoding(&stripped)
    } else {
        stripped.into_owned()
    }
}
