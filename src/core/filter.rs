//! Drop platform-generated noise before pairing.
//!
//! Instagram exports mix real messages with notices such as
//! "You sent an attachment." or "Reacted ❤️ to your message". None of them
//! carry conversational content, so [`BoilerplateFilter`] rejects them.
//!
//! # Matching Rules
//!
//! | Rule | Builder | Match |
//! |------|---------|-------|
//! | Literal | [`with_literal`](BoilerplateFilter::with_literal) | Whole message, any case |
//! | Pattern | [`with_pattern`](BoilerplateFilter::with_pattern) | Regex search anywhere, case-insensitive |
//!
//! Empty (or whitespace-only) messages are always rejected.
//!
//! # Example
//!
//! ```
//! use chattune::core::filter::BoilerplateFilter;
//!
//! let filter = BoilerplateFilter::default();
//! assert!(filter.is_boilerplate("You sent an attachment."));
//! assert!(filter.is_boilerplate("Sam reacted 😂 to your message"));
//! assert!(!filter.is_boilerplate("see you tomorrow"));
//! ```

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Notices matched as case-insensitive regex searches.
///
/// The first four are kept as written, so their `.` matches any character.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "You sent an attachment.",
    "You started an audio call",
    "Audio call ended",
    "Liked a message",
    r".* sent an attachment\.",
    r".* liked a message",
    r".* started an audio call",
    r".* reacted .* to your message",
    r"reacted .* to your message",
    r".*named the group .*.",
    r"^❤️$",
];

/// Literal strings and regex patterns identifying boilerplate messages.
#[derive(Debug, Clone)]
pub struct BoilerplateFilter {
    /// Lowercased literals.
    literals: Vec<String>,
    patterns: Vec<Regex>,
}

impl BoilerplateFilter {
    /// Creates a filter that only rejects empty messages.
    pub fn new() -> Self {
        Self {
            literals: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Adds a literal that rejects messages equal to it, ignoring case.
    #[must_use]
    pub fn with_literal(mut self, literal: impl AsRef<str>) -> Self {
        self.literals.push(literal.as_ref().to_lowercase());
        self
    }

    /// Adds a case-insensitive regex. A message is rejected if the regex
    /// matches anywhere in it.
    ///
    /// # Errors
    ///
    /// Returns [`ChattuneError::Pattern`](crate::ChattuneError::Pattern) if
    /// the pattern doesn't compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        self.patterns.push(re);
        Ok(self)
    }

    /// Number of configured literals and patterns.
    pub fn rule_count(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    /// Returns `true` if `text` is empty or matches any rule.
    ///
    /// `text` should already be normalized.
    pub fn is_boilerplate(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return true;
        }

        let lowered = trimmed.to_lowercase();
        if self.literals.iter().any(|l| *l == lowered) {
            return true;
        }

        self.patterns.iter().any(|re| re.is_match(text))
    }
}

impl Default for BoilerplateFilter {
    fn default() -> Self {
        let mut filter = Self::new();
        for pattern in DEFAULT_PATTERNS {
            filter.patterns.push(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("built-in boilerplate pattern"),
            );
        }
        filter
    }
}
