//! Structured-token extraction from message bodies.
//!
//! Fragments of one logical message often carry the same tracking or
//! verification code. Those short structured substrings are the strongest
//! identity signal available between records, so the candidate graph builder
//! compares the token sets of every time-close pair.
//!
//! Two shapes are recognized:
//! - postal tracking codes: two uppercase letters, five or more digits, the
//!   `KZ` suffix (`CN168298188KZ`)
//! - exact six-digit numeric codes, the usual one-time-password width
//!
//! Extraction is a pure function over the text. No matches is not an error;
//! it simply yields an empty set.

use std::collections::HashSet;

use regex::Regex;

/// Extracts structured identity tokens from message text.
///
/// The patterns are compiled once at construction; reuse one extractor for
/// a whole run.
///
/// # Example
///
/// ```rust
/// use smstitch::core::TokenExtractor;
///
/// let extractor = TokenExtractor::new();
/// let tokens = extractor.extract("Sizge CN168298188KZ salemdemesi keldi. Kod 482913");
/// assert!(tokens.contains("CN168298188KZ"));
/// assert!(tokens.contains("482913"));
/// ```
#[derive(Debug)]
pub struct TokenExtractor {
    patterns: Vec<Regex>,
}

impl TokenExtractor {
    /// Creates an extractor for the two known token shapes.
    pub fn new() -> Self {
        Self {
            patterns: vec![
                // AO123456KZ, CN168298188KZ, ...
                Regex::new(r"\b[A-Z]{2}\d{5,}KZ\b").unwrap(),
                // exactly 6 digits (verification codes)
                Regex::new(r"\b\d{6}\b").unwrap(),
            ],
        }
    }

    /// Returns the set of distinct tokens found in `text`.
    ///
    /// Set semantics only: membership matters, order does not. Tokens are
    /// transient evidence for edge evaluation and are never persisted.
    pub fn extract(&self, text: &str) -> HashSet<String> {
        let mut tokens = HashSet::new();
        for pattern in &self.patterns {
            for m in pattern.find_iter(text) {
                tokens.insert(m.as_str().to_string());
            }
        }
        tokens
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}
