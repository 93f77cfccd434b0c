//! Pattern generalization.
//!
//! This module contains:
//! - [`mask`] - first-stage masking of raw text (dates, URLs, codes, numbers)
//! - [`rules`] - the prioritized generalization rule table
//! - [`segments`] - GSM-7 aware length and segment computation
//!
//! The reassembly engine has no dependency on anything here: it treats the
//! generalized pattern as an opaque text field. The reports drive the two
//! stages in sequence via [`Generalizer`].
//!
//! # Quick Start
//!
//! ```rust
//! use smstitch::pattern::Generalizer;
//!
//! let generalizer = Generalizer::new();
//! let pattern = generalizer.pattern_of("Tekseru kody/Kod proverki: 482913");
//! assert_eq!(pattern, "Tekseru kody/Kod proverki:{NUM}");
//! ```

pub mod mask;
pub mod rules;
pub mod segments;

pub use mask::Masker;
pub use rules::{Rule, RuleSet};
pub use segments::{compute_segments, is_gsm7};

/// Masking and generalization bundled behind one call.
pub struct Generalizer {
    masker: Masker,
    rules: RuleSet,
}

impl Generalizer {
    /// Creates a generalizer with the standard mask passes and rule table.
    pub fn new() -> Self {
        Self {
            masker: Masker::new(),
            rules: RuleSet::new(),
        }
    }

    /// Masks raw text and generalizes the result into a pattern string.
    pub fn pattern_of(&self, text: &str) -> String {
        self.rules.generalize(&self.masker.mask(text))
    }

    /// Re-generalizes an already masked pattern (used when aggregating
    /// existing report files).
    pub fn regeneralize(&self, pattern: &str) -> String {
        self.rules.generalize(pattern)
    }
}

impl Default for Generalizer {
    fn default() -> Self {
        Self::new()
    }
}
