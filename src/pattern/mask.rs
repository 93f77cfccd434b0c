//! First-stage masking of raw message text.
//!
//! Masking replaces the concrete variable content of a message — dates,
//! times, links, tracking paths, long codes, numbers — with placeholder
//! markers, so that structurally identical messages collapse to the same
//! pattern string. The passes run in a fixed order; order matters, since a
//! URL must become `{URL}` before its digits would be eaten by the number
//! pass.

use regex::{Captures, Regex};

/// Masks variable content in raw message text.
///
/// The patterns are compiled once at construction; reuse one masker for a
/// whole run.
///
/// # Example
///
/// ```rust
/// use smstitch::pattern::Masker;
///
/// let masker = Masker::new();
/// assert_eq!(
///     masker.mask("Tekseru kody/Kod proverki: 482913"),
///     "Tekseru kody/Kod proverki: {NUM}"
/// );
/// ```
#[derive(Debug)]
pub struct Masker {
    leading_date: Regex,
    url: Regex,
    time: Regex,
    track_path: Regex,
    parcel_code_span: Regex,
    long_code: Regex,
    number: Regex,
}

impl Masker {
    /// Creates a masker with the standard pass list.
    pub fn new() -> Self {
        Self {
            leading_date: Regex::new(r"^(?:\d{2}[.-]\d{2}[.-]\d{2,4}|\d{4}-\d{2}-\d{2})\s*")
                .unwrap(),
            url: Regex::new(r"https?://\S+").unwrap(),
            time: Regex::new(r"\b\d{2}:\d{2}:\d{2}\b").unwrap(),
            track_path: Regex::new(r"/t/[A-Za-z0-9]{1,13}").unwrap(),
            parcel_code_span: Regex::new(r"(?i)(Salemdeme kody)(.*?)(Saqtau merzimi)").unwrap(),
            long_code: Regex::new(r"\b[A-Za-z0-9]{10,}\b").unwrap(),
            number: Regex::new(r"\b\d+\b").unwrap(),
        }
    }

    /// Replaces variable content in `text` with placeholder markers.
    pub fn mask(&self, text: &str) -> String {
        // A leading date is log noise, not message structure.
        let masked = self.leading_date.replace(text, "");
        let masked = self.url.replace_all(&masked, "{URL}");
        let masked = self.time.replace_all(&masked, "{TIME}");
        let masked = self.track_path.replace_all(&masked, "/t/{TRACK}");
        let masked = self
            .parcel_code_span
            .replace_all(&masked, "$1 {CODE} $3");
        // Long alphanumeric runs are codes only when they mix letters and
        // digits; plain words and plain digit runs stay for later passes.
        let masked = self.long_code.replace_all(&masked, |caps: &Captures<'_>| {
            let word = &caps[0];
            let has_alpha = word.chars().any(|ch| ch.is_ascii_alphabetic());
            let has_digit = word.chars().any(|ch| ch.is_ascii_digit());
            if has_alpha && has_digit {
                "{CODE}".to_string()
            } else {
                word.to_string()
            }
        });
        let masked = self.number.replace_all(&masked, "{NUM}");
        masked.into_owned()
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(text: &str) -> String {
        Masker::new().mask(text)
    }

    #[test]
    fn test_leading_date_stripped() {
        assert_eq!(mask("2025-05-01 Sizge kod 42"), "Sizge kod {NUM}");
        assert_eq!(mask("01.05.2025 Sizge kod 42"), "Sizge kod {NUM}");
        assert_eq!(mask("01-05-25 Sizge kod 42"), "Sizge kod {NUM}");
    }

    #[test]
    fn test_inner_date_not_stripped() {
        assert_eq!(mask("kun 2025-05-01 dejin"), "kun {NUM}-{NUM}-{NUM} dejin");
    }

    #[test]
    fn test_url_masked_before_numbers() {
        assert_eq!(
            mask("Tolygyraq: https://post.kz/t/AB12CD34"),
            "Tolygyraq: {URL}"
        );
    }

    #[test]
    fn test_time_masked() {
        assert_eq!(mask("12:30:45 audarym"), "{TIME} audarym");
    }

    #[test]
    fn test_track_path_masked() {
        assert_eq!(mask("/t/AB12CD34EF"), "/t/{TRACK}");
    }

    #[test]
    fn test_parcel_code_span_masked() {
        assert_eq!(
            mask("Salemdeme kody CN168298188KZ Saqtau merzimi 14 kun"),
            "Salemdeme kody {CODE} Saqtau merzimi {NUM} kun"
        );
    }

    #[test]
    fn test_parcel_code_span_case_insensitive() {
        let masked = mask("salemdeme kody XYZ saqtau merzimi 5");
        assert_eq!(masked, "salemdeme kody {CODE} saqtau merzimi {NUM}");
    }

    #[test]
    fn test_long_mixed_code_masked() {
        assert_eq!(mask("kod EH700144202KZ keldi"), "kod {CODE} keldi");
    }

    #[test]
    fn test_long_plain_word_kept() {
        assert_eq!(mask("informaciu mozhete"), "informaciu mozhete");
    }

    #[test]
    fn test_long_digit_run_becomes_num() {
        // ten digits carry no letter, so the code pass skips them and the
        // number pass picks them up
        assert_eq!(mask("schet 1234567890"), "schet {NUM}");
    }

    #[test]
    fn test_numbers_masked() {
        assert_eq!(mask("kod 42 jane 777"), "kod {NUM} jane {NUM}");
    }

    #[test]
    fn test_identical_structure_same_pattern() {
        let a = mask("Tekseru kody/Kod proverki: 482913");
        let b = mask("Tekseru kody/Kod proverki: 173205");
        assert_eq!(a, b);
    }
}
