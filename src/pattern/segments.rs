//! SMS length and segment computation.
//!
//! A message encodable in the GSM-7 default alphabet fits 160 characters in
//! one segment and 153 per segment when split; anything else falls back to
//! UCS-2 with limits of 70 and 67.

/// The GSM 03.38 default alphabet (basic character set).
const GSM7: &str = "@£$¥èéùìòÇ\nØø\rÅåΔ_ΦΓΛΩΠΨΣΘΞ\u{00A0}ÆæßÉ !\"#¤%&'()*+,-./\
                    0123456789:;<=>?¡ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÑÜ§¿\
                    abcdefghijklmnopqrstuvwxyzäöñüà";

/// Returns `true` if every character of `text` is in the GSM-7 basic set.
pub fn is_gsm7(text: &str) -> bool {
    text.chars().all(|ch| GSM7.contains(ch))
}

/// Computes the character length and SMS segment count of `text`.
///
/// # Example
///
/// ```rust
/// use smstitch::pattern::compute_segments;
///
/// let (length, segments) = compute_segments("short message");
/// assert_eq!(length, 13);
/// assert_eq!(segments, 1);
/// ```
pub fn compute_segments(text: &str) -> (usize, usize) {
    let length = text.chars().count();
    let (limit, block) = if is_gsm7(text) { (160, 153) } else { (70, 67) };
    let segments = if length <= limit {
        1
    } else {
        length.div_ceil(block)
    };
    (length, segments)
}
