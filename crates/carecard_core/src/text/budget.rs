//! Boundary-aware field truncation.
//!
//! # Responsibility
//! - Keep field text within its configured character ceiling.
//!
//! # Invariants
//! - Output never exceeds the limit (for limits of at least 4 chars, the
//!   ellipsis included).
//! - Text already within the limit is returned unchanged.
//! - Fallback order: sentence boundary, word boundary, hard cut.

use crate::config::FieldLimits;

/// Suffix appended when a cut lands mid-sentence.
pub const ELLIPSIS: &str = "...";

const ELLIPSIS_CHARS: usize = 3;
const SENTENCE_BREAKS: [&str; 3] = [". ", "! ", "? "];
/// A sentence cut must keep at least this share of the limit.
const MIN_SENTENCE_SHARE: f64 = 0.6;

/// Bounds `text` to the limit configured for `field`.
///
/// Field names without a configured limit pass through unchanged.
pub fn bound_field(field: &str, text: &str, limits: &FieldLimits) -> String {
    match limits.limit_for(field) {
        Some(limit) => truncate_to_limit(text, limit),
        None => text.to_string(),
    }
}

/// Truncates `text` to at most `limit` characters.
///
/// Limits too small to hold any text plus the ellipsis degrade to a plain
/// prefix cut.
pub fn truncate_to_limit(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= ELLIPSIS_CHARS {
        return text.chars().take(limit).collect();
    }

    let window = limit - ELLIPSIS_CHARS;
    let head = &text[..byte_offset(text, window)];

    if let Some(end) = sentence_cut(head, limit) {
        return head[..end].trim().to_string();
    }

    if let Some(space) = head.rfind(' ').filter(|&pos| pos > 0) {
        return format!("{}{ELLIPSIS}", head[..space].trim());
    }

    format!("{}{ELLIPSIS}", head.trim())
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Byte end (inclusive of the punctuation) of the last acceptable sentence.
fn sentence_cut(head: &str, limit: usize) -> Option<usize> {
    let floor = limit as f64 * MIN_SENTENCE_SHARE;
    SENTENCE_BREAKS
        .iter()
        .filter_map(|delimiter| head.rfind(delimiter))
        .max()
        .filter(|&offset| head[..offset].chars().count() as f64 >= floor)
        .map(|offset| offset + 1)
}

#[cfg(test)]
mod tests {
    use super::{byte_offset, sentence_cut, truncate_to_limit};

    #[test]
    fn byte_offset_counts_chars() {
        assert_eq!(byte_offset("45°F warm", 3), 4);
        assert_eq!(byte_offset("abc", 10), 3);
    }

    #[test]
    fn sentence_cut_rejects_early_breaks() {
        assert_eq!(sentence_cut("Hi. there friend", 20), None);
        assert_eq!(sentence_cut("Bright light only. Rotate", 20), Some(18));
    }

    #[test]
    fn sentence_cut_prefers_latest_delimiter() {
        let head = "Keep moist! Never soggy. Drain";
        assert_eq!(sentence_cut(head, 30), Some(24));
    }

    #[test]
    fn tiny_limits_cut_without_ellipsis() {
        assert_eq!(truncate_to_limit("abcdef", 3), "abc");
        assert_eq!(truncate_to_limit("abcdef", 0), "");
    }
}
