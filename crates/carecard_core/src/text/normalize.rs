//! Botanical name canonicalization.
//!
//! # Responsibility
//! - Turn free-form scientific names into the stable identity form used as
//!   storage key and card display text.
//!
//! # Invariants
//! - `normalize_scientific_name` is idempotent.
//! - Blank input normalizes to the empty string.
//! - Cultivar spans (`'...'`) are title-cased; everything else follows
//!   genus/epithet casing rules.

use once_cell::sync::Lazy;
use regex::Regex;

static CULTIVAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)'.*?'").expect("valid cultivar regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Rank markers emitted lowercase verbatim.
const RANK_MARKERS: &[&str] = &["var.", "subsp.", "f.", "ssp."];

/// Canonical hybrid marker glyph.
pub const HYBRID_SIGN: char = '×';

/// Normalizes a scientific name to botanical casing.
///
/// - Genus (first non-marker word): first letter uppercase, rest lowercase.
/// - Species and infraspecific epithets: lowercase.
/// - `var.`, `subsp.`, `f.`, `ssp.`: lowercase.
/// - `x` / `×` standing alone: `×`.
/// - Cultivar names in single quotes: every word title-cased.
///
/// ```
/// use carecard_core::normalize_scientific_name;
///
/// assert_eq!(normalize_scientific_name("MONSTERA DELICIOSA"), "Monstera deliciosa");
/// assert_eq!(normalize_scientific_name("ficus elastica 'ruby'"), "Ficus elastica 'Ruby'");
/// ```
pub fn normalize_scientific_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut normalized = String::with_capacity(trimmed.len());
    let mut genus_seen = false;
    let mut cursor = 0;

    for cultivar in CULTIVAR_RE.find_iter(trimmed) {
        let epithets = normalize_epithets(&trimmed[cursor..cultivar.start()], &mut genus_seen);
        push_span(&mut normalized, &epithets);
        push_span(&mut normalized, &normalize_cultivar(cultivar.as_str()));
        cursor = cultivar.end();
    }
    let tail = normalize_epithets(&trimmed[cursor..], &mut genus_seen);
    push_span(&mut normalized, &tail);

    WHITESPACE_RE
        .replace_all(&normalized, " ")
        .trim()
        .to_string()
}

/// Returns whether `identity` is already in canonical form.
pub fn is_normalized(identity: &str) -> bool {
    normalize_scientific_name(identity) == identity
}

// Spans are separated by exactly one space unless one is already present.
fn push_span(out: &mut String, span: &str) {
    if span.is_empty() {
        return;
    }
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(span);
}

fn normalize_epithets(span: &str, genus_seen: &mut bool) -> String {
    let words: Vec<String> = span
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            if RANK_MARKERS.contains(&lower.as_str()) {
                lower
            } else if is_hybrid_marker(word) {
                HYBRID_SIGN.to_string()
            } else if !*genus_seen {
                *genus_seen = true;
                capitalize(word)
            } else {
                lower
            }
        })
        .collect();
    words.join(" ")
}

fn is_hybrid_marker(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('x' | 'X' | HYBRID_SIGN), None)
    )
}

fn normalize_cultivar(span: &str) -> String {
    let inner = span
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(span);
    let words: Vec<String> = inner.split_whitespace().map(capitalize).collect();
    format!("'{}'", words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    let mut upper = first.to_uppercase();
    // Multi-char uppercase expansions (e.g. `ß`) would not survive a second pass.
    match (upper.next(), upper.next()) {
        (Some(single), None) => out.push(single),
        _ => out.push(first),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

#[cfg(test)]
mod tests {
    use super::{capitalize, is_hybrid_marker, normalize_cultivar};

    #[test]
    fn capitalize_lowers_tail() {
        assert_eq!(capitalize("mONSTERA"), "Monstera");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize_keeps_multi_char_uppercase_expansions_as_is() {
        assert_eq!(capitalize("ßtraße"), "ßtraße");
    }

    #[test]
    fn hybrid_marker_requires_single_char() {
        assert!(is_hybrid_marker("x"));
        assert!(is_hybrid_marker("X"));
        assert!(is_hybrid_marker("×"));
        assert!(!is_hybrid_marker("xanthosoma"));
    }

    #[test]
    fn cultivar_inner_whitespace_is_trimmed() {
        assert_eq!(normalize_cultivar("'  thai   constellation '"), "'Thai Constellation'");
        assert_eq!(normalize_cultivar("''"), "''");
    }
}
