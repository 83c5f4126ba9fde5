//! Greedy line wrapping against an injected width metric.

/// Wraps `text` into lines no wider than `max_width` as reported by `measure`.
///
/// Words are never split: a word wider than `max_width` gets a line to
/// itself and overflows. Input without any words yields a single line
/// holding the original text, so callers always advance at least one line.
pub fn wrap_text<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(text.to_string());
    }

    lines
}
