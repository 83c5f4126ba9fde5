//! Candidate scoping for free-text feedback.
//!
//! Only records returned here may legitimately appear as proposal
//! identities for a feedback turn.

use crate::model::record::Record;

/// Name fragments must be longer than this many chars to count as a mention.
const MIN_FRAGMENT_CHARS: usize = 3;

/// Narrows `records` to the ones a feedback message can be about.
///
/// A caller-selected plant wins outright (exact identity match, ignoring
/// case). Otherwise a record is a candidate when any fragment of its
/// identity or common name longer than three chars occurs in the feedback.
pub fn scope_records<'a>(
    feedback: &str,
    records: &'a [Record],
    selected: Option<&str>,
) -> Vec<&'a Record> {
    if let Some(selected) = selected.map(str::trim).filter(|value| !value.is_empty()) {
        let selected = selected.to_lowercase();
        return records
            .iter()
            .filter(|record| record.identity.to_lowercase() == selected)
            .collect();
    }

    let feedback = feedback.to_lowercase();
    records
        .iter()
        .filter(|record| {
            mentions(&feedback, &record.identity)
                || record
                    .common_name
                    .as_deref()
                    .is_some_and(|common_name| mentions(&feedback, common_name))
        })
        .collect()
}

fn mentions(feedback_lower: &str, name: &str) -> bool {
    name.to_lowercase()
        .replace(['\'', '"'], " ")
        .split_whitespace()
        .filter(|fragment| fragment.chars().count() > MIN_FRAGMENT_CHARS)
        .any(|fragment| feedback_lower.contains(fragment))
}
