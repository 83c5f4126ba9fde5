//! Correction proposal model.
//!
//! # Responsibility
//! - Describe one suggested replacement for one field of one record.
//!
//! # Invariants
//! - `id` is stable for the proposal lifetime and never reused.
//! - `(identity, field)` is the reconciliation key; `identity` is not
//!   checked against the record store until commit.

use crate::model::record::RecordField;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable handle callers use to own per-proposal selection state.
pub type ProposalId = Uuid;

const SUMMARY_VALUE_CHARS: usize = 50;

/// Verifier stance on the user's suggested change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    Agree,
    Disagree,
}

impl Agreement {
    /// Lenient parse: anything other than `agree` counts as disagreement.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("agree") {
            Self::Agree
        } else {
            Self::Disagree
        }
    }
}

/// One suggested change to one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionProposal {
    pub id: ProposalId,
    pub identity: String,
    pub field: RecordField,
    pub current_value: String,
    pub proposed_value: String,
    pub agreement: Agreement,
    pub rationale: String,
    pub citations: Vec<String>,
}

impl CorrectionProposal {
    /// Creates an agreeing proposal with a fresh id and no rationale.
    pub fn new(
        identity: impl Into<String>,
        field: RecordField,
        proposed_value: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity: identity.into(),
            field,
            current_value: String::new(),
            proposed_value: proposed_value.into(),
            agreement: Agreement::Agree,
            rationale: String::new(),
            citations: Vec::new(),
        }
    }

    /// One-line pending-list entry, e.g. `[OK] Hoya carnosa - water: "..."`.
    pub fn summary(&self) -> String {
        let icon = match self.agreement {
            Agreement::Agree => "[OK]",
            Agreement::Disagree => "[?]",
        };
        let mut value: String = self
            .proposed_value
            .chars()
            .take(SUMMARY_VALUE_CHARS)
            .collect();
        if self.proposed_value.chars().count() > SUMMARY_VALUE_CHARS {
            value.push_str("...");
        }
        format!("{icon} {} - {}: \"{value}\"", self.identity, self.field)
    }
}
