//! Pending correction set and commit.
//!
//! # Invariants
//! - At most one proposal per `(identity, field)`; conflicts resolve through
//!   the set's `MergePolicy` (last write wins by default).
//! - A replaced proposal keeps its display slot; order is for display only.
//! - The set holds no selection state. Share it across threads behind one
//!   mutex ([`SharedPendingSet`]) since every operation read-modify-writes.

use crate::config::FieldLimits;
use crate::model::correction::{CorrectionProposal, ProposalId};
use crate::model::record::RecordField;
use crate::repo::record_repo::RecordStore;
use crate::text::normalize::normalize_scientific_name;
use log::{info, warn};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Pending set guarded for use across request/response cycles.
pub type SharedPendingSet = Arc<Mutex<PendingSet>>;

/// Resolves a new proposal against the live one for the same key.
pub trait MergePolicy {
    fn merge(
        &self,
        existing: CorrectionProposal,
        incoming: CorrectionProposal,
    ) -> CorrectionProposal;
}

/// The incoming proposal fully replaces the existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastWriteWins;

impl MergePolicy for LastWriteWins {
    fn merge(
        &self,
        _existing: CorrectionProposal,
        incoming: CorrectionProposal,
    ) -> CorrectionProposal {
        incoming
    }
}

/// Why one identity in a commit batch was not updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitFailureReason {
    NotFound,
    FetchFailed(String),
    SaveRejected(String),
}

impl Display for CommitFailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::FetchFailed(message) => write!(f, "fetch failed: {message}"),
            Self::SaveRejected(message) => write!(f, "save rejected: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFailure {
    pub identity: String,
    pub reason: CommitFailureReason,
}

/// Per-identity outcome of a commit batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Identities whose record was saved, in first-selected order.
    pub updated: Vec<String>,
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Live proposals keyed by `(identity, field)`.
#[derive(Debug, Default)]
pub struct PendingSet<P: MergePolicy = LastWriteWins> {
    entries: Vec<CorrectionProposal>,
    policy: P,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: MergePolicy> PendingSet<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Inserts `proposal`, resolving any live proposal for the same key
    /// through the merge policy. Never fails.
    pub fn submit(&mut self, mut proposal: CorrectionProposal) {
        proposal.identity = normalize_scientific_name(&proposal.identity);
        info!(
            "event=correction_submit module=correction status=ok identity={} field={} pending={}",
            proposal.identity,
            proposal.field,
            self.entries.len()
        );

        match self.position(&proposal.identity, proposal.field) {
            Some(index) => {
                let existing = self.entries.remove(index);
                let merged = self.policy.merge(existing, proposal);
                self.entries.insert(index, merged);
            }
            None => self.entries.push(proposal),
        }
    }

    /// Returns clones of the proposals the caller's predicate includes.
    pub fn selected<F>(&self, include: F) -> Vec<CorrectionProposal>
    where
        F: Fn(&CorrectionProposal) -> bool,
    {
        self.entries
            .iter()
            .filter(|proposal| include(proposal))
            .cloned()
            .collect()
    }

    pub fn get(&self, identity: &str, field: RecordField) -> Option<&CorrectionProposal> {
        let identity = normalize_scientific_name(identity);
        self.position(&identity, field)
            .map(|index| &self.entries[index])
    }

    /// Drops one proposal without applying it.
    pub fn discard(&mut self, id: ProposalId) -> Option<CorrectionProposal> {
        let index = self.entries.iter().position(|proposal| proposal.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Proposals in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CorrectionProposal> {
        self.entries.iter()
    }

    /// Applies `selected` to the store, one fetch/bound/save per identity.
    ///
    /// Stored identities are re-normalized on the way through, so a row
    /// written under a legacy casing is saved under its canonical one.
    /// Missing records and store errors are reported per identity without
    /// aborting the batch. Every selected proposal leaves the set afterwards,
    /// including those whose identity failed.
    pub fn commit<S>(
        &mut self,
        selected: &[CorrectionProposal],
        store: &S,
        limits: &FieldLimits,
    ) -> CommitReport
    where
        S: RecordStore + ?Sized,
    {
        let mut report = CommitReport::default();

        for (identity, proposals) in group_by_identity(selected) {
            let mut record = match store.fetch(&identity) {
                Ok(Some(record)) => record,
                Ok(None) => {
                    warn!(
                        "event=correction_commit module=correction status=error identity={} error_code=not_found",
                        identity
                    );
                    report.failures.push(CommitFailure {
                        identity,
                        reason: CommitFailureReason::NotFound,
                    });
                    continue;
                }
                Err(err) => {
                    warn!(
                        "event=correction_commit module=correction status=error identity={} error_code=fetch_failed error={}",
                        identity, err
                    );
                    report.failures.push(CommitFailure {
                        identity,
                        reason: CommitFailureReason::FetchFailed(err.to_string()),
                    });
                    continue;
                }
            };

            record.renormalize();
            for proposal in &proposals {
                record.set_field(proposal.field, proposal.proposed_value.as_str());
            }
            record.apply_limits(limits);

            match store.save(&record) {
                Ok(()) => {
                    info!(
                        "event=correction_commit module=correction status=ok identity={} fields={}",
                        identity,
                        proposals.len()
                    );
                    report.updated.push(identity);
                }
                Err(err) => {
                    warn!(
                        "event=correction_commit module=correction status=error identity={} error_code=save_rejected error={}",
                        identity, err
                    );
                    report.failures.push(CommitFailure {
                        identity,
                        reason: CommitFailureReason::SaveRejected(err.to_string()),
                    });
                }
            }
        }

        let committed: HashSet<ProposalId> = selected.iter().map(|proposal| proposal.id).collect();
        self.entries
            .retain(|proposal| !committed.contains(&proposal.id));

        report
    }

    fn position(&self, identity: &str, field: RecordField) -> Option<usize> {
        self.entries
            .iter()
            .position(|proposal| proposal.field == field && proposal.identity == identity)
    }
}

// Keeps first-seen identity order so reports read in selection order.
fn group_by_identity(
    selected: &[CorrectionProposal],
) -> Vec<(String, Vec<&CorrectionProposal>)> {
    let mut groups: Vec<(String, Vec<&CorrectionProposal>)> = Vec::new();
    for proposal in selected {
        let identity = normalize_scientific_name(&proposal.identity);
        match groups.iter_mut().find(|(key, _)| *key == identity) {
            Some((_, proposals)) => proposals.push(proposal),
            None => groups.push((identity, vec![proposal])),
        }
    }
    groups
}
