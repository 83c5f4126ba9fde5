//! Record use-case service.
//!
//! # Responsibility
//! - Route every record write through normalization and field bounding.
//! - Import spreadsheet rows with per-row error reporting.
//! - Re-normalize stored identities as a one-time migration.
//! - Commit pending corrections against the backing store.
//!
//! # Invariants
//! - No write bypasses `Record::apply_limits`.
//! - Service layer stays storage-agnostic.

use crate::config::FieldLimits;
use crate::correction::pending::{CommitReport, MergePolicy, PendingSet};
use crate::model::correction::CorrectionProposal;
use crate::model::record::{Record, RecordField};
use crate::repo::record_repo::{RecordStore, RepoError, RepoResult};
use crate::service::import::{detect_format, record_from_row, ImportRow};
use crate::text::normalize::normalize_scientific_name;
use log::{info, warn};

/// Outcome of a spreadsheet import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// Human-readable per-row problems, e.g. `Row 3: Missing scientific name`.
    pub errors: Vec<String>,
}

/// Outcome of an identity re-normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// `(previous, normalized)` identity pairs that were rewritten.
    pub renamed: Vec<(String, String)>,
    /// `(previous, normalized)` pairs left untouched because the normalized
    /// identity already belongs to another record.
    pub conflicts: Vec<(String, String)>,
}

/// Use-case facade over a record store.
pub struct RecordService<R: RecordStore> {
    repo: R,
    limits: FieldLimits,
}

impl<R: RecordStore> RecordService<R> {
    pub fn new(repo: R, limits: FieldLimits) -> Self {
        Self { repo, limits }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    /// Normalizes, bounds and saves one record, returning the stored form.
    ///
    /// Used for LLM fetches, imports and manual edits alike.
    pub fn save_record(&self, mut record: Record) -> RepoResult<Record> {
        record.renormalize();
        record.apply_limits(&self.limits);
        self.repo.save(&record)?;
        Ok(record)
    }

    pub fn get_record(&self, identity: &str) -> RepoResult<Option<Record>> {
        self.repo.fetch(identity)
    }

    pub fn list_records(&self) -> RepoResult<Vec<Record>> {
        self.repo.list()
    }

    /// Records with no value for `field`, for targeted backfills.
    pub fn records_missing(&self, field: RecordField) -> RepoResult<Vec<Record>> {
        Ok(self
            .repo
            .list()?
            .into_iter()
            .filter(|record| record.field(field).is_none())
            .collect())
    }

    /// Imports header-keyed rows; row numbers count the header as row 1.
    ///
    /// A header row naming neither `Botanical Name` nor `scientific_name`
    /// rejects the whole batch.
    pub fn import_rows<S: AsRef<str>>(&self, headers: &[S], rows: &[ImportRow]) -> ImportReport {
        let mut report = ImportReport::default();
        let Some(format) = detect_format(headers) else {
            report.errors.push(
                "Header row must name either 'Botanical Name' or 'scientific_name'".to_string(),
            );
            warn!("event=record_import module=service status=error error_code=missing_name_column");
            return report;
        };

        for (offset, row) in rows.iter().enumerate() {
            let row_number = offset + 2;
            let Some(record) = record_from_row(row, format) else {
                report
                    .errors
                    .push(format!("Row {row_number}: Missing scientific name"));
                continue;
            };

            let identity = record.identity.clone();
            match self.save_record(record) {
                Ok(_) => report.imported += 1,
                Err(err) => {
                    warn!(
                        "event=record_import module=service status=error row={} identity={} error={}",
                        row_number, identity, err
                    );
                    report
                        .errors
                        .push(format!("Row {row_number}: Failed to import '{identity}'"));
                }
            }
        }

        info!(
            "event=record_import module=service status=ok imported={} errors={}",
            report.imported,
            report.errors.len()
        );
        report
    }

    /// Rewrites every stored identity that differs from its normalized form.
    ///
    /// Idempotent: a second pass renames nothing. Collisions are reported,
    /// never merged.
    pub fn normalize_identities(&self) -> RepoResult<MigrationReport> {
        let mut report = MigrationReport::default();

        for record in self.repo.list()? {
            let normalized = normalize_scientific_name(&record.identity);
            if normalized == record.identity {
                continue;
            }

            match self.repo.rename_identity(&record.identity, &normalized) {
                Ok(()) => {
                    info!(
                        "event=identity_migration module=service status=ok from={} to={}",
                        record.identity, normalized
                    );
                    report.renamed.push((record.identity, normalized));
                }
                Err(RepoError::IdentityConflict(_)) => {
                    warn!(
                        "event=identity_migration module=service status=conflict from={} to={}",
                        record.identity, normalized
                    );
                    report.conflicts.push((record.identity, normalized));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(report)
    }

    /// Commits `selected` proposals from `pending` into this service's store.
    pub fn commit_corrections<P: MergePolicy>(
        &self,
        pending: &mut PendingSet<P>,
        selected: &[CorrectionProposal],
    ) -> CommitReport {
        pending.commit(selected, &self.repo, &self.limits)
    }
}
