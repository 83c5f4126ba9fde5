//! Plant care-card engine.
//! Name normalization, field bounding, card layout planning and the
//! correction workflow live here; renderers and UIs stay outside.

pub mod config;
pub mod correction;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod text;

pub use config::{CardTemplate, ConfigError, EngineConfig, FieldLimits, PageGeometry};
pub use correction::pending::{
    CommitFailure, CommitFailureReason, CommitReport, LastWriteWins, MergePolicy, PendingSet,
    SharedPendingSet,
};
pub use correction::scope::scope_records;
pub use correction::verification::{
    parse_verification_response, VerificationOutcome, VerificationParseError,
};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use layout::card::{CardLayoutPlanner, LayoutLine};
pub use layout::measure::{AverageCharMeasure, FontKey, TextMeasure};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::correction::{Agreement, CorrectionProposal, ProposalId};
pub use model::record::{Record, RecordField, RecordValidationError, Truncation};
pub use repo::record_repo::{RecordStore, RepoError, RepoResult, SqliteRecordRepository};
pub use service::import::{ImportRow, RowFormat};
pub use service::record_service::{ImportReport, MigrationReport, RecordService};
pub use text::budget::{bound_field, truncate_to_limit, ELLIPSIS};
pub use text::normalize::{is_normalized, normalize_scientific_name, HYBRID_SIGN};
pub use text::wrap::wrap_text;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
