//! Correction proposal reconciliation.
//!
//! # Responsibility
//! - Hold at most one live proposal per `(identity, field)`.
//! - Commit selected proposals into the record store with partial-success
//!   reporting.
//! - Scope feedback to candidate records and decode verifier output into
//!   proposals.
//!
//! # Invariants
//! - Proposal identities are normalized on submit.
//! - Commit removes every selected proposal, failed or not; nothing retries.

pub mod pending;
pub mod scope;
pub mod verification;
