//! Domain model for botanical records and correction proposals.
//!
//! # Responsibility
//! - Define the typed record shape shared by import, storage and layout.
//! - Define correction proposals produced by feedback interpretation.
//!
//! # Invariants
//! - A record's `identity` is the normalized scientific name.
//! - Persisted records satisfy every configured field limit.

pub mod correction;
pub mod record;
