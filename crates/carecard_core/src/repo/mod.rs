//! Record store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the fetch/save boundary the engine talks to.
//! - Keep SQL details out of services and the correction reconciler.
//!
//! # Invariants
//! - Write paths call `Record::validate()` before any SQL mutation.
//! - Identity lookups are case-insensitive.

pub mod record_repo;
