//! Record use-case services.
//!
//! # Responsibility
//! - Orchestrate normalization, bounding and persistence for callers.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod import;
pub mod record_service;
