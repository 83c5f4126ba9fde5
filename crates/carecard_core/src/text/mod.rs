//! Pure text-processing primitives.
//!
//! # Responsibility
//! - Canonicalize botanical names into identity keys.
//! - Bound field text to a character budget at sentence/word boundaries.
//! - Greedily wrap text against a caller-supplied width metric.
//!
//! # Invariants
//! - Every function here is total: no errors, no panics, no I/O.
//! - Lengths are counted in Unicode scalar values, never bytes.

pub mod budget;
pub mod normalize;
pub mod wrap;
