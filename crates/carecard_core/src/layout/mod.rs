//! Fixed-page card layout.
//!
//! # Responsibility
//! - Turn bounded records into positioned, pre-wrapped text runs.
//! - Abstract font metrics behind an injected measurement capability.
//!
//! # Invariants
//! - Layout never paints and never fails; the render backend owns glyphs,
//!   colors and page boundaries.
//! - Coordinates use a bottom-left origin, in points.

pub mod card;
pub mod measure;
