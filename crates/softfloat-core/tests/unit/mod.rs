//! Cross-cutting and property-style tests, one file per format/module plus
//! a shared-invariants file that runs the same checks across all three
//! `FloatParts`-backed formats.

pub mod f16;
pub mod f32;
pub mod f64;
pub mod f80;
pub mod f128;
pub mod fastpath;
pub mod invariants;
pub mod rem_regression;
pub mod transcendental;
