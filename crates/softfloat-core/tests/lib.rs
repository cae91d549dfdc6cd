//! Integration test entry point.
//!
//! Unlike the per-module `#[cfg(test)]` blocks in `src/`, these exercise the
//! public crate API the way a caller (a CPU emulator's FPU execution unit)
//! would: raw bit patterns in, raw bit patterns and a `FloatStatus` out.

/// Cross-module and property-style tests.
pub mod unit;
