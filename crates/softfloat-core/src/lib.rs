//! A bit-exact software IEEE 754 floating-point implementation for CPU
//! emulators and JITs.
//!
//! Layered bottom-up:
//! 1. **Primitives:** multi-word shift/add/sub/mul/div/sqrt helpers no
//!    encoded format depends on.
//! 2. **Format/canonical form:** per-format bit-layout descriptors (f16,
//!    f32, f64) and the shared decomposed `FloatParts` register they unpack
//!    into. f80 and f128 unpack to their own native representations.
//! 3. **NaN policy:** target-selectable NaN propagation and
//!    signaling-bit conventions, threaded through every op via
//!    `FloatStatus`.
//! 4. **Arithmetic:** add/sub/mul/div/muladd/sqrt/rem/compare/minmax/
//!    convert, generic over `FloatParts` for f16/f32/f64, native per-format
//!    for f80/f128.
//! 5. **Fast path and transcendentals:** an optional host-FPU short-circuit
//!    for f32/f64, and three illustrative (non-bit-exact) transcendental
//!    approximations.
//!
//! Every function is a pure computation over its arguments and a
//! caller-owned [`status::FloatStatus`]; there is no global mutable state
//! besides the fast path's one-shot startup self-test.

/// L1: multi-word shift/add/sub/mul/div/sqrt primitives.
pub mod primitives;
/// L2: per-format bit-layout descriptors.
pub mod format;
/// L3: the shared canonical decomposed form and its unpack/round-and-pack
/// pipeline.
pub mod parts;
/// L4: NaN classification and target-selectable propagation policy.
pub mod nan;
/// Target-variant policy selector (NaN propagation + signaling-bit
/// convention).
pub mod policy;
/// Caller-owned exception/rounding/policy context threaded through every
/// operation.
pub mod status;
/// L5: arithmetic and conversion operations shared by f16/f32/f64.
pub mod ops;
/// Public binary16 entry points (IEEE and ARM alternate half-precision).
pub mod f16;
/// Public binary32 entry points.
pub mod f32;
/// Public binary64 entry points.
pub mod f64;
/// Native 80-bit extended precision (x87-style).
pub mod f80;
/// Native 128-bit quad precision.
pub mod f128;
/// Host-FPU fast path for f32/f64, gated behind the `fast-path` feature.
#[cfg(feature = "fast-path")]
pub mod fastpath;
/// `exp2`/`log2` approximations, not claiming bit-exactness.
pub mod transcendental;

/// Caller-owned exception flags, rounding mode, and NaN policy context;
/// the second argument to every arithmetic entry point in this crate.
pub use crate::status::FloatStatus;
/// The seven supported rounding modes.
pub use crate::status::RoundingMode;
/// Target NaN propagation and signaling-bit convention selector.
pub use crate::policy::TargetPolicy;
