//! Public binary64 ("double precision") entry points: raw `u64` bit
//! patterns in, raw `u64` bit patterns (or the requested scalar type) out,
//! mirroring [`crate::f32`]'s shape.

use crate::format::F64;
use crate::nan;
use crate::ops;
use crate::ops::compare::FloatRelation;
use crate::parts;
use crate::policy::TargetPolicy;
use crate::status::FloatStatus;

fn unpack(bits: u64, status: &mut FloatStatus) -> parts::FloatParts {
    parts::unpack(bits, &F64, status)
}

fn pack(p: parts::FloatParts, status: &mut FloatStatus) -> u64 {
    parts::round_and_pack(p, &F64, status)
}

/// `a + b`.
#[must_use]
pub fn add(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_add_f64(a, b, status) {
        return r;
    }
    let r = ops::add_sub::add(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a - b`.
#[must_use]
pub fn sub(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_sub_f64(a, b, status) {
        return r;
    }
    let r = ops::add_sub::sub(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a * b`.
#[must_use]
pub fn mul(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_mul_f64(a, b, status) {
        return r;
    }
    let r = ops::mul::mul(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a / b`.
#[must_use]
pub fn div(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_div_f64(a, b, status) {
        return r;
    }
    let r = ops::div::div(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a * b + c`, rounded once.
#[must_use]
pub fn muladd(a: u64, b: u64, c: u64, status: &mut FloatStatus) -> u64 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_muladd_f64(a, b, c, status) {
        return r;
    }
    let r = ops::muladd::muladd(unpack(a, status), unpack(b, status), unpack(c, status), status);
    pack(r, status)
}

/// `sqrt(a)`.
#[must_use]
pub fn sqrt(a: u64, status: &mut FloatStatus) -> u64 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_sqrt_f64(a, status) {
        return r;
    }
    let r = ops::sqrt::sqrt(unpack(a, status), status);
    pack(r, status)
}

/// IEEE remainder of `a` and `b`.
#[must_use]
pub fn rem(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::rem::rem(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// Signaling comparison (any NaN operand raises `INVALID`).
#[must_use]
pub fn compare_signaling(a: u64, b: u64, status: &mut FloatStatus) -> FloatRelation {
    ops::compare::compare_signaling(unpack(a, status), unpack(b, status), status)
}

/// Quiet comparison (only a signaling NaN operand raises `INVALID`).
#[must_use]
pub fn compare_quiet(a: u64, b: u64, status: &mut FloatStatus) -> FloatRelation {
    ops::compare::compare_quiet(unpack(a, status), unpack(b, status), status)
}

/// IEEE 754-2019 NaN-propagating minimum.
#[must_use]
pub fn min(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::minmax::min(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// IEEE 754-2019 NaN-propagating maximum.
#[must_use]
pub fn max(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::minmax::max(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// IEEE 754-2008 `minNum`.
#[must_use]
pub fn min_num(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::minmax::min_num(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// IEEE 754-2008 `maxNum`.
#[must_use]
pub fn max_num(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::minmax::max_num(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `minNumMag`.
#[must_use]
pub fn min_num_mag(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::minmax::min_num_mag(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `maxNumMag`.
#[must_use]
pub fn max_num_mag(a: u64, b: u64, status: &mut FloatStatus) -> u64 {
    let r = ops::minmax::max_num_mag(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// Converts to a signed 16-bit integer.
#[must_use]
pub fn to_i16(a: u64, status: &mut FloatStatus) -> i16 {
    ops::convert::to_i16(unpack(a, status), status)
}

/// Converts to a signed 32-bit integer.
#[must_use]
pub fn to_i32(a: u64, status: &mut FloatStatus) -> i32 {
    ops::convert::to_i32(unpack(a, status), status)
}

/// Converts to a signed 64-bit integer.
#[must_use]
pub fn to_i64(a: u64, status: &mut FloatStatus) -> i64 {
    ops::convert::to_i64(unpack(a, status), status)
}

/// Converts to an unsigned 16-bit integer.
#[must_use]
pub fn to_u16(a: u64, status: &mut FloatStatus) -> u16 {
    ops::convert::to_u16(unpack(a, status), status)
}

/// Converts to an unsigned 32-bit integer.
#[must_use]
pub fn to_u32(a: u64, status: &mut FloatStatus) -> u32 {
    ops::convert::to_u32(unpack(a, status), status)
}

/// Converts to an unsigned 64-bit integer.
#[must_use]
pub fn to_u64(a: u64, status: &mut FloatStatus) -> u64 {
    ops::convert::to_u64(unpack(a, status), status)
}

/// Converts to a signed 32-bit integer, with `a`'s exponent first adjusted
/// by `scale` (clamped to `[-0x10000, 0x10000]`).
#[must_use]
pub fn to_i32_scaled(a: u64, scale: i32, status: &mut FloatStatus) -> i32 {
    ops::convert::to_i32_scaled(unpack(a, status), scale, status)
}

/// Converts to a signed 64-bit integer, with `a`'s exponent first adjusted
/// by `scale` (clamped to `[-0x10000, 0x10000]`).
#[must_use]
pub fn to_i64_scaled(a: u64, scale: i32, status: &mut FloatStatus) -> i64 {
    ops::convert::to_i64_scaled(unpack(a, status), scale, status)
}

/// Converts a signed 64-bit integer to the nearest representable binary64
/// value (always exact).
#[must_use]
pub fn from_i64(v: i64, status: &mut FloatStatus) -> u64 {
    pack(ops::convert::from_i64(v), status)
}

/// Converts an unsigned 64-bit integer to the nearest representable binary64
/// value.
#[must_use]
pub fn from_u64(v: u64, status: &mut FloatStatus) -> u64 {
    pack(ops::convert::from_u64(v), status)
}

/// Converts a binary32 value up to binary64. Always exact: widening never
/// rounds, but a signaling NaN source still raises `INVALID` and is
/// quieted.
#[must_use]
pub fn from_f32(a: u32, status: &mut FloatStatus) -> u64 {
    let unpacked = parts::unpack(u64::from(a), &crate::format::F32, status);
    let p = ops::convert::float_to_float(unpacked, &F64, status);
    pack(p, status)
}

/// Rounds `a` to an integral value, represented as a binary64 float.
#[must_use]
pub fn round_to_int(a: u64, exact: bool, status: &mut FloatStatus) -> u64 {
    let r = ops::convert::round_to_int(unpack(a, status), exact, status);
    pack(r, status)
}

/// `a * 2^n`.
#[must_use]
pub fn scalbn(a: u64, n: i32, status: &mut FloatStatus) -> u64 {
    let r = ops::convert::scalbn(unpack(a, status), n);
    pack(r, status)
}

/// Flushes a subnormal `a` to a same-signed zero when
/// `status.flush_inputs_to_zero` is set; otherwise a no-op.
#[must_use]
pub fn squash_input_denormal(a: u64, status: &mut FloatStatus) -> u64 {
    parts::squash_input_denormal(a, &F64, status)
}

/// True if `a`'s bit pattern encodes a signaling NaN under `policy`'s
/// signaling-bit convention.
#[must_use]
pub fn is_signaling_nan(a: u64, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, &mut scratch).class == parts::FloatClass::SignalingNan
}

/// True if `a`'s bit pattern encodes a quiet NaN under `policy`'s
/// signaling-bit convention.
#[must_use]
pub fn is_quiet_nan(a: u64, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, &mut scratch).class == parts::FloatClass::QuietNan
}

/// Quiets a signaling NaN's payload in place; any other value is unchanged.
#[must_use]
pub fn silence_nan(a: u64, policy: &TargetPolicy) -> u64 {
    let mut scratch = FloatStatus::with_policy(*policy);
    let p = parts::maybe_silence(unpack(a, &mut scratch), &scratch);
    pack(p, &mut scratch)
}

/// The default (non-payload-propagating) quiet NaN for `policy`.
#[must_use]
pub fn default_nan(policy: &TargetPolicy) -> u64 {
    let mut scratch = FloatStatus::with_policy(*policy);
    pack(nan::default_nan(policy), &mut scratch)
}
