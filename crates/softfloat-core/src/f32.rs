//! Public binary32 ("single precision") entry points: raw `u32` bit
//! patterns in, raw `u32` bit patterns (or the requested scalar type) out,
//! with all rounding/exception bookkeeping routed through a caller-owned
//! [`FloatStatus`].
//!
//! Thin format-specialized shell over the generic [`crate::ops`] routines,
//! grounded in the teacher's per-width public API shape in
//! `core/units/fpu/mod.rs` (`execute_f32`/`execute_f64` taking raw bit
//! patterns and a flags accumulator).

use crate::format::F32;
use crate::nan;
use crate::ops;
use crate::ops::compare::FloatRelation;
use crate::parts;
use crate::policy::TargetPolicy;
use crate::status::FloatStatus;

fn unpack(bits: u32, status: &mut FloatStatus) -> parts::FloatParts {
    parts::unpack(u64::from(bits), &F32, status)
}

fn pack(p: parts::FloatParts, status: &mut FloatStatus) -> u32 {
    parts::round_and_pack(p, &F32, status) as u32
}

/// `a + b`.
#[must_use]
pub fn add(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_add_f32(a, b, status) {
        return r;
    }
    let r = ops::add_sub::add(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a - b`.
#[must_use]
pub fn sub(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_sub_f32(a, b, status) {
        return r;
    }
    let r = ops::add_sub::sub(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a * b`.
#[must_use]
pub fn mul(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_mul_f32(a, b, status) {
        return r;
    }
    let r = ops::mul::mul(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a / b`.
#[must_use]
pub fn div(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_div_f32(a, b, status) {
        return r;
    }
    let r = ops::div::div(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `a * b + c`, rounded once.
#[must_use]
pub fn muladd(a: u32, b: u32, c: u32, status: &mut FloatStatus) -> u32 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_muladd_f32(a, b, c, status) {
        return r;
    }
    let r = ops::muladd::muladd(unpack(a, status), unpack(b, status), unpack(c, status), status);
    pack(r, status)
}

/// `sqrt(a)`.
#[must_use]
pub fn sqrt(a: u32, status: &mut FloatStatus) -> u32 {
    #[cfg(feature = "fast-path")]
    if let Some(r) = crate::fastpath::try_sqrt_f32(a, status) {
        return r;
    }
    let r = ops::sqrt::sqrt(unpack(a, status), status);
    pack(r, status)
}

/// IEEE remainder of `a` and `b`.
#[must_use]
pub fn rem(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::rem::rem(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// Signaling comparison (any NaN operand raises `INVALID`).
#[must_use]
pub fn compare_signaling(a: u32, b: u32, status: &mut FloatStatus) -> FloatRelation {
    ops::compare::compare_signaling(unpack(a, status), unpack(b, status), status)
}

/// Quiet comparison (only a signaling NaN operand raises `INVALID`).
#[must_use]
pub fn compare_quiet(a: u32, b: u32, status: &mut FloatStatus) -> FloatRelation {
    ops::compare::compare_quiet(unpack(a, status), unpack(b, status), status)
}

/// IEEE 754-2019 NaN-propagating minimum.
#[must_use]
pub fn min(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::minmax::min(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// IEEE 754-2019 NaN-propagating maximum.
#[must_use]
pub fn max(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::minmax::max(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// IEEE 754-2008 `minNum`.
#[must_use]
pub fn min_num(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::minmax::min_num(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// IEEE 754-2008 `maxNum`.
#[must_use]
pub fn max_num(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::minmax::max_num(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `minNumMag`.
#[must_use]
pub fn min_num_mag(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::minmax::min_num_mag(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// `maxNumMag`.
#[must_use]
pub fn max_num_mag(a: u32, b: u32, status: &mut FloatStatus) -> u32 {
    let r = ops::minmax::max_num_mag(unpack(a, status), unpack(b, status), status);
    pack(r, status)
}

/// Converts to a signed 16-bit integer.
#[must_use]
pub fn to_i16(a: u32, status: &mut FloatStatus) -> i16 {
    ops::convert::to_i16(unpack(a, status), status)
}

/// Converts to a signed 32-bit integer.
#[must_use]
pub fn to_i32(a: u32, status: &mut FloatStatus) -> i32 {
    ops::convert::to_i32(unpack(a, status), status)
}

/// Converts to a signed 64-bit integer.
#[must_use]
pub fn to_i64(a: u32, status: &mut FloatStatus) -> i64 {
    ops::convert::to_i64(unpack(a, status), status)
}

/// Converts to an unsigned 16-bit integer.
#[must_use]
pub fn to_u16(a: u32, status: &mut FloatStatus) -> u16 {
    ops::convert::to_u16(unpack(a, status), status)
}

/// Converts to an unsigned 32-bit integer.
#[must_use]
pub fn to_u32(a: u32, status: &mut FloatStatus) -> u32 {
    ops::convert::to_u32(unpack(a, status), status)
}

/// Converts to an unsigned 64-bit integer.
#[must_use]
pub fn to_u64(a: u32, status: &mut FloatStatus) -> u64 {
    ops::convert::to_u64(unpack(a, status), status)
}

/// Converts a signed 64-bit integer to the nearest binary32 value.
#[must_use]
pub fn from_i64(v: i64, status: &mut FloatStatus) -> u32 {
    pack(ops::convert::from_i64(v), status)
}

/// Converts an unsigned 64-bit integer to the nearest binary32 value.
#[must_use]
pub fn from_u64(v: u64, status: &mut FloatStatus) -> u32 {
    pack(ops::convert::from_u64(v), status)
}

/// Converts a binary64 value down to binary32, rounding per `status`.
#[must_use]
pub fn from_f64(a: u64, status: &mut FloatStatus) -> u32 {
    let unpacked = parts::unpack(a, &crate::format::F64, status);
    let p = ops::convert::float_to_float(unpacked, &F32, status);
    pack(p, status)
}

/// Rounds `a` to an integral value, represented as a binary32 float.
#[must_use]
pub fn round_to_int(a: u32, exact: bool, status: &mut FloatStatus) -> u32 {
    let r = ops::convert::round_to_int(unpack(a, status), exact, status);
    pack(r, status)
}

/// `a * 2^n`.
#[must_use]
pub fn scalbn(a: u32, n: i32, status: &mut FloatStatus) -> u32 {
    let r = ops::convert::scalbn(unpack(a, status), n);
    pack(r, status)
}

/// Flushes a subnormal `a` to a same-signed zero when
/// `status.flush_inputs_to_zero` is set; otherwise a no-op.
#[must_use]
pub fn squash_input_denormal(a: u32, status: &mut FloatStatus) -> u32 {
    parts::squash_input_denormal(u64::from(a), &F32, status) as u32
}

/// True if `a`'s bit pattern encodes a signaling NaN under `policy`'s
/// signaling-bit convention.
#[must_use]
pub fn is_signaling_nan(a: u32, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, &mut scratch).class == parts::FloatClass::SignalingNan
}

/// True if `a`'s bit pattern encodes a quiet NaN under `policy`'s
/// signaling-bit convention.
#[must_use]
pub fn is_quiet_nan(a: u32, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, &mut scratch).class == parts::FloatClass::QuietNan
}

/// Quiets a signaling NaN's payload in place; any other value is unchanged.
#[must_use]
pub fn silence_nan(a: u32, policy: &TargetPolicy) -> u32 {
    let mut scratch = FloatStatus::with_policy(*policy);
    let p = parts::maybe_silence(unpack(a, &mut scratch), &scratch);
    pack(p, &mut scratch)
}

/// The default (non-payload-propagating) quiet NaN for `policy`.
#[must_use]
pub fn default_nan(policy: &TargetPolicy) -> u32 {
    let mut scratch = FloatStatus::with_policy(*policy);
    pack(nan::default_nan(policy), &mut scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(v: f32) -> u32 {
        v.to_bits()
    }

    fn value(b: u32) -> f32 {
        f32::from_bits(b)
    }

    #[test]
    fn add_matches_hardware_for_exact_values() {
        let mut st = FloatStatus::default();
        assert_eq!(value(add(bits(1.5), bits(2.25), &mut st)), 3.75);
    }

    #[test]
    fn div_by_zero_raises_divide_by_zero() {
        let mut st = FloatStatus::default();
        let r = div(bits(1.0), bits(0.0), &mut st);
        assert!(value(r).is_infinite());
        assert!(st.flags.contains(crate::status::ExceptionFlags::DIVIDE_BY_ZERO));
    }

    #[test]
    fn to_i32_and_from_i64_roundtrip() {
        let mut st = FloatStatus::default();
        let f = from_i64(-17, &mut st);
        assert_eq!(to_i32(f, &mut st), -17);
    }

    #[test]
    fn is_signaling_nan_detects_raw_pattern() {
        let policy = TargetPolicy::ieee754();
        let snan_bits = 0x7FA0_0001u32;
        assert!(is_signaling_nan(snan_bits, &policy));
        assert!(!is_quiet_nan(snan_bits, &policy));
    }

    #[test]
    fn from_f64_narrows_with_rounding() {
        let mut st = FloatStatus::default();
        let wide = std::f64::consts::PI.to_bits();
        let narrowed = value(from_f64(wide, &mut st));
        assert!((narrowed - std::f32::consts::PI).abs() < 1e-6);
    }
}
