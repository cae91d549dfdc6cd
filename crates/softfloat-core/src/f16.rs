//! Public binary16 ("half precision") entry points, parameterized over
//! [`FormatDescriptor`] so the same functions serve both IEEE binary16
//! ([`F16`]) and the ARM alternate half-precision variant
//! ([`F16_ARM_ALT`]) — the two formats differ only in whether the maximum
//! biased exponent encodes Inf/NaN or an ordinary finite value (`spec.md`
//! §3.1, §4.3), a distinction [`FormatDescriptor::no_inf_or_nan`] already
//! captures, so one set of wrappers covers both.

use crate::format::{FormatDescriptor, F16};
use crate::nan;
use crate::ops;
use crate::ops::compare::FloatRelation;
use crate::parts;
use crate::policy::TargetPolicy;
use crate::status::FloatStatus;

fn unpack(bits: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> parts::FloatParts {
    parts::unpack(u64::from(bits), format, status)
}

fn pack(p: parts::FloatParts, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    parts::round_and_pack(p, format, status) as u16
}

/// `a + b`, under `format` (pass [`F16_ARM_ALT`](crate::format::F16_ARM_ALT)
/// for the ARM variant).
#[must_use]
pub fn add(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::add_sub::add(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// `a - b`.
#[must_use]
pub fn sub(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::add_sub::sub(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// `a * b`.
#[must_use]
pub fn mul(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::mul::mul(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// `a / b`.
#[must_use]
pub fn div(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::div::div(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// `a * b + c`, rounded once.
#[must_use]
pub fn muladd(a: u16, b: u16, c: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::muladd::muladd(
        unpack(a, format, status),
        unpack(b, format, status),
        unpack(c, format, status),
        status,
    );
    pack(r, format, status)
}

/// `sqrt(a)`.
#[must_use]
pub fn sqrt(a: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::sqrt::sqrt(unpack(a, format, status), status);
    pack(r, format, status)
}

/// IEEE remainder of `a` and `b`.
#[must_use]
pub fn rem(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::rem::rem(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// Signaling comparison.
#[must_use]
pub fn compare_signaling(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> FloatRelation {
    ops::compare::compare_signaling(unpack(a, format, status), unpack(b, format, status), status)
}

/// Quiet comparison.
#[must_use]
pub fn compare_quiet(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> FloatRelation {
    ops::compare::compare_quiet(unpack(a, format, status), unpack(b, format, status), status)
}

/// IEEE 754-2019 NaN-propagating minimum.
#[must_use]
pub fn min(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::minmax::min(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// IEEE 754-2019 NaN-propagating maximum.
#[must_use]
pub fn max(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::minmax::max(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// IEEE 754-2008 `minNum`.
#[must_use]
pub fn min_num(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::minmax::min_num(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// IEEE 754-2008 `maxNum`.
#[must_use]
pub fn max_num(a: u16, b: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::minmax::max_num(unpack(a, format, status), unpack(b, format, status), status);
    pack(r, format, status)
}

/// Converts to a signed 32-bit integer.
#[must_use]
pub fn to_i32(a: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> i32 {
    ops::convert::to_i32(unpack(a, format, status), status)
}

/// Converts a signed 32-bit integer to the nearest representable value.
#[must_use]
pub fn from_i32(v: i32, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    pack(ops::convert::from_i64(i64::from(v)), format, status)
}

/// Converts a binary32 value down to this format.
#[must_use]
pub fn from_f32(a: u32, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let unpacked = parts::unpack(u64::from(a), &crate::format::F32, status);
    let p = ops::convert::float_to_float(unpacked, format, status);
    pack(p, format, status)
}

/// Rounds `a` to an integral value, represented as a float in `format`.
#[must_use]
pub fn round_to_int(a: u16, exact: bool, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    let r = ops::convert::round_to_int(unpack(a, format, status), exact, status);
    pack(r, format, status)
}

/// Flushes a subnormal `a` to a same-signed zero when
/// `status.flush_inputs_to_zero` is set.
#[must_use]
pub fn squash_input_denormal(a: u16, format: &FormatDescriptor, status: &mut FloatStatus) -> u16 {
    parts::squash_input_denormal(u64::from(a), format, status) as u16
}

/// True if `a` encodes a signaling NaN under `policy`'s convention.
#[must_use]
pub fn is_signaling_nan(a: u16, format: &FormatDescriptor, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, format, &mut scratch).class == parts::FloatClass::SignalingNan
}

/// True if `a` encodes a quiet NaN under `policy`'s convention.
#[must_use]
pub fn is_quiet_nan(a: u16, format: &FormatDescriptor, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, format, &mut scratch).class == parts::FloatClass::QuietNan
}

/// Quiets a signaling NaN's payload; any other value is unchanged.
#[must_use]
pub fn silence_nan(a: u16, format: &FormatDescriptor, policy: &TargetPolicy) -> u16 {
    let mut scratch = FloatStatus::with_policy(*policy);
    let p = parts::maybe_silence(unpack(a, format, &mut scratch), &scratch);
    pack(p, format, &mut scratch)
}

/// The default (non-payload-propagating) quiet NaN for `policy`, encoded in
/// `format`. For the ARM alternate half-precision format, which has no NaN
/// encoding, this returns a signed zero instead (`spec.md` §4.12).
#[must_use]
pub fn default_nan(format: &FormatDescriptor, policy: &TargetPolicy) -> u16 {
    let mut scratch = FloatStatus::with_policy(*policy);
    if format.no_inf_or_nan {
        return pack(parts::FloatParts::zero(true), format, &mut scratch);
    }
    pack(nan::default_nan(policy), format, &mut scratch)
}
