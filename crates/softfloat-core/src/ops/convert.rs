//! Float/integer conversions, cross-format float conversion, `scalbn`, and
//! round-to-integral-value, per `spec.md` §5/§6's conversion operation list.
//!
//! Grounded in `softfloat.c`'s `roundAndPackInt64` / `float64_to_int64` /
//! `int64_to_float64` family; since [`FloatParts`] is already
//! format-independent, float-to-float narrowing/widening needs no dedicated
//! routine here beyond the NaN signaling check — it falls out of unpacking
//! at the source format and [`crate::parts::round_and_pack`] at the
//! destination.

use crate::format::FormatDescriptor;
use crate::parts::{self, FloatClass, FloatParts};
use crate::primitives;
use crate::status::{ExceptionFlags, FloatStatus, RoundingMode};

/// Bound on the scale factor a scaled float-to-integer conversion accepts
/// (`spec.md` §4.12).
pub const MAX_SCALE: i32 = 0x1_0000;

/// Converts to a signed 16-bit integer, saturating and raising `INVALID` on
/// NaN, infinity, or out-of-range magnitude.
#[must_use]
pub fn to_i16(a: FloatParts, status: &mut FloatStatus) -> i16 {
    to_signed(a, status, i128::from(i16::MIN), i128::from(i16::MAX)) as i16
}

/// Converts to a signed 32-bit integer.
#[must_use]
pub fn to_i32(a: FloatParts, status: &mut FloatStatus) -> i32 {
    to_signed(a, status, i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

/// Converts to a signed 64-bit integer.
#[must_use]
pub fn to_i64(a: FloatParts, status: &mut FloatStatus) -> i64 {
    to_signed(a, status, i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Converts to an unsigned 16-bit integer. Negative operands are invalid.
#[must_use]
pub fn to_u16(a: FloatParts, status: &mut FloatStatus) -> u16 {
    to_unsigned(a, status, u128::from(u16::MAX)) as u16
}

/// Converts to an unsigned 32-bit integer.
#[must_use]
pub fn to_u32(a: FloatParts, status: &mut FloatStatus) -> u32 {
    to_unsigned(a, status, u128::from(u32::MAX)) as u32
}

/// Converts to an unsigned 64-bit integer.
#[must_use]
pub fn to_u64(a: FloatParts, status: &mut FloatStatus) -> u64 {
    to_unsigned(a, status, u128::from(u64::MAX)) as u64
}

/// Converts to a signed 32-bit integer after scaling `a` by `2^scale`
/// (`scale` clamped to `[-MAX_SCALE, MAX_SCALE]`), the scaled variant
/// `spec.md` §4.12 describes for fixed-point float-to-integer conversion.
#[must_use]
pub fn to_i32_scaled(a: FloatParts, scale: i32, status: &mut FloatStatus) -> i32 {
    to_signed(scalbn(a, scale.clamp(-MAX_SCALE, MAX_SCALE)), status, i128::from(i32::MIN), i128::from(i32::MAX))
        as i32
}

/// Scaled variant of [`to_i64`].
#[must_use]
pub fn to_i64_scaled(a: FloatParts, scale: i32, status: &mut FloatStatus) -> i64 {
    to_signed(scalbn(a, scale.clamp(-MAX_SCALE, MAX_SCALE)), status, i128::from(i64::MIN), i128::from(i64::MAX))
        as i64
}

/// Scaled variant of [`to_u32`].
#[must_use]
pub fn to_u32_scaled(a: FloatParts, scale: i32, status: &mut FloatStatus) -> u32 {
    to_unsigned(scalbn(a, scale.clamp(-MAX_SCALE, MAX_SCALE)), status, u128::from(u32::MAX)) as u32
}

/// Scaled variant of [`to_u64`].
#[must_use]
pub fn to_u64_scaled(a: FloatParts, scale: i32, status: &mut FloatStatus) -> u64 {
    to_unsigned(scalbn(a, scale.clamp(-MAX_SCALE, MAX_SCALE)), status, u128::from(u64::MAX)) as u64
}

/// Widens a signed 64-bit integer into canonical form, exactly.
#[must_use]
pub fn from_i64(v: i64) -> FloatParts {
    if v == 0 {
        return FloatParts::zero(false);
    }
    from_magnitude(v.unsigned_abs(), v < 0)
}

/// Widens an unsigned 64-bit integer into canonical form, exactly.
#[must_use]
pub fn from_u64(v: u64) -> FloatParts {
    if v == 0 {
        return FloatParts::zero(false);
    }
    from_magnitude(v, false)
}

fn from_magnitude(magnitude: u64, sign: bool) -> FloatParts {
    let bit_length = 64 - primitives::count_leading_zeros_64(magnitude);
    let exp = bit_length as i32 - 1;
    let frac = if bit_length < 64 {
        magnitude << (63 - bit_length)
    } else {
        primitives::shift_right_jamming(magnitude, 1)
    };
    FloatParts {
        class: FloatClass::Normal,
        sign,
        exp,
        frac,
    }
}

/// `min`'s bit pattern (sign bit set, every other bit clear) is the
/// format's "indefinite integer": every invalid input — NaN, infinity, or
/// an overflowing magnitude — saturates to it regardless of which operand
/// sign caused the overflow, per `softfloat.c`'s `int32_indefinite` family.
fn to_signed(a: FloatParts, status: &mut FloatStatus, min: i128, max: i128) -> i128 {
    if a.is_nan() {
        status.raise(ExceptionFlags::INVALID);
        return min;
    }
    if a.class == FloatClass::Infinity {
        status.raise(ExceptionFlags::INVALID);
        return min;
    }
    if a.class == FloatClass::Zero {
        return 0;
    }
    if a.exp >= 64 {
        status.raise(ExceptionFlags::INVALID);
        return min;
    }

    let magnitude = round_to_integer_magnitude(a, status);
    let signed: i128 = if a.sign {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };
    if signed < min || signed > max {
        status.raise(ExceptionFlags::INVALID);
        return min;
    }
    signed
}

fn to_unsigned(a: FloatParts, status: &mut FloatStatus, max: u128) -> u128 {
    if a.is_nan() {
        status.raise(ExceptionFlags::INVALID);
        return max;
    }
    if a.class == FloatClass::Infinity {
        status.raise(ExceptionFlags::INVALID);
        return if a.sign { 0 } else { max };
    }
    if a.class == FloatClass::Zero {
        return 0;
    }
    if a.sign {
        status.raise(ExceptionFlags::INVALID);
        return 0;
    }
    if a.exp >= 64 {
        status.raise(ExceptionFlags::INVALID);
        return max;
    }

    let magnitude = round_to_integer_magnitude(a, status);
    if magnitude > max {
        status.raise(ExceptionFlags::INVALID);
        return max;
    }
    magnitude
}

/// Rounds `a` (`Normal`, `a.exp < 64`) to the nearest integer per the
/// active rounding mode, raising `INEXACT` when the value wasn't already
/// integral. Grounded in `roundAndPackInt64`'s round-then-shift structure,
/// reusing the same round-bit/half-ulp decision as
/// [`crate::parts::round_and_pack_normal`].
fn round_to_integer_magnitude(a: FloatParts, status: &mut FloatStatus) -> u128 {
    let shift_amount = 62 - a.exp;
    if shift_amount <= 0 {
        return u128::from(a.frac) << (-shift_amount) as u32;
    }
    let shift = shift_amount as u32;
    if shift >= 64 {
        return round_magnitude_below_one(a.sign, status);
    }

    let round_mask = (1u64 << shift) - 1;
    let round_bits = a.frac & round_mask;
    let half_ulp = 1u64 << (shift - 1);
    let mut integer_bits = u128::from(a.frac >> shift);

    let round_up = match status.rounding_mode {
        RoundingMode::NearestEven => {
            round_bits > half_ulp || (round_bits == half_ulp && integer_bits & 1 != 0)
        }
        RoundingMode::NearestAway => round_bits >= half_ulp,
        RoundingMode::TowardZero | RoundingMode::ToOdd => false,
        RoundingMode::Upward => round_bits != 0 && !a.sign,
        RoundingMode::Downward => round_bits != 0 && a.sign,
    };
    if round_bits != 0 {
        status.raise(ExceptionFlags::INEXACT);
    }
    if round_up {
        integer_bits += 1;
    }
    integer_bits
}

/// `a`'s magnitude is strictly below 1 (`exp <= -2`); the rounded integer
/// is 0 unless a directed rounding mode pushes it to 1.
fn round_magnitude_below_one(sign: bool, status: &mut FloatStatus) -> u128 {
    status.raise(ExceptionFlags::INEXACT);
    let round_up = match status.rounding_mode {
        RoundingMode::Upward => !sign,
        RoundingMode::Downward => sign,
        _ => false,
    };
    u128::from(round_up)
}

/// Cross-format float conversion's NaN handling. The actual
/// widening/narrowing of precision happens when the caller unpacks at the
/// source format and [`crate::parts::round_and_pack`]s at the destination;
/// [`FloatParts`] already carries no format-specific width. `dest` only
/// matters here for the ARM alternate half-precision rule: a format with no
/// NaN encoding can't receive one, so a NaN source raises `INVALID` and
/// produces a signed zero instead.
#[must_use]
pub fn float_to_float(a: FloatParts, dest: &FormatDescriptor, status: &mut FloatStatus) -> FloatParts {
    if a.is_nan() {
        if dest.no_inf_or_nan {
            status.raise(ExceptionFlags::INVALID);
            return FloatParts::zero(a.sign);
        }
        if a.class == FloatClass::SignalingNan {
            status.raise(ExceptionFlags::INVALID);
        }
        return parts::maybe_silence(a, status);
    }
    a
}

/// IEEE `roundToIntegralExact`/`roundToIntegralTiesToEven`-style operation:
/// rounds `a` to the nearest integral value, represented as a float in the
/// same canonical form. `exact` selects whether `INEXACT` is raised for a
/// non-integral input (the `Exact` variant) or suppressed (`quiet`).
#[must_use]
pub fn round_to_int(a: FloatParts, exact: bool, status: &mut FloatStatus) -> FloatParts {
    if a.is_nan() {
        if a.class == FloatClass::SignalingNan {
            status.raise(ExceptionFlags::INVALID);
        }
        return parts::maybe_silence(a, status);
    }
    if a.class != FloatClass::Normal || a.exp >= 62 {
        return a;
    }

    let mut scratch = FloatStatus {
        flags: ExceptionFlags::empty(),
        ..*status
    };
    let magnitude = round_to_integer_magnitude(a, &mut scratch);
    if exact {
        status.raise(scratch.flags);
    }

    if magnitude == 0 {
        return FloatParts::zero(a.sign);
    }
    from_magnitude(magnitude as u64, a.sign)
}

/// `a * 2^n`, adjusting only the exponent. `Zero`/`Infinity`/NaN pass
/// through unchanged; overflow or underflow from the new exponent is
/// resolved later by [`crate::parts::round_and_pack`].
#[must_use]
pub fn scalbn(a: FloatParts, n: i32) -> FloatParts {
    match a.class {
        FloatClass::Normal => FloatParts {
            exp: a.exp.saturating_add(n),
            ..a
        },
        _ => a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::F32;
    use crate::parts::unpack;
    use crate::status::RoundingMode;

    fn status() -> FloatStatus {
        FloatStatus::default()
    }

    fn unpack_f32(v: f32, status: &mut FloatStatus) -> FloatParts {
        unpack(u64::from(v.to_bits()), &F32, status)
    }

    #[test]
    fn f64_to_int32_of_two_to_the_52_saturates_to_indefinite() {
        use crate::format::F64;
        let mut st = status();
        let a = unpack(0x4330_0000_0000_0000, &F64, &mut st);
        assert_eq!(to_i32(a, &mut st), 0x8000_0000u32 as i32);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn int32_to_f32_of_i32_max_rounds_up_and_is_inexact() {
        let mut st = status();
        let parts = from_i64(i64::from(0x7fff_ffffu32 as i32));
        let bits = crate::parts::round_and_pack(parts, &F32, &mut st) as u32;
        assert_eq!(bits, 0x4f00_0000);
        assert!(st.flags.contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn to_i32_truncates_toward_nearest() {
        let mut st = status();
        let a = unpack_f32(3.7, &mut st);
        assert_eq!(to_i32(a, &mut st), 4);
        assert!(st.flags.contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn to_i32_toward_zero_truncates() {
        let mut st = status();
        st.rounding_mode = RoundingMode::TowardZero;
        let a = unpack_f32(3.7, &mut st);
        assert_eq!(to_i32(a, &mut st), 3);
    }

    #[test]
    fn to_i16_saturates_to_indefinite_on_overflow() {
        let mut st = status();
        let a = unpack_f32(1.0e10, &mut st);
        assert_eq!(to_i16(a, &mut st), i16::MIN);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn to_u32_of_negative_is_invalid() {
        let mut st = status();
        let a = unpack_f32(-1.0, &mut st);
        assert_eq!(to_u32(a, &mut st), 0);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn nan_to_int_saturates_to_indefinite_and_raises_invalid() {
        let mut st = status();
        let a = unpack_f32(f32::NAN, &mut st);
        assert_eq!(to_i64(a, &mut st), i64::MIN);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn int_to_float_roundtrip_via_round_and_pack() {
        let mut st = status();
        let parts = from_i64(-42);
        let bits = crate::parts::round_and_pack(parts, &F32, &mut st) as u32;
        assert_eq!(f32::from_bits(bits), -42.0);
    }

    #[test]
    fn from_u64_max_is_inexact_when_narrowed() {
        let mut st = status();
        let parts = from_u64(u64::MAX);
        let bits = crate::parts::round_and_pack(parts, &F32, &mut st) as u32;
        assert_eq!(f32::from_bits(bits), u64::MAX as f32);
    }

    #[test]
    fn scalbn_adjusts_exponent() {
        let mut st = status();
        let a = unpack_f32(1.5, &mut st);
        let scaled = scalbn(a, 3);
        let bits = crate::parts::round_and_pack(scaled, &F32, &mut st) as u32;
        assert_eq!(f32::from_bits(bits), 12.0);
    }

    #[test]
    fn round_to_int_exact_rounds_and_flags_inexact() {
        let mut st = status();
        let a = unpack_f32(2.5, &mut st);
        let rounded = round_to_int(a, true, &mut st);
        let bits = crate::parts::round_and_pack(rounded, &F32, &mut st) as u32;
        assert_eq!(f32::from_bits(bits), 2.0); // ties to even
        assert!(st.flags.contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn round_to_int_quiet_suppresses_inexact() {
        let mut st = status();
        let a = unpack_f32(2.5, &mut st);
        let _ = round_to_int(a, false, &mut st);
        assert!(!st.flags.contains(ExceptionFlags::INEXACT));
    }

    #[test]
    fn round_to_int_of_tiny_value_rounds_to_zero() {
        let mut st = status();
        let a = unpack_f32(0.1, &mut st);
        let rounded = round_to_int(a, true, &mut st);
        let bits = crate::parts::round_and_pack(rounded, &F32, &mut st) as u32;
        assert_eq!(f32::from_bits(bits), 0.0);
    }

    #[test]
    fn to_i32_scaled_treats_value_as_fixed_point() {
        let mut st = status();
        let a = unpack_f32(3.0, &mut st);
        // 3.0 * 2^4 = 48.
        assert_eq!(to_i32_scaled(a, 4, &mut st), 48);
    }

    #[test]
    fn float_to_float_to_arm_alt_half_quiets_nan_into_zero() {
        use crate::format::F16_ARM_ALT;
        let mut st = status();
        let nan = unpack_f32(f32::NAN, &mut st);
        let r = float_to_float(nan, &F16_ARM_ALT, &mut st);
        assert_eq!(r.class, FloatClass::Zero);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn float_to_float_to_ieee_format_quiets_signaling_nan() {
        let mut st = status();
        let snan = FloatParts {
            class: FloatClass::SignalingNan,
            sign: false,
            exp: 0,
            frac: 1,
        };
        let r = float_to_float(snan, &F32, &mut st);
        assert_eq!(r.class, FloatClass::QuietNan);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }
}
