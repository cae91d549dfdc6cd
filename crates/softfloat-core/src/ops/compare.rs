//! Quiet and signaling comparison shared by f16/f32/f64.
//!
//! Grounded in `softfloat.c`'s `float64_compare`/`float64_compare_quiet`
//! pair: both compute the same total order over non-NaN values, differing
//! only in whether a quiet NaN operand alone raises `INVALID`.

use core::cmp::Ordering;

use crate::parts::{FloatClass, FloatParts};
use crate::status::{ExceptionFlags, FloatStatus};

/// The four-way result of comparing two floats, where either may be NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatRelation {
    /// `a < b`.
    Less,
    /// `a == b` (including `-0.0 == 0.0`).
    Equal,
    /// `a > b`.
    Greater,
    /// Either operand was NaN.
    Unordered,
}

/// Signaling compare: any NaN operand (quiet or signaling) raises
/// `INVALID`.
#[must_use]
pub fn compare_signaling(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatRelation {
    compare(a, b, status, true)
}

/// Quiet compare: only a signaling NaN operand raises `INVALID`.
#[must_use]
pub fn compare_quiet(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatRelation {
    compare(a, b, status, false)
}

fn compare(a: FloatParts, b: FloatParts, status: &mut FloatStatus, always_invalid: bool) -> FloatRelation {
    if a.is_nan() || b.is_nan() {
        let any_signaling = a.class == FloatClass::SignalingNan || b.class == FloatClass::SignalingNan;
        if any_signaling || always_invalid {
            status.raise(ExceptionFlags::INVALID);
        }
        return FloatRelation::Unordered;
    }

    match value_cmp(a, b) {
        Ordering::Less => FloatRelation::Less,
        Ordering::Equal => FloatRelation::Equal,
        Ordering::Greater => FloatRelation::Greater,
    }
}

/// Total order over non-NaN [`FloatParts`] values (`-0.0 == 0.0`). Shared
/// with [`super::minmax`].
///
/// # Panics
///
/// Panics via `unreachable!()` if either operand is a NaN; callers must
/// filter NaNs out first.
#[must_use]
pub(crate) fn value_cmp(a: FloatParts, b: FloatParts) -> Ordering {
    assert!(!a.is_nan() && !b.is_nan(), "value_cmp called with a NaN operand");

    let a_zero = a.class == FloatClass::Zero;
    let b_zero = b.class == FloatClass::Zero;
    if a_zero && b_zero {
        return Ordering::Equal;
    }
    if a_zero {
        return if b.sign { Ordering::Greater } else { Ordering::Less };
    }
    if b_zero {
        return if a.sign { Ordering::Less } else { Ordering::Greater };
    }
    if a.sign != b.sign {
        return if a.sign { Ordering::Less } else { Ordering::Greater };
    }

    let magnitude = magnitude_cmp(a, b);
    if a.sign {
        magnitude.reverse()
    } else {
        magnitude
    }
}

fn magnitude_cmp(a: FloatParts, b: FloatParts) -> Ordering {
    match (a.class, b.class) {
        (FloatClass::Infinity, FloatClass::Infinity) => Ordering::Equal,
        (FloatClass::Infinity, FloatClass::Normal) => Ordering::Greater,
        (FloatClass::Normal, FloatClass::Infinity) => Ordering::Less,
        (FloatClass::Normal, FloatClass::Normal) => a.exp.cmp(&b.exp).then(a.frac.cmp(&b.frac)),
        _ => unreachable!("magnitude_cmp called with a zero or NaN operand"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::F32;
    use crate::parts::unpack;
    use crate::status::FloatStatus;

    fn status() -> FloatStatus {
        FloatStatus::default()
    }

    fn cmp(av: f32, bv: f32) -> FloatRelation {
        let mut st = status();
        let a = unpack(u64::from(av.to_bits()), &F32, &mut st);
        let b = unpack(u64::from(bv.to_bits()), &F32, &mut st);
        compare_quiet(a, b, &mut st)
    }

    #[test]
    fn compare_orders_negative_and_positive() {
        assert_eq!(cmp(1.0, 2.0), FloatRelation::Less);
        assert_eq!(cmp(2.0, 1.0), FloatRelation::Greater);
        assert_eq!(cmp(-1.0, 1.0), FloatRelation::Less);
    }

    #[test]
    fn compare_treats_negative_and_positive_zero_equal() {
        assert_eq!(cmp(-0.0, 0.0), FloatRelation::Equal);
    }

    #[test]
    fn compare_infinity_greater_than_any_finite() {
        assert_eq!(cmp(f32::INFINITY, 1e30), FloatRelation::Greater);
        assert_eq!(cmp(f32::NEG_INFINITY, -1e30), FloatRelation::Less);
    }

    #[test]
    fn quiet_compare_does_not_raise_on_quiet_nan() {
        let mut st = status();
        let a = unpack(u64::from(f32::NAN.to_bits()), &F32, &mut st);
        let b = unpack(u64::from(1.0f32.to_bits()), &F32, &mut st);
        let r = compare_quiet(a, b, &mut st);
        assert_eq!(r, FloatRelation::Unordered);
        assert!(!st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn signaling_compare_raises_on_quiet_nan() {
        let mut st = status();
        let a = unpack(u64::from(f32::NAN.to_bits()), &F32, &mut st);
        let b = unpack(u64::from(1.0f32.to_bits()), &F32, &mut st);
        let r = compare_signaling(a, b, &mut st);
        assert_eq!(r, FloatRelation::Unordered);
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }
}
