//! Generic division shared by f16/f32/f64.
//!
//! Grounded in `softfloat.c`'s `divFloat64Sigs`. Berkeley SoftFloat
//! approximates the quotient digit-by-digit because C lacks 128-bit
//! division; Rust's `u128` computes the exact quotient and remainder
//! directly, so the sticky/inexact bit falls out of the remainder with no
//! iterative correction needed (the same simplification
//! [`crate::primitives::estimate_div128_by_64`] documents).

use crate::nan;
use crate::parts::{FloatClass, FloatParts};
use crate::status::{ExceptionFlags, FloatStatus};

/// `a / b`.
#[must_use]
pub fn div(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    if a.is_nan() || b.is_nan() {
        let policy = status.policy;
        return nan::pick_nan(a, b, status, &policy);
    }

    let sign = a.sign != b.sign;
    let a_inf = a.class == FloatClass::Infinity;
    let b_inf = b.class == FloatClass::Infinity;
    let a_zero = a.class == FloatClass::Zero;
    let b_zero = b.class == FloatClass::Zero;

    if (a_inf && b_inf) || (a_zero && b_zero) {
        status.raise(ExceptionFlags::INVALID);
        return nan::default_nan(&status.policy);
    }
    if a_inf || b_zero {
        if b_zero && !a_inf {
            status.raise(ExceptionFlags::DIVIDE_BY_ZERO);
        }
        return FloatParts::infinity(sign);
    }
    if a_zero || b_inf {
        return FloatParts::zero(sign);
    }

    let n: u128 = u128::from(a.frac) << 62;
    let d: u128 = u128::from(b.frac);
    let mut q = (n / d) as u64;
    let r = n % d;
    let mut exp = a.exp - b.exp;

    if q < (1u64 << 62) {
        q <<= 1;
        exp -= 1;
    }
    let frac = if r != 0 { q | 1 } else { q };

    FloatParts {
        class: FloatClass::Normal,
        sign,
        exp,
        frac,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::F32;
    use crate::parts::{round_and_pack, unpack};
    use crate::status::RoundingMode;

    fn status() -> FloatStatus {
        FloatStatus::default()
    }

    fn run(av: f32, bv: f32) -> f32 {
        let mut st = status();
        let a = unpack(u64::from(av.to_bits()), &F32, &mut st);
        let b = unpack(u64::from(bv.to_bits()), &F32, &mut st);
        let r = div(a, b, &mut st);
        let bits = round_and_pack(r, &F32, &mut st);
        f32::from_bits(bits as u32)
    }

    #[test]
    fn div_basic() {
        assert_eq!(run(10.0, 4.0), 2.5);
        assert_eq!(run(1.0, 2.0), 0.5);
    }

    #[test]
    fn div_by_zero_is_infinity_with_divide_by_zero_flag() {
        let mut st = status();
        let a = unpack(u64::from(5.0f32.to_bits()), &F32, &mut st);
        let zero = unpack(0, &F32, &mut st);
        let r = div(a, zero, &mut st);
        assert_eq!(r.class, FloatClass::Infinity);
        assert!(st.flags.contains(ExceptionFlags::DIVIDE_BY_ZERO));
    }

    #[test]
    fn zero_div_zero_is_invalid() {
        let mut st = status();
        let zero = unpack(0, &F32, &mut st);
        let r = div(zero, zero, &mut st);
        assert!(r.is_nan());
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn div_is_inexact_for_nonterminating_quotient() {
        let mut st = status();
        st.rounding_mode = RoundingMode::NearestEven;
        let a = unpack(u64::from(1.0f32.to_bits()), &F32, &mut st);
        let b = unpack(u64::from(3.0f32.to_bits()), &F32, &mut st);
        let r = div(a, b, &mut st);
        let _ = round_and_pack(r, &F32, &mut st);
        assert!(st.flags.contains(ExceptionFlags::INEXACT));
    }
}
