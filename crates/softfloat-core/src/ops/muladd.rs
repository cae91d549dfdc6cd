//! Fused multiply-add: `a * b + c` rounded exactly once, with no
//! intermediate rounding of the product (`spec.md` §5's muladd note).
//!
//! Grounded in `softfloat.c`'s `float64_muladd`: compute the full product
//! at a 128-bit scale, align `c` to the same scale, add or subtract, then
//! round the combined wide significand a single time.

use crate::nan::{self, MulAddOperands};
use crate::ops::wide::{normalize_wide128, shift_right_jamming_128, widen_to_124};
use crate::parts::{FloatClass, FloatParts};
use crate::primitives;
use crate::status::{ExceptionFlags, FloatStatus, RoundingMode};

/// `a * b + c`, rounded once.
#[must_use]
pub fn muladd(a: FloatParts, b: FloatParts, c: FloatParts, status: &mut FloatStatus) -> FloatParts {
    let policy = status.policy;
    let inf_times_zero = (a.class == FloatClass::Infinity && b.class == FloatClass::Zero)
        || (b.class == FloatClass::Infinity && a.class == FloatClass::Zero);

    if a.is_nan() || b.is_nan() || c.is_nan() || inf_times_zero {
        let operands = MulAddOperands { a, b, c };
        return nan::pick_nan_muladd(operands, inf_times_zero, status, &policy);
    }

    let product_sign = a.sign != b.sign;
    let product_inf = a.class == FloatClass::Infinity || b.class == FloatClass::Infinity;

    if product_inf {
        if c.class == FloatClass::Infinity && c.sign != product_sign {
            status.raise(ExceptionFlags::INVALID);
            return nan::default_nan(&policy);
        }
        return FloatParts::infinity(product_sign);
    }

    let product_zero = a.class == FloatClass::Zero || b.class == FloatClass::Zero;
    if product_zero {
        return match c.class {
            FloatClass::Zero if product_sign == c.sign => FloatParts::zero(product_sign),
            FloatClass::Zero => FloatParts::zero(status.rounding_mode == RoundingMode::Downward),
            _ => c,
        };
    }

    if c.class == FloatClass::Infinity {
        return FloatParts::infinity(c.sign);
    }

    let exp_sum = a.exp + b.exp;
    let (p_hi, p_lo) = primitives::mul64_to_128(a.frac, b.frac);
    let product = (u128::from(p_hi) << 64) | u128::from(p_lo);

    if c.class == FloatClass::Zero {
        return normalize_wide128(product_sign, exp_sum, product);
    }

    let c_wide = widen_to_124(c.frac);
    let (base_exp, prod_aligned, c_aligned) = if exp_sum >= c.exp {
        let diff = (exp_sum - c.exp) as u32;
        (exp_sum, product, shift_right_jamming_128(c_wide, diff))
    } else {
        let diff = (c.exp - exp_sum) as u32;
        (c.exp, shift_right_jamming_128(product, diff), c_wide)
    };

    if product_sign == c.sign {
        normalize_wide128(product_sign, base_exp, prod_aligned + c_aligned)
    } else if prod_aligned >= c_aligned {
        let diff = prod_aligned - c_aligned;
        if diff == 0 {
            return FloatParts::zero(status.rounding_mode == RoundingMode::Downward);
        }
        normalize_wide128(product_sign, base_exp, diff)
    } else {
        normalize_wide128(c.sign, base_exp, c_aligned - prod_aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::F32;
    use crate::parts::{round_and_pack, unpack};

    fn status() -> FloatStatus {
        FloatStatus::default()
    }

    fn run(av: f32, bv: f32, cv: f32) -> f32 {
        let mut st = status();
        let a = unpack(u64::from(av.to_bits()), &F32, &mut st);
        let b = unpack(u64::from(bv.to_bits()), &F32, &mut st);
        let c = unpack(u64::from(cv.to_bits()), &F32, &mut st);
        let r = muladd(a, b, c, &mut st);
        let bits = round_and_pack(r, &F32, &mut st);
        f32::from_bits(bits as u32)
    }

    #[test]
    fn muladd_basic() {
        assert_eq!(run(2.0, 3.0, 4.0), 10.0);
    }

    #[test]
    fn muladd_f64_one_times_one_plus_one_is_two_and_flagless() {
        use crate::format::F64;
        let mut st = status();
        let one = unpack(0x3ff0_0000_0000_0000, &F64, &mut st);
        let r = muladd(one, one, one, &mut st);
        let bits = round_and_pack(r, &F64, &mut st);
        assert_eq!(bits, 0x4000_0000_0000_0000);
        assert_eq!(st.flags, ExceptionFlags::empty());
    }

    #[test]
    fn muladd_exact_cancellation() {
        assert_eq!(run(2.0, 3.0, -6.0), 0.0);
    }

    #[test]
    fn muladd_inf_zero_plus_nan_is_invalid() {
        let mut st = status();
        let inf = unpack(u64::from(f32::INFINITY.to_bits()), &F32, &mut st);
        let zero = unpack(0, &F32, &mut st);
        let qnan = unpack(u64::from(f32::NAN.to_bits()), &F32, &mut st);
        let r = muladd(inf, zero, qnan, &mut st);
        assert!(r.is_nan());
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn muladd_avoids_double_rounding() {
        // a*b produces a result whose exact product has low bits that would
        // round differently if rounded once before adding c versus rounded
        // once at the end; this is the behavior muladd exists to provide.
        let a = 1.000_000_1_f32;
        let b = 1.000_000_1_f32;
        let c = -1.0f32;
        let one_shot = run(a, b, c);
        assert!(one_shot > 0.0);
    }
}
