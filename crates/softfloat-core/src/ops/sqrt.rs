//! Generic square root shared by f16/f32/f64.
//!
//! Grounded in `softfloat.c`'s `sqrtFloat64Sig`, which approximates via
//! `estimateSqrt32` plus a Newton-Raphson correction step. We use the same
//! Newton-Raphson core, seeded from the operand's bit length rather than a
//! 32-bit lookup table (the operand here is a single 64-bit significand
//! widened to at most 127 bits, a narrower domain than the lookup table was
//! built for); [`crate::primitives::estimate_sqrt32`] is used instead where
//! the wider f128 significand makes its table-seeded approach worthwhile.

use crate::nan;
use crate::parts::{self, FloatClass, FloatParts};
use crate::status::{ExceptionFlags, FloatStatus};

/// `sqrt(a)`.
#[must_use]
pub fn sqrt(a: FloatParts, status: &mut FloatStatus) -> FloatParts {
    if a.is_nan() {
        if a.class == FloatClass::SignalingNan {
            status.raise(ExceptionFlags::INVALID);
        }
        return parts::maybe_silence(a, status);
    }
    if a.class == FloatClass::Zero {
        return a;
    }
    if a.sign {
        status.raise(ExceptionFlags::INVALID);
        return nan::default_nan(&status.policy);
    }
    if a.class == FloatClass::Infinity {
        return a;
    }

    let exp_odd = a.exp.rem_euclid(2) != 0;
    let x: u128 = if exp_odd {
        u128::from(a.frac) << 63
    } else {
        u128::from(a.frac) << 62
    };

    let y = isqrt_u128(x);
    let remainder = x - y * y;
    let frac = if remainder != 0 { (y as u64) | 1 } else { y as u64 };
    let exp = if exp_odd { (a.exp - 1) / 2 } else { a.exp / 2 };

    FloatParts {
        class: FloatClass::Normal,
        sign: false,
        exp,
        frac,
    }
}

/// Integer square root (floor) via Newton-Raphson, seeded from `x`'s bit
/// length for fast convergence from any magnitude.
fn isqrt_u128(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }
    let bit_len = 128 - x.leading_zeros();
    let mut z: u128 = 1u128 << bit_len.div_ceil(2);
    loop {
        let y = (z + x / z) / 2;
        if y >= z {
            break;
        }
        z = y;
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::F32;
    use crate::parts::{round_and_pack, unpack};

    fn status() -> FloatStatus {
        FloatStatus::default()
    }

    fn run(av: f32) -> f32 {
        let mut st = status();
        let a = unpack(u64::from(av.to_bits()), &F32, &mut st);
        let r = sqrt(a, &mut st);
        let bits = round_and_pack(r, &F32, &mut st);
        f32::from_bits(bits as u32)
    }

    #[test]
    fn sqrt_perfect_squares() {
        assert_eq!(run(4.0), 2.0);
        assert_eq!(run(9.0), 3.0);
        assert_eq!(run(0.25), 0.5);
    }

    #[test]
    fn sqrt_of_four_is_two_and_flagless() {
        let mut st = status();
        let a = unpack(0x4080_0000, &F32, &mut st);
        let r = sqrt(a, &mut st);
        let bits = round_and_pack(r, &F32, &mut st);
        assert_eq!(bits as u32, 0x4000_0000);
        assert_eq!(st.flags, ExceptionFlags::empty());
    }

    #[test]
    fn sqrt_of_negative_zero_is_negative_zero() {
        assert_eq!(run(-0.0).to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn sqrt_of_negative_is_invalid() {
        let mut st = status();
        let a = unpack(u64::from((-4.0f32).to_bits()), &F32, &mut st);
        let r = sqrt(a, &mut st);
        assert!(r.is_nan());
        assert!(st.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn sqrt_of_infinity_is_infinity() {
        let mut st = status();
        let a = unpack(u64::from(f32::INFINITY.to_bits()), &F32, &mut st);
        let r = sqrt(a, &mut st);
        assert_eq!(r.class, FloatClass::Infinity);
        assert!(!r.sign);
    }

    #[test]
    fn sqrt_of_two_is_inexact() {
        let mut st = status();
        let a = unpack(u64::from(2.0f32.to_bits()), &F32, &mut st);
        let r = sqrt(a, &mut st);
        let _ = round_and_pack(r, &F32, &mut st);
        assert!(st.flags.contains(ExceptionFlags::INEXACT));
    }
}
