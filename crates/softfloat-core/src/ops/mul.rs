//! Generic multiplication shared by f16/f32/f64.
//!
//! Grounded in `softfloat.c`'s `mulFloat64Sigs`: widen both significands
//! with a 64x64->128 multiply, then renormalize into canonical form via
//! [`super::wide::normalize_wide128`].

use crate::nan;
use crate::ops::wide::normalize_wide128;
use crate::parts::{FloatClass, FloatParts};
use crate::primitives;
use crate::status::{ExceptionFlags, FloatStatus};

/// `a * b`.
#[must_use]
pub fn mul(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    if a.is_nan() || b.is_nan() {
        let policy = status.policy;
        return nan::pick_nan(a, b, status, &policy);
    }

    let sign = a.sign != b.sign;
    let a_inf = a.class == FloatClass::Infinity;
    let b_inf = b.class == FloatClass::Infinity;
    let a_zero = a.class == FloatClass::Zero;
    let b_zero = b.class == FloatClass::Zero;

    if (a_inf && b_zero) || (b_inf && a_zero) {
        status.raise(ExceptionFlags::INVALID);
        return nan::default_nan(&status.policy);
    }
    if a_inf || b_inf {
        return FloatParts::infinity(sign);
    }
    if a_zero || b_zero {
        return FloatParts::zero(sign);
    }

    let (hi, lo) = primitives::mul64_to_128(a.frac, b.frac);
    let product = (u128::from(hi) << 64) | u128::from(lo);
    normalize_wide128(sign, a.exp + b.exp, product)
}
