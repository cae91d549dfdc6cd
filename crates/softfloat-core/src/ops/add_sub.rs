//! Generic addition/subtraction shared by f16/f32/f64.
//!
//! Grounded in `examples/original_source/fpu/softfloat.c`'s
//! `addFloat64Sigs` / `subFloat64Sigs`: align the smaller-exponent operand
//! with a sticky right shift, add or subtract 64-bit significands, then
//! renormalize.

use crate::nan;
use crate::parts::{FloatClass, FloatParts};
use crate::primitives;
use crate::status::{ExceptionFlags, FloatStatus, RoundingMode};

/// `a + b`.
#[must_use]
pub fn add(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    compute(a, b, false, status)
}

/// `a - b`.
#[must_use]
pub fn sub(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    compute(a, b, true, status)
}

fn compute(a: FloatParts, b: FloatParts, subtract: bool, status: &mut FloatStatus) -> FloatParts {
    let b = if subtract { flip_sign(b) } else { b };

    if a.is_nan() || b.is_nan() {
        let policy = status.policy;
        return nan::pick_nan(a, b, status, &policy);
    }

    if a.class == FloatClass::Infinity || b.class == FloatClass::Infinity {
        return add_infinities(a, b, status);
    }

    if a.class == FloatClass::Zero && b.class == FloatClass::Zero {
        return add_zeros(a, b, status);
    }
    if a.class == FloatClass::Zero {
        return b;
    }
    if b.class == FloatClass::Zero {
        return a;
    }

    if a.sign == b.sign {
        add_same_sign(a, b)
    } else {
        add_diff_sign(a, b, status)
    }
}

const fn flip_sign(mut p: FloatParts) -> FloatParts {
    p.sign = !p.sign;
    p
}

fn add_infinities(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    let a_inf = a.class == FloatClass::Infinity;
    let b_inf = b.class == FloatClass::Infinity;
    if a_inf && b_inf {
        if a.sign == b.sign {
            return FloatParts::infinity(a.sign);
        }
        status.raise(ExceptionFlags::INVALID);
        return nan::default_nan(&status.policy);
    }
    if a_inf {
        a
    } else {
        b
    }
}

fn add_zeros(a: FloatParts, b: FloatParts, status: &FloatStatus) -> FloatParts {
    if a.sign == b.sign {
        return FloatParts::zero(a.sign);
    }
    FloatParts::zero(status.rounding_mode == RoundingMode::Downward)
}

fn add_same_sign(a: FloatParts, b: FloatParts) -> FloatParts {
    let (hi, lo) = if a.exp >= b.exp { (a, b) } else { (b, a) };
    let exp_diff = (hi.exp - lo.exp) as u32;
    let lo_frac = primitives::shift_right_jamming(lo.frac, exp_diff);

    let sum = u128::from(hi.frac) + u128::from(lo_frac);
    if sum >> 63 != 0 {
        let shifted = primitives::shift_right_jamming(sum as u64, 1);
        FloatParts {
            class: FloatClass::Normal,
            sign: hi.sign,
            exp: hi.exp + 1,
            frac: shifted,
        }
    } else {
        FloatParts {
            class: FloatClass::Normal,
            sign: hi.sign,
            exp: hi.exp,
            frac: sum as u64,
        }
    }
}

fn add_diff_sign(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    let (hi, lo, result_sign) = order_by_magnitude(a, b);
    let exp_diff = (hi.exp - lo.exp) as u32;
    let lo_frac = primitives::shift_right_jamming(lo.frac, exp_diff);

    let diff = hi.frac - lo_frac;
    if diff == 0 {
        return FloatParts::zero(status.rounding_mode == RoundingMode::Downward);
    }

    let shift = primitives::count_leading_zeros_64(diff) - 1;
    FloatParts {
        class: FloatClass::Normal,
        sign: result_sign,
        exp: hi.exp - shift as i32,
        frac: diff << shift,
    }
}

fn order_by_magnitude(a: FloatParts, b: FloatParts) -> (FloatParts, FloatParts, bool) {
    if a.exp > b.exp || (a.exp == b.exp && a.frac >= b.frac) {
        (a, b, a.sign)
    } else {
        (b, a, b.sign)
    }
}
