//! IEEE remainder (`spec.md` §16 supplement: `F_rem`), kept as its own
//! routine rather than folded into division, matching `softfloat.c`'s
//! separate `remFloat64Sigs`.
//!
//! The result `a - n*b` (`n` the integer nearest `a/b`, ties to even) is
//! always exact given exact finite inputs, computed here via a bit-serial
//! modular reduction (the same restoring-division structure
//! `remFloat64Sigs` uses, generalized to any exponent gap via `u128`
//! instead of the original's 64-bit chunks).

use crate::nan;
use crate::parts::{FloatClass, FloatParts};
use crate::primitives;
use crate::status::{ExceptionFlags, FloatStatus};

/// `a rem b` (IEEE remainder, not `fmod`).
#[must_use]
pub fn rem(a: FloatParts, b: FloatParts, status: &mut FloatStatus) -> FloatParts {
    if a.is_nan() || b.is_nan() {
        let policy = status.policy;
        return nan::pick_nan(a, b, status, &policy);
    }
    if a.class == FloatClass::Infinity || b.class == FloatClass::Zero {
        status.raise(ExceptionFlags::INVALID);
        return nan::default_nan(&status.policy);
    }
    if b.class == FloatClass::Infinity || a.class == FloatClass::Zero {
        return a;
    }

    let b_wide = u128::from(b.frac);
    let a_wide = u128::from(a.frac);

    // `cur_exp` only ever decreases toward `b.exp`, so the loop below requires
    // `a.exp >= b.exp` to terminate. When `a.exp < b.exp`, `|a| < |b|`
    // unconditionally, so handle it directly instead.
    if a.exp < b.exp {
        if a.exp + 1 < b.exp || a_wide < b_wide {
            return a;
        }
        if a_wide == b_wide {
            // Exact tie at |a| == |b|/2: the nearest integer quotient is 0
            // (even), so the remainder is `a` unchanged.
            return a;
        }
        let mag = 2 * b_wide - a_wide;
        if mag == 0 {
            return FloatParts::zero(a.sign);
        }
        let mag64 = mag as u64;
        let shift = primitives::count_leading_zeros_64(mag64) - 1;
        return FloatParts {
            class: FloatClass::Normal,
            sign: !a.sign,
            exp: a.exp - shift as i32,
            frac: mag64 << shift,
        };
    }

    let mut cur = a_wide;
    let mut cur_exp = a.exp;
    let mut last_bit_subtracted = false;

    loop {
        let subtract = cur >= b_wide;
        if subtract {
            cur -= b_wide;
        }
        last_bit_subtracted = subtract;
        if cur_exp == b.exp {
            break;
        }
        cur <<= 1;
        cur_exp -= 1;
    }

    let doubled = cur * 2;
    let use_next_quotient = doubled > b_wide || (doubled == b_wide && last_bit_subtracted);
    let (mag, sign_flip) = if use_next_quotient {
        (b_wide - cur, true)
    } else {
        (cur, false)
    };

    if mag == 0 {
        return FloatParts::zero(a.sign);
    }

    let mag64 = mag as u64;
    let shift = primitives::count_leading_zeros_64(mag64) - 1;
    FloatParts {
        class: FloatClass::Normal,
        sign: if sign_flip { !a.sign } else { a.sign },
        exp: b.exp - shift as i32,
        frac: mag64 << shift,
    }
}
