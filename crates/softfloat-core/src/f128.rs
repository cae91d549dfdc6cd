//! Native 128-bit quad precision, stored as two 64-bit words (`spec.md`
//! §3.1, §3.3). Like [`crate::f80`], there is no shared canonical struct
//! with f16/f32/f64 — but unlike f80's bit-63-leading explicit-integer
//! layout, f128's significand fits comfortably inside a `u128` with room
//! to spare, so the canonical working register below mirrors
//! [`crate::parts::FloatParts`] almost exactly: a fixed leading-one
//! position with a few guard bits below it for round/sticky, just widened
//! from `u64` to `u128`.
//!
//! Grounded in `softfloat.c`'s `float128_add`/`_mul`/`_div`/`_sqrt`/`_rem`
//! and `normalizeRoundAndPackFloat128`.

use crate::nan::NanChoice;
use crate::ops::compare::FloatRelation;
use crate::policy::{DefaultNanPattern, SnanConvention, TargetPolicy};
use crate::primitives;
use crate::status::{ExceptionFlags, FloatStatus, RoundingMode};

const FRAC_BITS: u32 = 112;
const BIAS: i32 = 0x3FFF;
const MAX_BIASED_EXP: u32 = 0x7FFF;

/// The canonical leading-one bit position for the working significand
/// register (`spec.md` §3.2's two-bit-headroom idea, generalized: here the
/// register is a `u128` with 15 bits of headroom above the leading one,
/// rather than `FloatParts`'s 1 bit above bit 62).
const LEAD: u32 = 114;
const FRAC_SHIFT: u32 = LEAD - FRAC_BITS;
const ROUND_MASK: u128 = (1 << FRAC_SHIFT) - 1;
const HALF_ULP: u128 = 1 << (FRAC_SHIFT - 1);
const IMPLICIT_ONE: u128 = 1 << FRAC_BITS;
const FRAC_MSB: u128 = 1 << (LEAD - 1);

/// The raw 128-bit encoding: sign (bit 63 of `hi`), 15-bit biased exponent
/// (bits 62:48 of `hi`), and a 112-bit fraction split across the low 48
/// bits of `hi` and all of `lo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bits {
    /// High word: sign, exponent, and the top 48 fraction bits.
    pub hi: u64,
    /// Low word: the bottom 64 fraction bits.
    pub lo: u64,
}

impl Bits {
    /// Builds a raw encoding from its words.
    #[must_use]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Zero,
    Normal,
    Infinity,
    QuietNan,
    SignalingNan,
}

#[derive(Debug, Clone, Copy)]
struct Unpacked {
    class: Class,
    sign: bool,
    exp: i32,
    /// Significand with its leading one (when `class == Normal`) fixed at
    /// bit [`LEAD`]; bits below [`FRAC_SHIFT`] are round/sticky guard bits.
    sig: u128,
}

impl Unpacked {
    const fn is_nan(self) -> bool {
        matches!(self.class, Class::QuietNan | Class::SignalingNan)
    }
}

/// Widened form of [`crate::nan::is_snan_frac`] over a 112-bit fraction;
/// `f128`'s fraction doesn't fit the shared helper's `u64` width.
fn is_snan_frac(frac: u128, msb_mask: u128, convention: SnanConvention) -> bool {
    let msb_set = frac & msb_mask != 0;
    match convention {
        SnanConvention::Ieee754_2008 => !msb_set,
        SnanConvention::BitIsOne => msb_set,
    }
}

fn zero_bits(sign: bool) -> Bits {
    pack_raw(sign, 0, 0)
}

fn infinity_bits(sign: bool) -> Bits {
    pack_raw(sign, MAX_BIASED_EXP, IMPLICIT_ONE)
}

fn pack_raw(sign: bool, biased_exp: u32, frac_with_implicit: u128) -> Bits {
    let frac = frac_with_implicit & (IMPLICIT_ONE - 1);
    let hi = ((sign as u64) << 63) | (u64::from(biased_exp) << 48) | (frac >> 64) as u64;
    Bits { hi, lo: frac as u64 }
}

fn default_nan_unpacked(policy: &TargetPolicy) -> Unpacked {
    let (sign, frac) = match policy.default_nan_pattern {
        DefaultNanPattern::AllFractionBits => (false, IMPLICIT_ONE - 1),
        DefaultNanPattern::SignAndMsb | DefaultNanPattern::Ieee754Default => (true, FRAC_MSB),
        DefaultNanPattern::MsbMinusOne => (false, (IMPLICIT_ONE - 1) - FRAC_MSB),
    };
    Unpacked { class: Class::QuietNan, sign, exp: 0, sig: frac }
}

fn silence(u: Unpacked, convention: SnanConvention) -> Unpacked {
    let frac = match convention {
        SnanConvention::Ieee754_2008 => u.sig | FRAC_MSB,
        SnanConvention::BitIsOne => u.sig & !FRAC_MSB,
    };
    Unpacked { class: Class::QuietNan, sig: frac, ..u }
}

fn quiet(u: Unpacked, policy: &TargetPolicy) -> Unpacked {
    if u.class == Class::SignalingNan { silence(u, policy.snan_convention) } else { u }
}

fn unpack(a: Bits, status: &mut FloatStatus) -> Unpacked {
    let sign = a.hi >> 63 != 0;
    let biased_exp = u32::from((a.hi >> 48) as u16 & 0x7FFF);
    let encoded_frac: u128 = (u128::from(a.hi & 0xFFFF_FFFF_FFFF) << 64) | u128::from(a.lo);

    if biased_exp == 0 {
        if encoded_frac == 0 {
            return Unpacked { class: Class::Zero, sign, exp: 0, sig: 0 };
        }
        status.raise(ExceptionFlags::INPUT_DENORMAL);
        if status.flush_inputs_to_zero {
            return Unpacked { class: Class::Zero, sign, exp: 0, sig: 0 };
        }
        let shifted = encoded_frac << FRAC_SHIFT;
        let normalize_shift = shifted.leading_zeros() - (127 - LEAD);
        return Unpacked {
            class: Class::Normal,
            sign,
            exp: (1 - BIAS) - normalize_shift as i32,
            sig: shifted << normalize_shift,
        };
    }

    if biased_exp == MAX_BIASED_EXP {
        if encoded_frac == 0 {
            return Unpacked { class: Class::Infinity, sign, exp: 0, sig: 0 };
        }
        let msb_mask = 1u128 << (FRAC_BITS - 1);
        let signaling = is_snan_frac(encoded_frac, msb_mask, status.policy.snan_convention);
        return Unpacked {
            class: if signaling { Class::SignalingNan } else { Class::QuietNan },
            sign,
            exp: 0,
            sig: encoded_frac << FRAC_SHIFT,
        };
    }

    let exp = biased_exp as i32 - BIAS;
    Unpacked { class: Class::Normal, sign, exp, sig: (IMPLICIT_ONE | encoded_frac) << FRAC_SHIFT }
}

fn pack(u: Unpacked, status: &mut FloatStatus) -> Bits {
    match u.class {
        Class::Zero => zero_bits(u.sign),
        Class::Infinity => infinity_bits(u.sign),
        Class::QuietNan | Class::SignalingNan => {
            let encoded = (u.sig >> FRAC_SHIFT).max(1);
            pack_raw(u.sign, MAX_BIASED_EXP, encoded)
        }
        Class::Normal => round_and_pack_normal(u.sign, u.exp, u.sig, status),
    }
}

fn round_and_pack_normal(sign: bool, exp: i32, frac: u128, status: &mut FloatStatus) -> Bits {
    debug_assert_ne!(frac, 0);
    let round_mask = ROUND_MASK;
    let round_bits = frac & round_mask;
    let half_ulp = HALF_ULP;

    if exp < 1 - BIAS {
        return round_and_pack_subnormal(sign, exp, frac, status);
    }

    let round_up = match status.rounding_mode {
        RoundingMode::NearestEven => round_bits > half_ulp || (round_bits == half_ulp && (frac >> FRAC_SHIFT) & 1 != 0),
        RoundingMode::NearestAway => round_bits >= half_ulp,
        RoundingMode::TowardZero => false,
        RoundingMode::Upward => round_bits != 0 && !sign,
        RoundingMode::Downward => round_bits != 0 && sign,
        RoundingMode::ToOdd => false,
    };

    let mut mantissa = frac >> FRAC_SHIFT;
    if round_up {
        mantissa += 1;
    } else if status.rounding_mode == RoundingMode::ToOdd && round_bits != 0 {
        mantissa |= 1;
    }

    let inexact = round_bits != 0;
    let mut biased_exp = exp + BIAS;

    if mantissa == IMPLICIT_ONE << 1 {
        mantissa >>= 1;
        biased_exp += 1;
    }

    if biased_exp as u32 >= MAX_BIASED_EXP {
        status.raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
        if status.rounding_mode.overflows_to_infinity(sign) {
            return infinity_bits(sign);
        }
        return pack_raw(sign, MAX_BIASED_EXP - 1, IMPLICIT_ONE - 1);
    }

    if inexact {
        status.raise(ExceptionFlags::INEXACT);
    }
    pack_raw(sign, biased_exp as u32, mantissa)
}

fn round_and_pack_subnormal(sign: bool, exp: i32, frac: u128, status: &mut FloatStatus) -> Bits {
    if status.flush_to_zero {
        status.raise(ExceptionFlags::UNDERFLOW | ExceptionFlags::INEXACT);
        return zero_bits(sign);
    }
    let extra_shift = ((1 - BIAS) - exp) as u32;
    let shifted = shift_right_jamming_u128(frac, extra_shift);
    let round_bits = shifted & ROUND_MASK;
    let half_ulp = HALF_ULP;
    let mantissa_before_round = shifted >> FRAC_SHIFT;

    let round_up = match status.rounding_mode {
        RoundingMode::NearestEven => round_bits > half_ulp || (round_bits == half_ulp && mantissa_before_round & 1 != 0),
        RoundingMode::NearestAway => round_bits >= half_ulp,
        RoundingMode::TowardZero => false,
        RoundingMode::Upward => round_bits != 0 && !sign,
        RoundingMode::Downward => round_bits != 0 && sign,
        RoundingMode::ToOdd => false,
    };

    let mut mantissa = mantissa_before_round;
    if round_up {
        mantissa += 1;
    } else if status.rounding_mode == RoundingMode::ToOdd && round_bits != 0 {
        mantissa |= 1;
    }

    if round_bits != 0 {
        status.raise(ExceptionFlags::UNDERFLOW | ExceptionFlags::INEXACT | ExceptionFlags::OUTPUT_DENORMAL);
    } else if mantissa != 0 && mantissa < IMPLICIT_ONE {
        status.raise(ExceptionFlags::OUTPUT_DENORMAL);
    }

    if mantissa == IMPLICIT_ONE {
        return pack_raw(sign, 1, 0);
    }
    pack_raw(sign, 0, mantissa)
}

fn shift_right_jamming_u128(x: u128, n: u32) -> u128 {
    if n == 0 {
        x
    } else if n >= 128 {
        u128::from(x != 0)
    } else {
        let shifted = x >> n;
        let dropped = (x << (128 - n)) != 0;
        shifted | u128::from(dropped)
    }
}

fn nan_result(a: Unpacked, b: Unpacked, status: &mut FloatStatus) -> Unpacked {
    let policy = status.policy;
    match crate::nan::choose_nan(
        a.is_nan(),
        a.class == Class::SignalingNan,
        b.is_nan(),
        b.class == Class::SignalingNan,
        a.sig.cmp(&b.sig),
        status,
        &policy,
    ) {
        NanChoice::A => quiet(a, &policy),
        NanChoice::B => quiet(b, &policy),
        NanChoice::Default => default_nan_unpacked(&policy),
    }
}

/// `a + b`.
#[must_use]
pub fn add(a: Bits, b: Bits, status: &mut FloatStatus) -> Bits {
    compute_add(a, b, false, status)
}

/// `a - b`.
#[must_use]
pub fn sub(a: Bits, b: Bits, status: &mut FloatStatus) -> Bits {
    compute_add(a, b, true, status)
}

fn compute_add(a: Bits, b: Bits, subtract: bool, status: &mut FloatStatus) -> Bits {
    let a = unpack(a, status);
    let mut b = unpack(b, status);
    if subtract {
        b.sign = !b.sign;
    }

    if a.is_nan() || b.is_nan() {
        return pack(nan_result(a, b, status), status);
    }
    let a_inf = a.class == Class::Infinity;
    let b_inf = b.class == Class::Infinity;
    if a_inf || b_inf {
        if a_inf && b_inf {
            if a.sign == b.sign {
                return infinity_bits(a.sign);
            }
            status.raise(ExceptionFlags::INVALID);
            return pack(default_nan_unpacked(&status.policy), status);
        }
        return infinity_bits(if a_inf { a.sign } else { b.sign });
    }
    if a.class == Class::Zero && b.class == Class::Zero {
        if a.sign == b.sign {
            return zero_bits(a.sign);
        }
        return zero_bits(status.rounding_mode == RoundingMode::Downward);
    }
    if a.class == Class::Zero {
        return pack(b, status);
    }
    if b.class == Class::Zero {
        return pack(a, status);
    }

    if a.sign == b.sign {
        add_same_sign(a, b, status)
    } else {
        add_diff_sign(a, b, status)
    }
}

fn add_same_sign(a: Unpacked, b: Unpacked, status: &mut FloatStatus) -> Bits {
    let (hi, lo) = if a.exp >= b.exp { (a, b) } else { (b, a) };
    let exp_diff = (hi.exp - lo.exp) as u32;
    let lo_sig = shift_right_jamming_u128(lo.sig, exp_diff);

    let sum = hi.sig + lo_sig;
    if sum >> (LEAD + 1) != 0 {
        let sticky = sum & 1;
        round_and_pack_normal(hi.sign, hi.exp + 1, (sum >> 1) | sticky, status)
    } else {
        round_and_pack_normal(hi.sign, hi.exp, sum, status)
    }
}

fn add_diff_sign(a: Unpacked, b: Unpacked, status: &mut FloatStatus) -> Bits {
    let (hi, lo, result_sign) = if a.exp > b.exp || (a.exp == b.exp && a.sig >= b.sig) {
        (a, b, a.sign)
    } else {
        (b, a, b.sign)
    };
    let exp_diff = (hi.exp - lo.exp) as u32;
    let lo_sig = shift_right_jamming_u128(lo.sig, exp_diff);

    let diff = hi.sig - lo_sig;
    if diff == 0 {
        return zero_bits(status.rounding_mode == RoundingMode::Downward);
    }
    let shift = diff.leading_zeros() - (127 - LEAD);
    round_and_pack_normal(result_sign, hi.exp - shift as i32, diff << shift, status)
}

fn square_u128_to_256(x: u128) -> (u128, u128) {
    let xhi = (x >> 64) as u64;
    let xlo = x as u64;
    let (z3, z2, z1, z0) = primitives::mul128_to_256(xhi, xlo, xhi, xlo);
    ((u128::from(z3) << 64) | u128::from(z2), (u128::from(z1) << 64) | u128::from(z0))
}

fn mul_u128_to_256(a: u128, b: u128) -> (u128, u128) {
    let ahi = (a >> 64) as u64;
    let alo = a as u64;
    let bhi = (b >> 64) as u64;
    let blo = b as u64;
    let (z3, z2, z1, z0) = primitives::mul128_to_256(ahi, alo, bhi, blo);
    ((u128::from(z3) << 64) | u128::from(z2), (u128::from(z1) << 64) | u128::from(z0))
}

fn shl_u128_to_256(x: u128, n: u32) -> (u128, u128) {
    if n == 0 {
        (0, x)
    } else {
        (x >> (128 - n), x << n)
    }
}

/// `a * b`.
#[must_use]
pub fn mul(a: Bits, b: Bits, status: &mut FloatStatus) -> Bits {
    let a = unpack(a, status);
    let b = unpack(b, status);
    if a.is_nan() || b.is_nan() {
        return pack(nan_result(a, b, status), status);
    }

    let sign = a.sign != b.sign;
    let a_inf = a.class == Class::Infinity;
    let b_inf = b.class == Class::Infinity;
    let a_zero = a.class == Class::Zero;
    let b_zero = b.class == Class::Zero;

    if (a_inf && b_zero) || (b_inf && a_zero) {
        status.raise(ExceptionFlags::INVALID);
        return pack(default_nan_unpacked(&status.policy), status);
    }
    if a_inf || b_inf {
        return infinity_bits(sign);
    }
    if a_zero || b_zero {
        return zero_bits(sign);
    }

    let (prod_hi, prod_lo) = mul_u128_to_256(a.sig, b.sig);
    let exp = a.exp + b.exp;
    // Operands have their leading one at bit LEAD, so the exact product's
    // leading one sits at bit `2*LEAD` or `2*LEAD + 1` of the 256-bit
    // product; extract the top `LEAD + 1` bits as the new significand and
    // jam everything else into the bottom guard bit.
    let top_bit_at_2lead_plus_1 = prod_hi >> (2 * LEAD + 1 - 128) != 0;
    let shift = if top_bit_at_2lead_plus_1 { 2 * LEAD + 1 - LEAD } else { 2 * LEAD - LEAD };
    let (frac, sticky) = shr256_keep_low128_jammed(prod_hi, prod_lo, shift);
    let extra_exp = u32::from(top_bit_at_2lead_plus_1);
    round_and_pack_normal(sign, exp + extra_exp as i32, frac | u128::from(sticky), status)
}

/// Shifts a 256-bit value (`hi`, `lo`) right by `n` bits (`n` within the
/// width of `lo` plus a little slack from `hi`), returning the low 128
/// bits of the result plus whether anything nonzero was dropped.
fn shr256_keep_low128_jammed(hi: u128, lo: u128, n: u32) -> (u128, bool) {
    if n == 0 {
        return (lo, false);
    }
    let dropped = if n >= 128 { lo != 0 } else { (lo << (128 - n)) != 0 };
    let new_lo = if n >= 128 {
        if n >= 256 { 0 } else { hi >> (n - 128) }
    } else {
        (hi << (128 - n)) | (lo >> n)
    };
    (new_lo, dropped)
}

/// `a / b`.
#[must_use]
pub fn div(a: Bits, b: Bits, status: &mut FloatStatus) -> Bits {
    let a = unpack(a, status);
    let b = unpack(b, status);
    if a.is_nan() || b.is_nan() {
        return pack(nan_result(a, b, status), status);
    }

    let sign = a.sign != b.sign;
    let a_inf = a.class == Class::Infinity;
    let b_inf = b.class == Class::Infinity;
    let a_zero = a.class == Class::Zero;
    let b_zero = b.class == Class::Zero;

    if (a_inf && b_inf) || (a_zero && b_zero) {
        status.raise(ExceptionFlags::INVALID);
        return pack(default_nan_unpacked(&status.policy), status);
    }
    if a_inf || b_zero {
        if b_zero && !a_inf {
            status.raise(ExceptionFlags::DIVIDE_BY_ZERO);
        }
        return infinity_bits(sign);
    }
    if a_zero || b_inf {
        return zero_bits(sign);
    }

    let mut num = a.sig;
    let den = b.sig;
    let mut exp = a.exp - b.exp;
    if num < den {
        num <<= 1;
        exp -= 1;
    }

    // Bit-serial restoring division: both operands fit comfortably within
    // a u128 (leading one at bit LEAD, far short of bit 127), so the
    // remainder never needs more than one extra bit of headroom per step.
    let mut rem = num;
    let mut quotient: u128 = 0;
    for _ in 0..=LEAD {
        let bit = u128::from(rem >= den);
        if bit == 1 {
            rem -= den;
        }
        quotient = (quotient << 1) | bit;
        rem <<= 1;
    }
    let sticky = u128::from(rem != 0);
    round_and_pack_normal(sign, exp, quotient | sticky, status)
}

/// `sqrt(a)`.
#[must_use]
pub fn sqrt(a: Bits, status: &mut FloatStatus) -> Bits {
    let a = unpack(a, status);
    if a.is_nan() {
        return pack(quiet_and_flag(a, status), status);
    }
    if a.class == Class::Zero || a.class == Class::Infinity {
        if a.sign && a.class == Class::Zero {
            return pack(a, status);
        }
        if a.class == Class::Infinity && a.sign {
            status.raise(ExceptionFlags::INVALID);
            return pack(default_nan_unpacked(&status.policy), status);
        }
        return pack(a, status);
    }
    if a.sign {
        status.raise(ExceptionFlags::INVALID);
        return pack(default_nan_unpacked(&status.policy), status);
    }

    let exp_odd = a.exp.rem_euclid(2) != 0;
    let shift = if exp_odd { LEAD } else { LEAD + 1 };
    let (x_hi, x_lo) = shl_u128_to_256(a.sig, shift);
    let root = isqrt_u256(x_hi, x_lo);
    let (sq_hi, sq_lo) = square_u128_to_256(root);
    let inexact = (sq_hi, sq_lo) != (x_hi, x_lo);
    let exp = if exp_odd { (a.exp - 1) / 2 } else { a.exp / 2 };
    round_and_pack_normal(false, exp, root | u128::from(inexact), status)
}

fn quiet_and_flag(a: Unpacked, status: &mut FloatStatus) -> Unpacked {
    if a.class == Class::SignalingNan {
        status.raise(ExceptionFlags::INVALID);
    }
    quiet(a, &status.policy)
}

/// Largest `r` with `r * r <= (hi, lo)`, found by binary search over the
/// 128-bit root space using the exact 256-bit squaring comparison — a
/// deliberately simple substitute for Berkeley SoftFloat's Newton-seeded
/// `estimateSqrt32` refinement, avoided here because a native `u256` type
/// isn't available to host the refinement's intermediate product.
fn isqrt_u256(target_hi: u128, target_lo: u128) -> u128 {
    if target_hi == 0 && target_lo == 0 {
        return 0;
    }
    let mut lo: u128 = 0;
    let mut hi: u128 = u128::MAX;
    while lo < hi {
        let mid = lo + (hi - lo) / 2 + 1;
        let (shi, slo) = square_u128_to_256(mid);
        if (shi, slo) <= (target_hi, target_lo) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// IEEE remainder of `a` and `b`.
#[must_use]
pub fn rem(a: Bits, b: Bits, status: &mut FloatStatus) -> Bits {
    let a = unpack(a, status);
    let b = unpack(b, status);
    if a.is_nan() || b.is_nan() {
        return pack(nan_result(a, b, status), status);
    }
    if a.class == Class::Infinity || b.class == Class::Zero {
        status.raise(ExceptionFlags::INVALID);
        return pack(default_nan_unpacked(&status.policy), status);
    }
    if b.class == Class::Infinity || a.class == Class::Zero {
        return pack(a, status);
    }

    // `cur_exp` only ever decreases toward `b.exp`, so the loop below requires
    // `a.exp >= b.exp` to terminate. When `a.exp < b.exp`, `|a| < |b|`
    // unconditionally, so handle it directly instead.
    if a.exp < b.exp {
        if a.exp + 1 < b.exp || a.sig < b.sig {
            return pack(a, status);
        }
        if a.sig == b.sig {
            return pack(a, status);
        }
        let mag = 2 * b.sig - a.sig;
        if mag == 0 {
            return zero_bits(a.sign);
        }
        let shift = mag.leading_zeros() - (127 - LEAD);
        return round_and_pack_normal(!a.sign, a.exp - shift as i32, mag << shift, status);
    }

    let mut cur = a.sig;
    let mut cur_exp = a.exp;
    let mut last_bit_subtracted = false;
    loop {
        let subtract = cur >= b.sig;
        if subtract {
            cur -= b.sig;
        }
        last_bit_subtracted = subtract;
        if cur_exp == b.exp {
            break;
        }
        cur <<= 1;
        cur_exp -= 1;
    }

    let doubled = cur * 2;
    let use_next = doubled > b.sig || (doubled == b.sig && last_bit_subtracted);
    let (mag, sign_flip) = if use_next { (b.sig - cur, true) } else { (cur, false) };

    if mag == 0 {
        return zero_bits(a.sign);
    }
    let shift = mag.leading_zeros() - (127 - LEAD);
    round_and_pack_normal(if sign_flip { !a.sign } else { a.sign }, b.exp - shift as i32, mag << shift, status)
}

/// Signaling comparison.
#[must_use]
pub fn compare_signaling(a: Bits, b: Bits, status: &mut FloatStatus) -> FloatRelation {
    compare(a, b, status, true)
}

/// Quiet comparison.
#[must_use]
pub fn compare_quiet(a: Bits, b: Bits, status: &mut FloatStatus) -> FloatRelation {
    compare(a, b, status, false)
}

fn compare(a: Bits, b: Bits, status: &mut FloatStatus, always_invalid: bool) -> FloatRelation {
    let a = unpack(a, status);
    let b = unpack(b, status);
    if a.is_nan() || b.is_nan() {
        let any_signaling = a.class == Class::SignalingNan || b.class == Class::SignalingNan;
        if any_signaling || always_invalid {
            status.raise(ExceptionFlags::INVALID);
        }
        return FloatRelation::Unordered;
    }

    let a_zero = a.class == Class::Zero;
    let b_zero = b.class == Class::Zero;
    if a_zero && b_zero {
        return FloatRelation::Equal;
    }
    if a.sign != b.sign {
        return if a.sign { FloatRelation::Less } else { FloatRelation::Greater };
    }
    let magnitude = (a.exp, a.sig).cmp(&(b.exp, b.sig));
    let ordering = if a.sign { magnitude.reverse() } else { magnitude };
    match ordering {
        std::cmp::Ordering::Less => FloatRelation::Less,
        std::cmp::Ordering::Equal => FloatRelation::Equal,
        std::cmp::Ordering::Greater => FloatRelation::Greater,
    }
}

/// `a * 2^n`.
#[must_use]
pub fn scalbn(a: Bits, n: i32, status: &mut FloatStatus) -> Bits {
    let mut u = unpack(a, status);
    if u.class == Class::Normal {
        u.exp = u.exp.saturating_add(n);
    }
    pack(u, status)
}

/// Rounds `a` to an integral value, represented as an `f128` value.
#[must_use]
pub fn round_to_int(a: Bits, exact: bool, status: &mut FloatStatus) -> Bits {
    let u = unpack(a, status);
    if u.is_nan() {
        return pack(quiet_and_flag(u, status), status);
    }
    if u.class != Class::Normal || u.exp >= LEAD as i32 {
        return pack(u, status);
    }
    if u.exp < 0 {
        let exact_half = u.exp == -1 && u.sig == 1 << LEAD;
        let round_up = match status.rounding_mode {
            RoundingMode::NearestEven => u.exp == -1 && !exact_half,
            RoundingMode::NearestAway => u.exp == -1,
            RoundingMode::TowardZero => false,
            RoundingMode::Upward => !u.sign,
            RoundingMode::Downward => u.sign,
            RoundingMode::ToOdd => false,
        };
        if exact {
            status.raise(ExceptionFlags::INEXACT);
        }
        return if round_up { pack_raw(u.sign, BIAS as u32, IMPLICIT_ONE) } else { zero_bits(u.sign) };
    }

    let drop = (LEAD as i32 - u.exp) as u32;
    let round_mask = (1u128 << drop) - 1;
    let round_bits = u.sig & round_mask;
    if round_bits == 0 {
        return pack(u, status);
    }
    if exact {
        status.raise(ExceptionFlags::INEXACT);
    }
    let half_ulp = 1u128 << (drop - 1);
    let round_up = match status.rounding_mode {
        RoundingMode::NearestEven => round_bits > half_ulp || (round_bits == half_ulp && (u.sig >> drop) & 1 != 0),
        RoundingMode::NearestAway => round_bits >= half_ulp,
        RoundingMode::TowardZero => false,
        RoundingMode::Upward => !u.sign,
        RoundingMode::Downward => u.sign,
        RoundingMode::ToOdd => false,
    };
    let truncated = u.sig & !round_mask;
    if round_up {
        let bumped = truncated + (1u128 << drop);
        if bumped >> (LEAD + 1) != 0 {
            return pack(Unpacked { sig: 1 << LEAD, exp: u.exp + 1, ..u }, status);
        }
        return pack(Unpacked { sig: bumped, ..u }, status);
    }
    pack(Unpacked { sig: truncated, ..u }, status)
}

/// Converts a signed 64-bit integer to the nearest representable `f128`
/// value (always exact).
#[must_use]
pub fn from_i64(v: i64) -> Bits {
    if v == 0 {
        return zero_bits(false);
    }
    let sign = v < 0;
    let magnitude = u128::from(v.unsigned_abs());
    let shift = magnitude.leading_zeros() - (127 - LEAD);
    pack_raw(sign, (BIAS + LEAD as i32 - shift as i32) as u32, magnitude << shift)
}

/// Converts to a signed 64-bit integer, saturating and raising `INVALID`
/// on NaN, infinity, or out-of-range magnitude.
#[must_use]
pub fn to_i64(a: Bits, status: &mut FloatStatus) -> i64 {
    let u = unpack(a, status);
    if u.is_nan() || u.class == Class::Infinity {
        status.raise(ExceptionFlags::INVALID);
        return if u.sign { i64::MIN } else { i64::MAX };
    }
    if u.class == Class::Zero || u.exp < 0 {
        return 0;
    }
    if u.exp >= 63 {
        status.raise(ExceptionFlags::INVALID);
        return if u.sign { i64::MIN } else { i64::MAX };
    }
    let drop = (LEAD as i32 - u.exp) as u32;
    let magnitude = (u.sig >> drop) as u64;
    if u.sign {
        if magnitude > i64::MIN.unsigned_abs() {
            status.raise(ExceptionFlags::INVALID);
            return i64::MIN;
        }
        (magnitude as i64).wrapping_neg()
    } else {
        if magnitude > i64::MAX as u64 {
            status.raise(ExceptionFlags::INVALID);
            return i64::MAX;
        }
        magnitude as i64
    }
}

/// Converts a binary64 value up to `f128`. Always exact.
#[must_use]
pub fn from_f64(a: u64, status: &mut FloatStatus) -> Bits {
    let p = crate::parts::unpack(a, &crate::format::F64, status);
    let u = match p.class {
        crate::parts::FloatClass::Zero => Unpacked { class: Class::Zero, sign: p.sign, exp: 0, sig: 0 },
        crate::parts::FloatClass::Infinity => Unpacked { class: Class::Infinity, sign: p.sign, exp: 0, sig: 0 },
        crate::parts::FloatClass::QuietNan | crate::parts::FloatClass::SignalingNan => Unpacked {
            class: if p.class == crate::parts::FloatClass::SignalingNan { Class::SignalingNan } else { Class::QuietNan },
            sign: p.sign,
            exp: 0,
            sig: u128::from(p.frac) << (LEAD - 62),
        },
        crate::parts::FloatClass::Normal => {
            Unpacked { class: Class::Normal, sign: p.sign, exp: p.exp, sig: u128::from(p.frac) << (LEAD - 62) }
        }
    };
    pack(u, status)
}

/// Converts `f128` down to binary64, rounding as needed.
#[must_use]
pub fn to_f64(a: Bits, status: &mut FloatStatus) -> u64 {
    let u = unpack(a, status);
    let p = match u.class {
        Class::Zero => crate::parts::FloatParts::zero(u.sign),
        Class::Infinity => crate::parts::FloatParts::infinity(u.sign),
        Class::QuietNan | Class::SignalingNan => crate::parts::FloatParts {
            class: if u.class == Class::SignalingNan {
                crate::parts::FloatClass::SignalingNan
            } else {
                crate::parts::FloatClass::QuietNan
            },
            sign: u.sign,
            exp: 0,
            frac: shift_right_jamming_u128(u.sig, LEAD - 62) as u64,
        },
        Class::Normal => crate::parts::FloatParts {
            class: crate::parts::FloatClass::Normal,
            sign: u.sign,
            exp: u.exp,
            frac: shift_right_jamming_u128(u.sig, LEAD - 62) as u64,
        },
    };
    crate::parts::round_and_pack(p, &crate::format::F64, status)
}

/// Flushes a subnormal `a` to a same-signed zero when
/// `status.flush_inputs_to_zero` is set; otherwise a no-op.
#[must_use]
pub fn squash_input_denormal(a: Bits, status: &mut FloatStatus) -> Bits {
    let u = unpack(a, status);
    match u.class {
        Class::Normal | Class::Zero => pack(u, status),
        _ => a,
    }
}

/// True if `a` encodes a signaling NaN under `policy`'s convention.
#[must_use]
pub fn is_signaling_nan(a: Bits, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, &mut scratch).class == Class::SignalingNan
}

/// True if `a` encodes a quiet NaN under `policy`'s convention.
#[must_use]
pub fn is_quiet_nan(a: Bits, policy: &TargetPolicy) -> bool {
    let mut scratch = FloatStatus::with_policy(*policy);
    unpack(a, &mut scratch).class == Class::QuietNan
}

/// Quiets a signaling NaN's payload; any other value is unchanged.
#[must_use]
pub fn silence_nan(a: Bits, policy: &TargetPolicy) -> Bits {
    let mut scratch = FloatStatus::with_policy(*policy);
    let u = unpack(a, &mut scratch);
    pack(quiet(u, policy), &mut scratch)
}

/// The default (non-payload-propagating) quiet NaN for `policy`.
#[must_use]
pub fn default_nan(policy: &TargetPolicy) -> Bits {
    let u = default_nan_unpacked(policy);
    pack_raw(u.sign, MAX_BIASED_EXP, (u.sig >> FRAC_SHIFT).max(1))
}
