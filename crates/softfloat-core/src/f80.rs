//! Native 80-bit extended precision (x87-style). `spec.md` §3.3: no shared
//! canonical struct. Each operation unpacks sign/exponent/significand into
//! local variables, computes with [`crate::primitives`]'s 128-bit helpers,
//! and repacks directly rather than going through [`crate::parts::FloatParts`]
//! (whose 64-bit significand has only two bits of headroom above its
//! leading one — not enough room for f80's own full-width 64-bit explicit
//! significand to carry during addition).
//!
//! Grounded in `softfloat.c`'s `floatx80_add`/`_mul`/`_div`/`_sqrt`/`_rem`
//! family and `roundAndPackFloatx80`.

use crate::nan::{self, NanChoice};
use crate::policy::{DefaultNanPattern, SnanConvention, TargetPolicy};
use crate::primitives;
use crate::status::{ExceptionFlags, F80RoundingPrecision, FloatStatus, RoundingMode};

/// Unbiased exponent field width.
pub const EXP_BITS: u32 = 15;
/// Exponent bias.
pub const BIAS: i32 = 0x3FFF;
/// Maximum biased exponent (encodes Inf/NaN).
pub const MAX_EXP: u16 = 0x7FFF;

/// The raw 80-bit encoding: a 64-bit significand (explicit integer bit at
/// bit 63) plus a 16-bit sign+exponent word. Same layout Berkeley SoftFloat
/// and the x87 `FLD`/`FSTP` instructions use natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bits {
    /// Sign in bit 15, biased exponent in bits 14:0.
    pub signexp: u16,
    /// Significand, with the explicit integer bit at bit 63.
    pub sig: u64,
}

impl Bits {
    /// Builds a raw encoding from its fields.
    #[must_use]
    pub const fn new(signexp: u16, sig: u64) -> Self {
        Self { signexp, sig }
    }

    #[must_use]
    const fn sign(self) -> bool {
        self.signexp & 0x8000 != 0
    }

    #[must_use]
    const fn biased_exp(self) -> u16 {
        self.signexp & 0x7FFF
    }

    #[must_use]
    const fn int_bit(self) -> bool {
        self.sig & (1 << 63) != 0
    }
}

const fn pack_raw(sign: bool, biased_exp: u16, sig: u64) -> Bits {
    Bits {
        signexp: ((sign as u16) << 15) | (biased_exp & 0x7FFF),
        sig,
    }
}

#[must_use]
fn zero_bits(sign: bool) -> Bits {
    pack_raw(sign, 0, 0)
}

#[must_use]
fn infinity_bits(sign: bool) -> Bits {
    pack_raw(sign, MAX_EXP, 1 << 63)
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
    sig: u64,
}

impl Unpacked {
    const fn is_nan(self) -> bool {
        matches!(self.class, Class::QuietNan | Class::SignalingNan)
    }
}

fn default_nan_unpacked(policy: &TargetPolicy) -> Unpacked {
    let int_bit = 1u64 << 63;
    let quiet_bit = 1u64 << 62;
    let (sign, sig) = match policy.default_nan_pattern {
        DefaultNanPattern::AllFractionBits => (false, u64::MAX),
        DefaultNanPattern::SignAndMsb | DefaultNanPattern::Ieee754Default => {
            (true, int_bit | quiet_bit)
        }
        DefaultNanPattern::MsbMinusOne => (false, int_bit | (u64::MAX >> 2)),
    };
    Unpacked {
        class: Class::QuietNan,
        sign,
        exp: 0,
        sig,
    }
}

fn silence(u: Unpacked, convention: SnanConvention) -> Unpacked {
    let quiet_bit = 1u64 << 62;
    let sig = match convention {
        SnanConvention::Ieee754_2008 => u.sig | quiet_bit,
        SnanConvention::BitIsOne => u.sig & !quiet_bit,
    };
    Unpacked {
        class: Class::QuietNan,
        sig,
        ..u
    }
}

/// Unpacks a raw encoding, detecting the "pseudo-denormal" and "unnormal"
/// invalid encodings `spec.md` §7/§9 calls out and substituting the default
/// NaN for them (raising `INVALID`), rather than attempting Intel's
/// historical "unsupported" semantics.
fn unpack(a: Bits, status: &mut FloatStatus) -> Unpacked {
    let sign = a.sign();
    let biased = a.biased_exp();
    let int_bit = a.int_bit();

    if biased == 0 {
        if a.sig == 0 {
            return Unpacked { class: Class::Zero, sign, exp: 0, sig: 0 };
        }
        if int_bit {
            status.raise(ExceptionFlags::INVALID);
            return default_nan_unpacked(&status.policy);
        }
        return Unpacked { class: Class::Normal, sign, exp: 1 - BIAS, sig: a.sig };
    }

    if biased == MAX_EXP {
        if !int_bit {
            status.raise(ExceptionFlags::INVALID);
            return default_nan_unpacked(&status.policy);
        }
        if a.sig == 1 << 63 {
            return Unpacked { class: Class::Infinity, sign, exp: 0, sig: 0 };
        }
        let signaling = nan::is_snan_frac(a.sig, 1 << 62, status.policy.snan_convention);
        return Unpacked {
            class: if signaling { Class::SignalingNan } else { Class::QuietNan },
            sign,
            exp: 0,
            sig: a.sig,
        };
    }

    if !int_bit {
        status.raise(ExceptionFlags::INVALID);
        return default_nan_unpacked(&status.policy);
    }
    Unpacked { class: Class::Normal, sign, exp: i32::from(biased) - BIAS, sig: a.sig }
}

fn nan_result(a: Unpacked, b: Unpacked, status: &mut FloatStatus) -> Unpacked {
    let policy = status.policy;
    match nan::choose_nan(
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

fn quiet(u: Unpacked, policy: &TargetPolicy) -> Unpacked {
    if u.class == Class::SignalingNan {
        silence(u, policy.snan_convention)
    } else {
        u
    }
}

fn pack(u: Unpacked, status: &mut FloatStatus) -> Bits {
    match u.class {
        Class::Zero => zero_bits(u.sign),
        Class::Infinity => infinity_bits(u.sign),
        Class::QuietNan | Class::SignalingNan => pack_raw(u.sign, MAX_EXP, u.sig.max(1 << 63 | 1)),
        Class::Normal => round_and_pack(u.sign, u.exp, u.sig, 0, status),
    }
}

/// Rounds a pre-normalized significand (`sig0`: 64 bits with the leading
/// one fixed at bit 63; `sig1`: bits that would continue below bit 0 of
/// `sig0`, used as the round/sticky source) and packs it into `format`.
/// `f80_rounding_precision` narrower than extended is honored by a second,
/// explicit re-rounding pass over the already-rounded 64-bit significand,
/// per `spec.md` §16's "SUPPLEMENT" note on `roundingPrecision`.
fn round_and_pack(sign: bool, mut exp: i32, sig0: u64, sig1: u64, status: &mut FloatStatus) -> Bits {
    let half = 1u64 << 63;
    let round_up = match status.rounding_mode {
        RoundingMode::NearestEven => sig1 > half || (sig1 == half && sig0 & 1 != 0),
        RoundingMode::NearestAway => sig1 >= half,
        RoundingMode::TowardZero => false,
        RoundingMode::Upward => sig1 != 0 && !sign,
        RoundingMode::Downward => sig1 != 0 && sign,
        RoundingMode::ToOdd => false,
    };

    let mut mantissa = sig0;
    if round_up {
        let (m, carried) = mantissa.overflowing_add(1);
        mantissa = m;
        if carried {
            mantissa = 1 << 63;
            exp += 1;
        }
    } else if status.rounding_mode == RoundingMode::ToOdd && sig1 != 0 {
        mantissa |= 1;
    }

    let mut inexact = sig1 != 0;
    if let Some(precision) = match status.f80_rounding_precision {
        F80RoundingPrecision::Single => Some(24),
        F80RoundingPrecision::Double => Some(53),
        F80RoundingPrecision::Extended => None,
    } {
        let (narrowed, narrow_carried, narrow_inexact) =
            narrow_precision(mantissa, 64 - precision, sign, status.rounding_mode);
        mantissa = narrowed;
        inexact |= narrow_inexact;
        if narrow_carried {
            exp += 1;
        }
    }

    if inexact {
        status.raise(ExceptionFlags::INEXACT);
    }

    if exp - BIAS >= i32::from(MAX_EXP) {
        status.raise(ExceptionFlags::OVERFLOW);
        if status.rounding_mode.overflows_to_infinity(sign) {
            return infinity_bits(sign);
        }
        return pack_raw(sign, MAX_EXP - 1, u64::MAX);
    }
    if exp <= 1 - BIAS {
        return round_pack_subnormal(sign, exp, mantissa, status);
    }
    pack_raw(sign, (exp + BIAS) as u16, mantissa)
}

/// Re-rounds an already-64-bit-rounded significand down to `drop` fewer
/// bits of precision, returning `(mantissa, carried_into_exponent, inexact)`.
fn narrow_precision(sig: u64, drop: u32, sign: bool, mode: RoundingMode) -> (u64, bool, bool) {
    if drop == 0 {
        return (sig, false, false);
    }
    let round_mask = (1u64 << drop) - 1;
    let half_ulp = 1u64 << (drop - 1);
    let round_bits = sig & round_mask;
    let kept = sig & !round_mask;

    let round_up = match mode {
        RoundingMode::NearestEven => {
            round_bits > half_ulp || (round_bits == half_ulp && (kept >> drop) & 1 != 0)
        }
        RoundingMode::NearestAway => round_bits >= half_ulp,
        RoundingMode::TowardZero => false,
        RoundingMode::Upward => round_bits != 0 && !sign,
        RoundingMode::Downward => round_bits != 0 && sign,
        RoundingMode::ToOdd => false,
    };

    let mut mantissa = kept;
    let mut carried = false;
    if round_up {
        let (m, c) = mantissa.overflowing_add(1u64 << drop);
        mantissa = m;
        carried = c;
        if carried {
            mantissa = 1 << 63;
        }
    } else if mode == RoundingMode::ToOdd && round_bits != 0 {
        mantissa |= 1 << drop;
    }
    (mantissa, carried, round_bits != 0)
}

fn round_pack_subnormal(sign: bool, exp: i32, sig: u64, status: &mut FloatStatus) -> Bits {
    if status.flush_to_zero {
        status.raise(ExceptionFlags::UNDERFLOW | ExceptionFlags::INEXACT);
        return zero_bits(sign);
    }
    let shift = (1 - BIAS - exp) as u32;
    let shifted = primitives::shift_right_jamming(sig, shift);
    if shifted != 0 {
        status.raise(ExceptionFlags::UNDERFLOW | ExceptionFlags::OUTPUT_DENORMAL);
    }
    // The shifted significand may have rounded back up to the implicit
    // one; biased exponent 1 encodes exactly that boundary value.
    if shifted & (1 << 63) != 0 {
        return pack_raw(sign, 1, shifted);
    }
    pack_raw(sign, 0, shifted)
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
    if a.class == Class::Infinity || b.class == Class::Infinity {
        let a_inf = a.class == Class::Infinity;
        let b_inf = b.class == Class::Infinity;
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
    let lo_sig = primitives::shift_right_jamming(lo.sig, exp_diff);

    let sum = u128::from(hi.sig) + u128::from(lo_sig);
    if sum >> 64 != 0 {
        let sticky = (sum & 1) as u64;
        round_and_pack(hi.sign, hi.exp + 1, (sum >> 1) as u64, sticky << 63, status)
    } else {
        round_and_pack(hi.sign, hi.exp, sum as u64, 0, status)
    }
}

fn add_diff_sign(a: Unpacked, b: Unpacked, status: &mut FloatStatus) -> Bits {
    let (hi, lo, result_sign) = if a.exp > b.exp || (a.exp == b.exp && a.sig >= b.sig) {
        (a, b, a.sign)
    } else {
        (b, a, b.sign)
    };
    let exp_diff = (hi.exp - lo.exp) as u32;
    let lo_sig = primitives::shift_right_jamming(lo.sig, exp_diff);

    let diff = hi.sig - lo_sig;
    if diff == 0 {
        return zero_bits(status.rounding_mode == RoundingMode::Downward);
    }
    let shift = primitives::count_leading_zeros_64(diff);
    round_and_pack(result_sign, hi.exp - shift as i32, diff << shift, 0, status)
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

    let (hi, lo) = primitives::mul64_to_128(a.sig, b.sig);
    let exp = a.exp + b.exp;
    if hi >> 63 != 0 {
        round_and_pack(sign, exp + 1, hi, lo, status)
    } else {
        let sig0 = (hi << 1) | (lo >> 63);
        let sig1 = lo << 1;
        round_and_pack(sign, exp, sig0, sig1, status)
    }
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

    let n = u128::from(a.sig) << 64;
    let d = u128::from(b.sig);
    let mut q = n / d;
    let r = n % d;
    let mut exp = a.exp - b.exp;
    if q >> 63 == 0 {
        q <<= 1;
        exp -= 1;
    }
    let sticky: u64 = u64::from(r != 0);
    round_and_pack(sign, exp, q as u64, sticky << 63, status)
}

/// `sqrt(a)`.
#[must_use]
pub fn sqrt(a: Bits, status: &mut FloatStatus) -> Bits {
    let a = unpack(a, status);
    if a.is_nan() {
        return pack(quiet_and_flag(a, status), status);
    }
    if a.class == Class::Zero {
        return pack(a, status);
    }
    if a.sign {
        status.raise(ExceptionFlags::INVALID);
        return pack(default_nan_unpacked(&status.policy), status);
    }
    if a.class == Class::Infinity {
        return pack(a, status);
    }

    let exp_odd = a.exp.rem_euclid(2) != 0;
    let x: u128 = if exp_odd { u128::from(a.sig) << 63 } else { u128::from(a.sig) << 64 };
    let y = isqrt_u128(x);
    let remainder = x - y * y;
    let exp = if exp_odd { (a.exp - 1) / 2 } else { a.exp / 2 };
    let sticky: u64 = u64::from(remainder != 0);
    round_and_pack(false, exp, y as u64, sticky << 63, status)
}

fn quiet_and_flag(a: Unpacked, status: &mut FloatStatus) -> Unpacked {
    if a.class == Class::SignalingNan {
        status.raise(ExceptionFlags::INVALID);
    }
    quiet(a, &status.policy)
}

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

    let b_wide = u128::from(b.sig);
    let a_wide = u128::from(a.sig);

    // `cur_exp` only ever decreases toward `b.exp`, so the loop below requires
    // `a.exp >= b.exp` to terminate. When `a.exp < b.exp`, `|a| < |b|`
    // unconditionally, so handle it directly instead.
    if a.exp < b.exp {
        if a.exp + 1 < b.exp || a_wide < b_wide {
            return pack(a, status);
        }
        if a_wide == b_wide {
            return pack(a, status);
        }
        let mag = 2 * b_wide - a_wide;
        if mag == 0 {
            return zero_bits(a.sign);
        }
        let mag64 = mag as u64;
        let shift = primitives::count_leading_zeros_64(mag64);
        return round_and_pack(!a.sign, a.exp - shift as i32, mag64 << shift, 0, status);
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
    let (mag, sign_flip) = if use_next_quotient { (b_wide - cur, true) } else { (cur, false) };

    if mag == 0 {
        return zero_bits(a.sign);
    }

    let mag64 = mag as u64;
    let shift = primitives::count_leading_zeros_64(mag64);
    round_and_pack(if sign_flip { !a.sign } else { a.sign }, b.exp - shift as i32, mag64 << shift, 0, status)
}

/// Signaling comparison.
#[must_use]
pub fn compare_signaling(a: Bits, b: Bits, status: &mut FloatStatus) -> crate::ops::compare::FloatRelation {
    compare(a, b, status, true)
}

/// Quiet comparison.
#[must_use]
pub fn compare_quiet(a: Bits, b: Bits, status: &mut FloatStatus) -> crate::ops::compare::FloatRelation {
    compare(a, b, status, false)
}

fn compare(a: Bits, b: Bits, status: &mut FloatStatus, always_invalid: bool) -> crate::ops::compare::FloatRelation {
    use crate::ops::compare::FloatRelation;

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

/// Rounds `a` to an integral value, represented as an `f80` value.
#[must_use]
pub fn round_to_int(a: Bits, exact: bool, status: &mut FloatStatus) -> Bits {
    let u = unpack(a, status);
    if u.is_nan() {
        return pack(quiet_and_flag(u, status), status);
    }
    if u.class != Class::Normal || u.exp >= 63 {
        return pack(u, status);
    }
    if u.exp < 0 {
        let round_up = match status.rounding_mode {
            RoundingMode::NearestEven | RoundingMode::NearestAway => u.exp == -1,
            RoundingMode::TowardZero => false,
            RoundingMode::Upward => !u.sign,
            RoundingMode::Downward => u.sign,
            RoundingMode::ToOdd => false,
        };
        if exact {
            status.raise(ExceptionFlags::INEXACT);
        }
        return if round_up { pack_raw(u.sign, BIAS as u16, 1 << 63) } else { zero_bits(u.sign) };
    }

    let drop = 63 - u.exp as u32;
    let round_mask = (1u64 << drop) - 1;
    let round_bits = u.sig & round_mask;
    if round_bits == 0 {
        return pack(u, status);
    }
    if exact {
        status.raise(ExceptionFlags::INEXACT);
    }
    let half_ulp = 1u64 << (drop - 1);
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
        let (bumped, carried) = truncated.overflowing_add(1 << drop);
        if carried {
            return pack(Unpacked { sig: 1 << 63, exp: u.exp + 1, ..u }, status);
        }
        return pack(Unpacked { sig: bumped, ..u }, status);
    }
    pack(Unpacked { sig: truncated, ..u }, status)
}

/// Converts a signed 64-bit integer to the nearest representable `f80`
/// value (always exact: 64 significant bits is never narrower than an
/// `i64`'s magnitude).
#[must_use]
pub fn from_i64(v: i64) -> Bits {
    if v == 0 {
        return zero_bits(false);
    }
    let sign = v < 0;
    let magnitude = v.unsigned_abs();
    let shift = magnitude.leading_zeros();
    pack_raw(sign, (BIAS + 63 - shift as i32) as u16, magnitude << shift)
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
    if u.class == Class::Zero {
        return 0;
    }
    if u.exp < 0 {
        return 0;
    }
    if u.exp >= 63 {
        status.raise(ExceptionFlags::INVALID);
        return if u.sign { i64::MIN } else { i64::MAX };
    }
    let drop = 63 - u.exp as u32;
    let magnitude = u.sig >> drop;
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
    pack_raw(u.sign, MAX_EXP, u.sig)
}
