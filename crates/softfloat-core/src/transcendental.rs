//! `f32_exp2`, `f32_log2`, `f64_log2`: range-reduced polynomial
//! approximations, kept as illustrative shared machinery rather than
//! bit-exact kernel operations (`spec.md` §9's open question, resolved in
//! `DESIGN.md`). **None of the three functions in this module claim
//! last-bit IEEE correctness** — their flag-raising conventions in the
//! reference this library is grounded on are themselves not fully
//! specified by IEEE 754, so callers needing a correctly-rounded
//! transcendental should use a dedicated math library instead.
//!
//! Grounded in `examples/original_source/fpu/softfloat.c`'s `float32_exp2`
//! / `float32_log2` / `float64_log2`, which use target-specific minimax
//! polynomials over a range-reduced argument; this reimplementation uses a
//! small Taylor/atanh-series polynomial of the same shape rather than
//! porting the original's literal coefficient tables.

use crate::format::{F32, F64};
use crate::parts::{self, FloatClass};
use crate::status::{ExceptionFlags, FloatStatus};

const LN2: f64 = std::f64::consts::LN_2;

/// `2^a`, computed as a binary32 value.
#[must_use]
pub fn f32_exp2(a: u32, status: &mut FloatStatus) -> u32 {
    let p = parts::unpack(u64::from(a), &F32, status);
    match p.class {
        FloatClass::QuietNan | FloatClass::SignalingNan => {
            if p.class == FloatClass::SignalingNan {
                status.raise(ExceptionFlags::INVALID);
            }
            let r = parts::maybe_silence(p, status);
            parts::round_and_pack(r, &F32, status) as u32
        }
        FloatClass::Infinity => {
            if p.sign {
                0
            } else {
                f32::INFINITY.to_bits()
            }
        }
        FloatClass::Zero => 1.0f32.to_bits(),
        FloatClass::Normal => {
            status.raise(ExceptionFlags::INEXACT);
            let r = exp2_poly(f64::from(f32::from_bits(a))) as f32;
            r.to_bits()
        }
    }
}

/// `log2(a)`, computed as a binary32 value.
#[must_use]
pub fn f32_log2(a: u32, status: &mut FloatStatus) -> u32 {
    let r = log2_generic(
        f64::from(f32::from_bits(a)),
        parts::unpack(u64::from(a), &F32, status),
        status,
    ) as f32;
    r.to_bits()
}

/// `log2(a)`, computed as a binary64 value.
#[must_use]
pub fn f64_log2(a: u64, status: &mut FloatStatus) -> u64 {
    log2_generic(f64::from_bits(a), parts::unpack(a, &F64, status), status).to_bits()
}

fn log2_generic(value: f64, p: parts::FloatParts, status: &mut FloatStatus) -> f64 {
    match p.class {
        FloatClass::QuietNan | FloatClass::SignalingNan => {
            if p.class == FloatClass::SignalingNan {
                status.raise(ExceptionFlags::INVALID);
            }
            f64::NAN
        }
        FloatClass::Zero => {
            status.raise(ExceptionFlags::DIVIDE_BY_ZERO);
            f64::NEG_INFINITY
        }
        FloatClass::Infinity if p.sign => {
            status.raise(ExceptionFlags::INVALID);
            f64::NAN
        }
        FloatClass::Infinity => f64::INFINITY,
        FloatClass::Normal if p.sign => {
            status.raise(ExceptionFlags::INVALID);
            f64::NAN
        }
        FloatClass::Normal => {
            status.raise(ExceptionFlags::INEXACT);
            log2_poly(value)
        }
    }
}

/// `2^f` for any finite `f`, via integer/fractional splitting: `2^f = 2^n
/// * 2^r` with `n = round(f)` and `r` in `[-0.5, 0.5]`, the fractional part
/// evaluated with a five-term Taylor series of `e^(r ln 2)`.
fn exp2_poly(f: f64) -> f64 {
    let n = f.round();
    let r = f - n;
    let rl = r * LN2;
    let frac = 1.0 + rl * (1.0 + rl * (0.5 + rl * (1.0 / 6.0 + rl * (1.0 / 24.0 + rl / 120.0))));
    frac * 2f64.powi(n as i32)
}

/// `log2(value)` for `value > 0`, via exponent extraction (`value = m *
/// 2^e`, `m` in `[1, 2)`) and an atanh-series approximation of `ln(m)`:
/// with `y = (m-1)/(m+1)`, `ln(m) = 2*(y + y^3/3 + y^5/5 + y^7/7)`.
fn log2_poly(value: f64) -> f64 {
    let (m, e) = frexp(value);
    // `frexp` returns `m` in `[0.5, 1)`; rescale to `[1, 2)`.
    let m = m * 2.0;
    let e = e - 1;
    let y = (m - 1.0) / (m + 1.0);
    let y2 = y * y;
    let ln_m = 2.0 * y * (1.0 + y2 * (1.0 / 3.0 + y2 * (1.0 / 5.0 + y2 / 7.0)));
    f64::from(e) + ln_m / LN2
}

/// Decomposes `value` into `(mantissa, exponent)` with `value == mantissa *
/// 2^exponent` and `mantissa` in `[0.5, 1)`. `std` dropped `f64::frexp`; this
/// reconstructs it from the bit pattern.
fn frexp(value: f64) -> (f64, i32) {
    if value == 0.0 {
        return (0.0, 0);
    }
    let bits = value.to_bits();
    let biased_exp = ((bits >> 52) & 0x7FF) as i32;
    if biased_exp == 0 {
        // Subnormal: normalize by hand.
        let scaled = value * 2f64.powi(64);
        let (m, e) = frexp(scaled);
        return (m, e - 64);
    }
    let exponent = biased_exp - 1022;
    let mantissa_bits = (bits & !(0x7FFu64 << 52)) | (1022u64 << 52);
    (f64::from_bits(mantissa_bits), exponent)
}
