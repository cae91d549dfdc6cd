//! Multi-word integer primitives (L1).
//!
//! Pure, stateless helpers over 64/128/192-bit unsigned integers, represented
//! as tuples of `u64` words in most-significant-first order. These are the
//! load-bearing bit-manipulation routines every higher layer's rounding and
//! alignment math is built from: sticky-bit preserving shifts, schoolbook
//! multi-word add/sub, widening multiply, and division/sqrt estimators that
//! trade exactness for a cheap post-correction step.
//!
//! Grounded in the Berkeley SoftFloat / QEMU `softfloat.c` primitive helpers
//! (`shift64RightJamming`, `add128`, `mul64To128`, `estimateDiv128To64`,
//! `estimateSqrt32`, `countLeadingZeros64`).

/// Counts leading zero bits of a 64-bit word. `0` has 64 leading zeros.
#[inline]
#[must_use]
pub const fn count_leading_zeros_64(x: u64) -> u32 {
    x.leading_zeros()
}

/// Counts leading zero bits of a 32-bit word. `0` has 32 leading zeros.
#[inline]
#[must_use]
pub const fn count_leading_zeros_32(x: u32) -> u32 {
    x.leading_zeros()
}

/// Logical left shift of a 64-bit word. Shifts of 64 or more yield 0.
#[inline]
#[must_use]
pub const fn shift_left(x: u64, n: u32) -> u64 {
    if n >= 64 { 0 } else { x << n }
}

/// Logical right shift of a 64-bit word, no sticky bit. Shifts of 64 or more
/// yield 0.
#[inline]
#[must_use]
pub const fn shift_right(x: u64, n: u32) -> u64 {
    if n >= 64 { 0 } else { x >> n }
}

/// Logical right shift of `x` by `n` bits, OR'ing any bit shifted out into
/// the least-significant bit of the result (the "sticky" or "jamming" bit).
///
/// This is the foundation of correct rounding across every alignment shift
/// in the library: once bits are jammed into the lsb, later rounding logic
/// can distinguish an exact value from one that was merely close.
#[inline]
#[must_use]
pub const fn shift_right_jamming(x: u64, n: u32) -> u64 {
    if n == 0 {
        x
    } else if n >= 64 {
        (x != 0) as u64
    } else {
        let shifted = x >> n;
        let dropped_nonzero = (x << (64 - n)) != 0;
        shifted | (dropped_nonzero as u64)
    }
}

/// 128-bit value as a `(high, low)` pair of 64-bit words.
pub type Wide128 = (u64, u64);

/// 192-bit value as a `(high, mid, low)` triple of 64-bit words.
pub type Wide192 = (u64, u64, u64);

/// Right-shifts a 128-bit value by `n` bits with sticky-bit jamming.
#[must_use]
pub const fn shift128_right_jamming(hi: u64, lo: u64, n: u32) -> Wide128 {
    if n == 0 {
        (hi, lo)
    } else if n >= 128 {
        (0, (hi != 0 || lo != 0) as u64)
    } else if n >= 64 {
        let shift = n - 64;
        let base = shift_right(hi, shift);
        let hi_dropped_nonzero = shift > 0 && shift_left(hi, 64 - shift) != 0;
        let dropped_nonzero = lo != 0 || hi_dropped_nonzero;
        (0, base | dropped_nonzero as u64)
    } else {
        let new_hi = hi >> n;
        let new_lo = (hi << (64 - n)) | (lo >> n);
        let dropped_nonzero = (lo << (64 - n)) != 0;
        (new_hi, new_lo | (dropped_nonzero as u64))
    }
}

/// Right-shifts a 192-bit value by `n` bits with sticky-bit jamming.
#[must_use]
pub const fn shift192_right_jamming(hi: u64, mid: u64, lo: u64, n: u32) -> Wide192 {
    if n == 0 {
        (hi, mid, lo)
    } else if n >= 192 {
        (0, 0, (hi != 0 || mid != 0 || lo != 0) as u64)
    } else if n >= 128 {
        let shift = n - 128;
        let (_, jammed) = shift128_right_jamming(hi, 0, shift);
        (0, 0, jammed | (mid != 0 || lo != 0) as u64)
    } else if n >= 64 {
        let shift = n - 64;
        let (new_mid, jammed_lo) = shift128_right_jamming(hi, mid, shift);
        (0, new_mid, jammed_lo | (lo != 0) as u64)
    } else {
        let new_hi = hi >> n;
        let new_mid = (hi << (64 - n)) | (mid >> n);
        let carry_lo = (mid << (64 - n)) | (lo >> n);
        let dropped_nonzero = (lo << (64 - n)) != 0;
        (new_hi, new_mid, carry_lo | (dropped_nonzero as u64))
    }
}

/// Adds two 128-bit values, discarding any carry out of bit 127.
#[must_use]
pub const fn add128(a_hi: u64, a_lo: u64, b_hi: u64, b_lo: u64) -> Wide128 {
    let (lo, carry) = a_lo.overflowing_add(b_lo);
    let hi = a_hi.wrapping_add(b_hi).wrapping_add(carry as u64);
    (hi, lo)
}

/// Subtracts `b` from `a` as 128-bit values, wrapping on borrow.
#[must_use]
pub const fn sub128(a_hi: u64, a_lo: u64, b_hi: u64, b_lo: u64) -> Wide128 {
    let (lo, borrow) = a_lo.overflowing_sub(b_lo);
    let hi = a_hi.wrapping_sub(b_hi).wrapping_sub(borrow as u64);
    (hi, lo)
}

/// Adds two 192-bit values, discarding any carry out of bit 191.
#[must_use]
pub const fn add192(
    a_hi: u64,
    a_mid: u64,
    a_lo: u64,
    b_hi: u64,
    b_mid: u64,
    b_lo: u64,
) -> Wide192 {
    let (lo, c0) = a_lo.overflowing_add(b_lo);
    let (mid, c1a) = a_mid.overflowing_add(b_mid);
    let (mid, c1b) = mid.overflowing_add(c0 as u64);
    let hi = a_hi
        .wrapping_add(b_hi)
        .wrapping_add(c1a as u64)
        .wrapping_add(c1b as u64);
    (hi, mid, lo)
}

/// Subtracts `b` from `a` as 192-bit values, wrapping on borrow.
#[must_use]
pub const fn sub192(
    a_hi: u64,
    a_mid: u64,
    a_lo: u64,
    b_hi: u64,
    b_mid: u64,
    b_lo: u64,
) -> Wide192 {
    let (lo, b0) = a_lo.overflowing_sub(b_lo);
    let (mid, b1a) = a_mid.overflowing_sub(b_mid);
    let (mid, b1b) = mid.overflowing_sub(b0 as u64);
    let hi = a_hi
        .wrapping_sub(b_hi)
        .wrapping_sub(b1a as u64)
        .wrapping_sub(b1b as u64);
    (hi, mid, lo)
}

/// Full 64x64 -> 128-bit unsigned multiply, returned as `(high, low)`.
#[must_use]
pub const fn mul64_to_128(a: u64, b: u64) -> Wide128 {
    let product = (a as u128) * (b as u128);
    ((product >> 64) as u64, product as u64)
}

/// Multiplies a 128-bit value by a 64-bit value, producing a 192-bit
/// product `(high, mid, low)`.
#[must_use]
pub const fn mul128_by_64_to_192(a_hi: u64, a_lo: u64, b: u64) -> Wide192 {
    let (lo_hi, lo_lo) = mul64_to_128(a_lo, b);
    let (hi_hi, hi_lo) = mul64_to_128(a_hi, b);
    let (mid, carry) = hi_lo.overflowing_add(lo_hi);
    let hi = hi_hi.wrapping_add(carry as u64);
    (hi, mid, lo_lo)
}

/// 128x128-bit product as four 64-bit words, most-significant first.
pub type Wide256 = (u64, u64, u64, u64);

/// Full 128x128 -> 256-bit unsigned multiply.
///
/// Computed column-by-column with `u128` partial products so every carry is
/// tracked exactly; this is the schoolbook algorithm `mul128To256` in
/// Berkeley SoftFloat implements with explicit half-word splitting, made
/// simpler here by Rust's native 64x64->128 widening multiply.
#[must_use]
pub const fn mul128_to_256(a_hi: u64, a_lo: u64, b_hi: u64, b_lo: u64) -> Wide256 {
    let p00 = (a_lo as u128) * (b_lo as u128);
    let p01 = (a_lo as u128) * (b_hi as u128);
    let p10 = (a_hi as u128) * (b_lo as u128);
    let p11 = (a_hi as u128) * (b_hi as u128);

    let z0 = p00 as u64;

    let col1 = (p00 >> 64) + (p01 & u64::MAX as u128) + (p10 & u64::MAX as u128);
    let z1 = col1 as u64;

    let col2 = (p01 >> 64) + (p10 >> 64) + (p11 & u64::MAX as u128) + (col1 >> 64);
    let z2 = col2 as u64;

    let col3 = (p11 >> 64) + (col2 >> 64);
    let z3 = col3 as u64;

    (z3, z2, z1, z0)
}

/// Returns the 64-bit quotient for `(n_hi:n_lo) / d`, where `n_hi < d` (so
/// the true quotient fits in 64 bits).
///
/// Berkeley SoftFloat's `estimateDiv128To64` computes an approximate
/// quotient from half-word reciprocal tables because C has no native
/// 128-bit integer division. Rust's `u128` does, so this returns the exact
/// quotient directly; callers still written against the "overshoots by at
/// most 2, never undershoots" contract get a zero-iteration correction loop
/// for free, since an exact value trivially satisfies that bound.
#[must_use]
pub const fn estimate_div128_by_64(n_hi: u64, n_lo: u64, d: u64) -> u64 {
    if n_hi >= d {
        return u64::MAX;
    }
    let n = ((n_hi as u128) << 64) | (n_lo as u128);
    (n / (d as u128)) as u64
}

/// Seeds a Newton-Raphson square root iteration for a normalized 32-bit
/// significand, given the parity of the (unbiased) exponent. Returns a
/// 32-bit estimate accurate to roughly half a bit, used as the first two
/// iterations of f80/f128 sqrt before a final correction step.
///
/// Grounded in `estimateSqrt32` from Berkeley SoftFloat, which uses an
/// 8-bit lookup table keyed on the top bits of `a_hi32` refined by one
/// division step; we keep the same structure.
#[must_use]
pub fn estimate_sqrt32(exp_parity: u32, a_hi32: u32) -> u32 {
    // 16-entry table indexed by bits [29:26] of a normalized significand,
    // one entry per parity, matching Berkeley SoftFloat's sqrtOddAdjustments
    // / sqrtEvenAdjustments tables in spirit (coarse Newton seed).
    const ODD_TABLE: [u16; 16] = [
        0x0004, 0x0022, 0x005d, 0x00b1, 0x011d, 0x019f, 0x0236, 0x02e0, 0x039c, 0x0468, 0x0545,
        0x0631, 0x072b, 0x0832, 0x0946, 0x0a67,
    ];
    const EVEN_TABLE: [u16; 16] = [
        0x0a2d, 0x08af, 0x075a, 0x0629, 0x051a, 0x0429, 0x0356, 0x029e, 0x0200, 0x017d, 0x0110,
        0x00b9, 0x0077, 0x0048, 0x002c, 0x0012,
    ];

    let index = ((a_hi32 >> 27) & 0xF) as usize;
    let table = if exp_parity & 1 == 0 {
        &EVEN_TABLE
    } else {
        &ODD_TABLE
    };
    let z_seed = u64::from(table[index]) << 16;

    if a_hi32 == 0 {
        return 0;
    }

    // One Newton-Raphson refinement in Q32 fixed point: both `z_seed` and
    // `a_hi32` represent fractions of 2^32, so z*z must be rescaled back
    // down by 32 bits before comparing against `a`.
    let a = u64::from(a_hi32);
    let z2_q32 = (z_seed * z_seed) >> 32;
    let numerator = z2_q32 as i64 - a as i64;
    let denominator = i64::try_from(2 * z_seed).unwrap_or(i64::MAX).max(1);
    let refined = z_seed as i64 - numerator / denominator;
    refined.clamp(0, i64::from(u32::MAX)) as u32
}
