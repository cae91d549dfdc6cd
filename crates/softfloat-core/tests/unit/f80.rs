//! Integration tests for extended (80-bit) precision.

use softfloat_core::f80;
use softfloat_core::status::{F80RoundingPrecision, FloatStatus};

#[test]
fn add_and_to_i64_roundtrip_small_integers() {
    let mut st = FloatStatus::default();
    let a = f80::from_i64(3);
    let b = f80::from_i64(4);
    let sum = f80::add(a, b, &mut st);
    assert_eq!(f80::to_i64(sum, &mut st), 7);
}

#[test]
fn div_by_zero_is_infinite() {
    let mut st = FloatStatus::default();
    let one = f80::from_i64(1);
    let zero = f80::from_i64(0);
    let r = f80::div(one, zero, &mut st);
    // An extended-precision infinity has every significand bit clear below
    // the explicit integer bit, with the max biased exponent.
    assert_eq!(r.signexp & 0x7FFF, 0x7FFF);
}

#[test]
fn rounding_precision_single_rounds_a_repeating_division() {
    let mut st_single = FloatStatus::default();
    st_single.f80_rounding_precision = F80RoundingPrecision::Single;
    let mut st_extended = FloatStatus::default();

    let one = f80::from_i64(1);
    let three = f80::from_i64(3);
    let at_single = f80::div(one, three, &mut st_single);
    let at_extended = f80::div(one, three, &mut st_extended);

    // Rounding at the narrower precision clears low significand bits that
    // the full-width result still carries, so the two encodings differ.
    assert_ne!(at_single.sig, at_extended.sig);
}

#[test]
fn sqrt_of_perfect_square_is_exact() {
    let mut st = FloatStatus::default();
    let r = f80::sqrt(f80::from_i64(144), &mut st);
    assert_eq!(f80::to_i64(r, &mut st), 12);
}
