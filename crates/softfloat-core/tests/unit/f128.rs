//! Integration tests for quad (128-bit) precision, including the
//! narrower-than-f128 cross-format conversion path to/from binary64.

use softfloat_core::f128;
use softfloat_core::ops::compare::FloatRelation;
use softfloat_core::status::FloatStatus;

#[test]
fn add_and_to_i64_roundtrip() {
    let mut st = FloatStatus::default();
    let a = f128::from_i64(5);
    let b = f128::from_i64(37);
    let sum = f128::add(a, b, &mut st);
    assert_eq!(f128::to_i64(sum, &mut st), 42);
}

#[test]
fn from_f64_and_to_f64_roundtrip_exactly_for_doubles() {
    let mut st = FloatStatus::default();
    let widened = f128::from_f64(1.5f64.to_bits(), &mut st);
    let narrowed = f128::to_f64(widened, &mut st);
    assert_eq!(f64::from_bits(narrowed), 1.5);
}

#[test]
fn compare_quiet_orders_distinct_magnitudes() {
    let mut st = FloatStatus::default();
    let a = f128::from_i64(1);
    let b = f128::from_i64(2);
    assert_eq!(f128::compare_quiet(a, b, &mut st), FloatRelation::Less);
}

#[test]
fn sqrt_of_perfect_square_is_exact() {
    let mut st = FloatStatus::default();
    let r = f128::sqrt(f128::from_i64(169), &mut st);
    assert_eq!(f128::to_i64(r, &mut st), 13);
}

#[test]
fn mul_of_large_values_uses_the_full_256_bit_product() {
    let mut st = FloatStatus::default();
    let a = f128::from_i64(1_000_000_000);
    let b = f128::from_i64(1_000_000_000);
    let product = f128::mul(a, b, &mut st);
    assert_eq!(f128::to_i64(product, &mut st), 1_000_000_000_000_000_000);
}
