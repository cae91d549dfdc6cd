//! Integration tests for binary32 exercised through the public API only.

use softfloat_core::f32 as sf32;
use softfloat_core::ops::compare::FloatRelation;
use softfloat_core::status::{ExceptionFlags, FloatStatus};

fn bits(v: f32) -> u32 {
    v.to_bits()
}

fn value(b: u32) -> f32 {
    f32::from_bits(b)
}

#[test]
fn div_by_zero_raises_flag_and_returns_infinity() {
    let mut st = FloatStatus::default();
    let r = sf32::div(bits(1.0), bits(0.0), &mut st);
    assert!(value(r).is_infinite());
    assert!(st.flags.contains(ExceptionFlags::DIVIDE_BY_ZERO));
}

#[test]
fn muladd_is_correctly_rounded_once() {
    let mut st = FloatStatus::default();
    let r = sf32::muladd(bits(1.0000001), bits(1.0000001), bits(-1.0), &mut st);
    assert!(value(r) > 0.0);
}

#[test]
fn compare_quiet_orders_negative_zero_equal_to_positive_zero() {
    let mut st = FloatStatus::default();
    let rel = sf32::compare_quiet(bits(0.0), bits(-0.0), &mut st);
    assert_eq!(rel, FloatRelation::Equal);
}

#[test]
fn min_propagates_nan_per_ieee754_2019() {
    let mut st = FloatStatus::default();
    let nan = sf32::default_nan(&softfloat_core::TargetPolicy::default());
    let r = sf32::min(nan, bits(1.0), &mut st);
    assert!(value(r).is_nan());
}

#[test]
fn min_num_ignores_a_single_nan_operand() {
    let mut st = FloatStatus::default();
    let nan = sf32::default_nan(&softfloat_core::TargetPolicy::default());
    let r = sf32::min_num(nan, bits(1.0), &mut st);
    assert_eq!(value(r), 1.0);
}

#[test]
fn round_to_int_ties_to_even() {
    let mut st = FloatStatus::default();
    let r = sf32::round_to_int(bits(2.5), false, &mut st);
    assert_eq!(value(r), 2.0);
}

#[test]
fn scalbn_multiplies_by_a_power_of_two_exactly() {
    let mut st = FloatStatus::default();
    let r = sf32::scalbn(bits(1.5), 3, &mut st);
    assert_eq!(value(r), 12.0);
}
