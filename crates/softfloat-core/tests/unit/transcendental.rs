//! Integration coverage for the `exp2`/`log2` approximations, checking
//! `exp2(log2(x)) == x` within the margin the module doc comment already
//! admits these aren't bit-exact.

use softfloat_core::status::FloatStatus;
use softfloat_core::transcendental;

#[test]
fn f64_log2_then_f32_exp2_roundtrips_within_tolerance() {
    let mut st = FloatStatus::default();
    let x = 12.0f64;
    let log = f64::from_bits(transcendental::f64_log2(x.to_bits(), &mut st));
    let back = f32::from_bits(transcendental::f32_exp2((log as f32).to_bits(), &mut st));
    assert!((f64::from(back) - x).abs() / x < 1e-3);
}

#[test]
fn f32_log2_of_one_is_zero() {
    let mut st = FloatStatus::default();
    let r = f32::from_bits(transcendental::f32_log2(1.0f32.to_bits(), &mut st));
    assert!(r.abs() < 1e-6);
}

#[test]
fn f32_exp2_of_infinity_is_infinity() {
    let mut st = FloatStatus::default();
    let r = f32::from_bits(transcendental::f32_exp2(f32::INFINITY.to_bits(), &mut st));
    assert!(r.is_infinite() && r.is_sign_positive());
}
