//! Integration tests for binary64 exercised through the public API only.

use softfloat_core::f64 as sf64;
use softfloat_core::status::{ExceptionFlags, FloatStatus, RoundingMode};

fn bits(v: f64) -> u64 {
    v.to_bits()
}

fn value(b: u64) -> f64 {
    f64::from_bits(b)
}

#[test]
fn sqrt_of_four_is_two_with_no_flags() {
    let mut st = FloatStatus::default();
    let r = sf64::sqrt(bits(4.0), &mut st);
    assert_eq!(value(r), 2.0);
    assert!(st.flags.is_empty());
}

#[test]
fn rem_of_seven_and_two_is_negative_one() {
    let mut st = FloatStatus::default();
    let r = sf64::rem(bits(7.0), bits(2.0), &mut st);
    assert_eq!(value(r), -1.0);
}

#[test]
fn rounding_mode_toward_zero_truncates() {
    let mut st = FloatStatus::default();
    st.rounding_mode = RoundingMode::TowardZero;
    let r = sf64::div(bits(1.0), bits(3.0), &mut st);
    let exact = sf64::mul(r, bits(3.0), &mut st);
    assert!(value(exact) <= 1.0);
}

#[test]
fn squash_input_denormal_zeroes_subnormals_when_enabled() {
    let mut st = FloatStatus::default();
    st.flush_inputs_to_zero = true;
    let subnormal = f64::MIN_POSITIVE / 2.0;
    let r = sf64::squash_input_denormal(bits(subnormal), &mut st);
    assert_eq!(value(r), 0.0);
}

#[test]
fn max_num_mag_picks_the_larger_magnitude_regardless_of_sign() {
    let mut st = FloatStatus::default();
    let r = sf64::max_num_mag(bits(-5.0), bits(3.0), &mut st);
    assert_eq!(value(r), -5.0);
}

#[test]
fn to_i16_out_of_range_raises_invalid() {
    let mut st = FloatStatus::default();
    let r = sf64::to_i16(bits(1.0e10), &mut st);
    assert_eq!(r, i16::MIN);
    assert!(st.flags.contains(ExceptionFlags::INVALID));
}
