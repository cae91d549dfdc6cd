//! Integration tests for binary16, covering both the IEEE and ARM
//! alternate half-precision formats through the same entry points.

use softfloat_core::f16;
use softfloat_core::format::{F16, F16_ARM_ALT};
use softfloat_core::status::{ExceptionFlags, FloatStatus};

#[test]
fn add_one_and_one_is_two() {
    let mut st = FloatStatus::default();
    let one = f16::from_i32(1, &F16, &mut st);
    let two = f16::add(one, one, &F16, &mut st);
    assert_eq!(f16::to_i32(two, &F16, &mut st), 2);
}

#[test]
fn arm_alt_format_has_no_infinities() {
    let mut st = FloatStatus::default();
    let max_normal = f16::from_i32(65504, &F16_ARM_ALT, &mut st);
    let doubled = f16::add(max_normal, max_normal, &F16_ARM_ALT, &mut st);
    // Overflow in the no-inf-or-nan format saturates instead of producing Inf.
    assert_eq!(f16::to_i32(doubled, &F16_ARM_ALT, &mut st), 65504);
    assert!(st.flags.contains(ExceptionFlags::OVERFLOW));
}

#[test]
fn ieee_format_overflow_produces_infinity() {
    let mut st = FloatStatus::default();
    let max_normal = f16::from_i32(65504, &F16, &mut st);
    let doubled = f16::add(max_normal, max_normal, &F16, &mut st);
    assert_eq!(doubled & 0x7C00, 0x7C00);
    assert_eq!(doubled & 0x03FF, 0);
}

#[test]
fn from_f32_and_back_roundtrips_representable_values() {
    let mut st = FloatStatus::default();
    let half = f16::from_f32(1.5f32.to_bits(), &F16, &mut st);
    assert_eq!(f16::to_i32(f16::mul(half, f16::from_i32(2, &F16, &mut st), &F16, &mut st), &F16, &mut st), 3);
}
