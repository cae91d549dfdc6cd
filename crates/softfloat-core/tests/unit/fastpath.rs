//! Integration coverage for the host-FPU fast path, run only when the
//! `fast-path` feature is enabled. Confirms the wired-in entry points
//! (`f32::add`/`f64::add` etc.) agree with the always-soft baseline, not
//! just `fastpath::try_*` in isolation (already covered in `src/`).

#![cfg(feature = "fast-path")]

use softfloat_core::status::{ExceptionFlags, FloatStatus};
use softfloat_core::f32 as sf32;
use softfloat_core::f64 as sf64;

fn inexact_status() -> FloatStatus {
    let mut st = FloatStatus::default();
    st.flags.raise(ExceptionFlags::INEXACT);
    st
}

#[test]
fn f32_add_through_public_api_matches_host_addition() {
    let mut st = inexact_status();
    let r = sf32::add(1.5f32.to_bits(), 2.5f32.to_bits(), &mut st);
    assert_eq!(f32::from_bits(r), 4.0);
}

#[test]
fn f64_sqrt_through_public_api_matches_host_sqrt() {
    let mut st = inexact_status();
    let r = sf64::sqrt(16.0f64.to_bits(), &mut st);
    assert_eq!(f64::from_bits(r), 4.0);
}

#[test]
fn f64_div_by_subnormal_falls_back_to_the_soft_path() {
    let mut st = inexact_status();
    let tiny: f64 = f64::from_bits(1);
    let r = sf64::div(1.0f64.to_bits(), tiny.to_bits(), &mut st);
    // The soft and fast paths must still agree even when the fast path
    // declines and the soft kernel runs underneath.
    assert!(f64::from_bits(r).is_infinite());
}
