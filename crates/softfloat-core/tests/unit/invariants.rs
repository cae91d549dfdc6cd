//! Property tests for invariants that must hold across a wide range of
//! finite, non-NaN operand pairs regardless of format (`spec.md` §8):
//! commutativity of `add`/`mul`, and that comparison agrees with the
//! ordering the host's native type already gives us for the same inputs.

use proptest::prelude::*;
use softfloat_core::f32 as sf32;
use softfloat_core::f64 as sf64;
use softfloat_core::ops::compare::FloatRelation;
use softfloat_core::status::FloatStatus;

proptest! {
    #[test]
    fn f32_add_is_commutative(a in -1.0e30f32..1.0e30, b in -1.0e30f32..1.0e30) {
        let mut st1 = FloatStatus::default();
        let mut st2 = FloatStatus::default();
        let ab = sf32::add(a.to_bits(), b.to_bits(), &mut st1);
        let ba = sf32::add(b.to_bits(), a.to_bits(), &mut st2);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn f32_mul_is_commutative(a in -1.0e30f32..1.0e30, b in -1.0e30f32..1.0e30) {
        let mut st1 = FloatStatus::default();
        let mut st2 = FloatStatus::default();
        let ab = sf32::mul(a.to_bits(), b.to_bits(), &mut st1);
        let ba = sf32::mul(b.to_bits(), a.to_bits(), &mut st2);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn f64_compare_quiet_agrees_with_host_ordering(a in -1.0e100f64..1.0e100, b in -1.0e100f64..1.0e100) {
        let mut st = FloatStatus::default();
        let rel = sf64::compare_quiet(a.to_bits(), b.to_bits(), &mut st);
        let expected = if a < b {
            FloatRelation::Less
        } else if a > b {
            FloatRelation::Greater
        } else {
            FloatRelation::Equal
        };
        prop_assert_eq!(rel, expected);
    }

    #[test]
    fn f64_sqrt_of_a_squared_normal_recovers_the_magnitude(a in 1.0f64..1.0e100) {
        let mut st = FloatStatus::default();
        let squared = sf64::mul(a.to_bits(), a.to_bits(), &mut st);
        if st.flags.is_empty() {
            let root = sf64::sqrt(squared, &mut st);
            let ratio = f64::from_bits(root) / a;
            prop_assert!((ratio - 1.0).abs() < 1e-9);
        }
    }
}
