//! L4: NaN classification and propagation policy.
//!
//! Grounded in `examples/original_source/fpu/softfloat-specialize.inc.c`'s
//! `parts_is_snan_frac`, `parts_default_nan`, `parts_silence_nan`, `pickNaN`,
//! and `pickNaNMulAdd`, generalized from the teacher's single hard-coded
//! RISC-V canonical-NaN constants (`core/units/fpu/nan_handling.rs`) into a
//! policy-parameterized form driven by [`crate::policy::TargetPolicy`].

use crate::parts::{FloatClass, FloatParts};
use crate::policy::{DefaultNanPattern, NanPolicy, SnanConvention, TargetPolicy};
use crate::status::{ExceptionFlags, FloatStatus};

/// True if the top bit of `frac` marks a signaling NaN under `convention`.
/// A fraction of all-zero with this bit signaling would encode infinity
/// instead, so `frac` must already be known non-zero (i.e. `part` is
/// classified as a NaN) before calling this.
#[must_use]
pub fn is_snan_frac(frac: u64, msb_mask: u64, convention: SnanConvention) -> bool {
    let msb_set = frac & msb_mask != 0;
    match convention {
        SnanConvention::Ieee754_2008 => !msb_set,
        SnanConvention::BitIsOne => msb_set,
    }
}

/// Canonical fraction MSB position for the shared 64-bit significand used
/// by [`FloatParts`] (bit 62, one below the integer/leading-one bit at 63
/// reserved by some callers — see `spec.md` §3.2's two-bit headroom note).
pub const CANONICAL_FRAC_MSB: u64 = 1 << 61;

/// Produces the default (non-payload-propagating) quiet NaN for `policy`,
/// in canonical [`FloatParts`] form. Grounded in `parts_default_nan`'s
/// per-target `#ifdef` ladder.
#[must_use]
pub fn default_nan(policy: &TargetPolicy) -> FloatParts {
    let (sign, frac) = match policy.default_nan_pattern {
        DefaultNanPattern::AllFractionBits => (false, (1u64 << 62) - 1),
        DefaultNanPattern::SignAndMsb | DefaultNanPattern::Ieee754Default => {
            (true, CANONICAL_FRAC_MSB)
        }
        DefaultNanPattern::MsbMinusOne => (false, (1u64 << 62) - 1 - CANONICAL_FRAC_MSB),
    };
    FloatParts {
        class: FloatClass::QuietNan,
        sign,
        exp: 0,
        frac,
    }
}

/// Quiets a NaN by setting its signaling-convention MSB to the quiet value,
/// preserving the rest of its payload. Grounded in `parts_silence_nan`.
#[must_use]
pub fn silence_nan(part: FloatParts, convention: SnanConvention) -> FloatParts {
    debug_assert_eq!(part.class, FloatClass::SignalingNan);
    let frac = match convention {
        SnanConvention::Ieee754_2008 => part.frac | CANONICAL_FRAC_MSB,
        SnanConvention::BitIsOne => part.frac & !CANONICAL_FRAC_MSB,
    };
    FloatParts {
        class: FloatClass::QuietNan,
        frac,
        ..part
    }
}

/// Which already-classified NaN operand (or the target default) a binary
/// NaN-producing operation should return, independent of how that operand's
/// bits are represented. [`pick_nan`] is the [`FloatParts`] case; `f80` and
/// `f128` (which have no shared canonical struct, per `spec.md` §3.3) drive
/// their own native quieting off this same decision, so the ARM/PPC/X87
/// selection ladder is written exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NanChoice {
    /// Use `a`, quieted if it was signaling.
    A,
    /// Use `b`, quieted if it was signaling.
    B,
    /// Use the target's default NaN.
    Default,
}

/// Grounded in `pickNaN`. `status` accumulates `INVALID` if either operand
/// was signaling. `a_frac_cmp_b` orders the two operands' significand
/// magnitudes (callers compare their own native fraction representation);
/// it is only consulted by the x87 policy's two-signaling/two-quiet
/// tie-break, per `spec.md` §8 ("two sNaNs → larger-significand wins, ties
/// favor default").
#[must_use]
pub fn choose_nan(
    a_is_nan: bool,
    a_signaling: bool,
    b_is_nan: bool,
    b_signaling: bool,
    a_frac_cmp_b: std::cmp::Ordering,
    status: &mut FloatStatus,
    policy: &TargetPolicy,
) -> NanChoice {
    debug_assert!(a_is_nan || b_is_nan);
    if a_signaling || b_signaling {
        status.raise(ExceptionFlags::INVALID);
    }
    if !a_is_nan {
        return NanChoice::B;
    }
    if !b_is_nan {
        return NanChoice::A;
    }
    match policy.nan_policy {
        NanPolicy::ArmMipsHppa => NanChoice::A,
        NanPolicy::PpcXtensaM68k => NanChoice::B,
        // x87: an sNaN paired with a qNaN propagates the qNaN; otherwise
        // (two sNaNs or two qNaNs) the larger significand wins, ties
        // favoring the default NaN.
        NanPolicy::X87 => match (a_signaling, b_signaling) {
            (true, false) => NanChoice::B,
            (false, true) => NanChoice::A,
            _ => match a_frac_cmp_b {
                std::cmp::Ordering::Greater => NanChoice::A,
                std::cmp::Ordering::Less => NanChoice::B,
                std::cmp::Ordering::Equal => NanChoice::Default,
            },
        },
    }
}

/// Selects which of two propagated (already-quieted) NaN operands becomes
/// the result when both `a` and `b` are NaN, per `policy.nan_policy`.
/// `status` accumulates `INVALID` if either input was signaling. Grounded
/// in `pickNaN`.
#[must_use]
pub fn pick_nan(
    a: FloatParts,
    b: FloatParts,
    status: &mut FloatStatus,
    policy: &TargetPolicy,
) -> FloatParts {
    let a_is_nan = matches!(a.class, FloatClass::QuietNan | FloatClass::SignalingNan);
    let b_is_nan = matches!(b.class, FloatClass::QuietNan | FloatClass::SignalingNan);

    let quiet = |p: FloatParts| {
        if p.class == FloatClass::SignalingNan {
            silence_nan(p, policy.snan_convention)
        } else {
            p
        }
    };

    match choose_nan(
        a_is_nan,
        a.class == FloatClass::SignalingNan,
        b_is_nan,
        b.class == FloatClass::SignalingNan,
        a.frac.cmp(&b.frac),
        status,
        policy,
    ) {
        NanChoice::A => quiet(a),
        NanChoice::B => quiet(b),
        NanChoice::Default => default_nan(policy),
    }
}

/// The three operands of a fused multiply-add, used by [`pick_nan_muladd`]
/// to identify the `(inf * 0) + qnan` special case.
#[derive(Debug, Clone, Copy)]
pub struct MulAddOperands {
    /// First multiplicand.
    pub a: FloatParts,
    /// Second multiplicand.
    pub b: FloatParts,
    /// Addend.
    pub c: FloatParts,
}

/// Fused-multiply-add variant of target NaN selection. When `a * b` is an
/// invalid `inf * 0` product and `c` is a quiet NaN, several targets (ARM,
/// MIPS-2008, PowerPC) still propagate `c` rather than forcing the default
/// NaN; this mirrors `pickNaNMulAdd`'s per-target special case.
#[must_use]
pub fn pick_nan_muladd(
    operands: MulAddOperands,
    inf_times_zero: bool,
    status: &mut FloatStatus,
    policy: &TargetPolicy,
) -> FloatParts {
    if inf_times_zero {
        status.raise(ExceptionFlags::INVALID);
        let c_is_quiet_nan = operands.c.class == FloatClass::QuietNan;
        return match policy.nan_policy {
            NanPolicy::X87 => default_nan(policy),
            NanPolicy::ArmMipsHppa | NanPolicy::PpcXtensaM68k if c_is_quiet_nan => operands.c,
            NanPolicy::ArmMipsHppa | NanPolicy::PpcXtensaM68k => default_nan(policy),
        };
    }

    let candidates = [operands.a, operands.b, operands.c];
    let first_nan_idx = candidates
        .iter()
        .position(|p| matches!(p.class, FloatClass::QuietNan | FloatClass::SignalingNan));
    let Some(first) = first_nan_idx else {
        unreachable!("pick_nan_muladd called with no NaN operand and no inf*0 case")
    };

    let any_signaling = candidates
        .iter()
        .any(|p| p.class == FloatClass::SignalingNan);
    if any_signaling {
        status.raise(ExceptionFlags::INVALID);
    }

    let quiet = |p: FloatParts| {
        if p.class == FloatClass::SignalingNan {
            silence_nan(p, policy.snan_convention)
        } else {
            p
        }
    };

    match policy.nan_policy {
        NanPolicy::X87 if any_signaling => default_nan(policy),
        NanPolicy::X87 => quiet(candidates[first]),
        NanPolicy::ArmMipsHppa => quiet(
            candidates
                .into_iter()
                .find(|p| matches!(p.class, FloatClass::QuietNan | FloatClass::SignalingNan))
                .unwrap_or(candidates[first]),
        ),
        NanPolicy::PpcXtensaM68k => quiet(
            candidates
                .into_iter()
                .rev()
                .find(|p| matches!(p.class, FloatClass::QuietNan | FloatClass::SignalingNan))
                .unwrap_or(candidates[first]),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TargetPolicy;

    fn qnan() -> FloatParts {
        FloatParts {
            class: FloatClass::QuietNan,
            sign: false,
            exp: 0,
            frac: CANONICAL_FRAC_MSB | 1,
        }
    }

    fn snan() -> FloatParts {
        FloatParts {
            class: FloatClass::SignalingNan,
            sign: false,
            exp: 0,
            frac: 1,
        }
    }

    #[test]
    fn silence_nan_sets_quiet_bit() {
        let quieted = silence_nan(snan(), SnanConvention::Ieee754_2008);
        assert_eq!(quieted.class, FloatClass::QuietNan);
        assert_ne!(quieted.frac & CANONICAL_FRAC_MSB, 0);
    }

    #[test]
    fn pick_nan_arm_prefers_first_operand() {
        let policy = TargetPolicy::ieee754();
        let mut status = FloatStatus::default();
        let a = qnan();
        let mut b = qnan();
        b.frac += 2;
        let picked = pick_nan(a, b, &mut status, &policy);
        assert_eq!(picked.frac, a.frac);
    }

    #[test]
    fn pick_nan_ppc_prefers_second_operand() {
        let policy = TargetPolicy {
            nan_policy: NanPolicy::PpcXtensaM68k,
            ..TargetPolicy::ieee754()
        };
        let mut status = FloatStatus::default();
        let a = qnan();
        let mut b = qnan();
        b.frac += 2;
        let picked = pick_nan(a, b, &mut status, &policy);
        assert_eq!(picked.frac, b.frac);
    }

    #[test]
    fn pick_nan_x87_snan_and_qnan_propagates_the_qnan() {
        let policy = TargetPolicy::x87();
        let mut status = FloatStatus::default();
        let picked = pick_nan(snan(), qnan(), &mut status, &policy);
        assert_eq!(picked.frac, qnan().frac);
    }

    #[test]
    fn pick_nan_x87_two_snans_picks_larger_significand() {
        let policy = TargetPolicy::x87();
        let mut status = FloatStatus::default();
        let a = snan();
        let mut b = snan();
        b.frac += 2;
        let picked = pick_nan(a, b, &mut status, &policy);
        assert_eq!(picked.frac, silence_nan(b, policy.snan_convention).frac);
    }

    #[test]
    fn pick_nan_x87_two_snans_tied_significand_picks_default() {
        let policy = TargetPolicy::x87();
        let mut status = FloatStatus::default();
        let picked = pick_nan(snan(), snan(), &mut status, &policy);
        assert_eq!(picked.frac, default_nan(&policy).frac);
    }

    #[test]
    fn pick_nan_raises_invalid_on_signaling_input() {
        let policy = TargetPolicy::ieee754();
        let mut status = FloatStatus::default();
        let _ = pick_nan(snan(), qnan(), &mut status, &policy);
        assert!(status.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn pick_nan_muladd_inf_zero_propagates_c_on_arm() {
        let policy = TargetPolicy::ieee754();
        let mut status = FloatStatus::default();
        let c = qnan();
        let operands = MulAddOperands {
            a: qnan(),
            b: qnan(),
            c,
        };
        let picked = pick_nan_muladd(operands, true, &mut status, &policy);
        assert_eq!(picked.frac, c.frac);
        assert!(status.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn choose_nan_prefers_the_only_nan_operand() {
        let policy = TargetPolicy::x87();
        let mut status = FloatStatus::default();
        assert_eq!(
            choose_nan(false, false, true, false, std::cmp::Ordering::Equal, &mut status, &policy),
            NanChoice::B
        );
        assert!(!status.flags.contains(ExceptionFlags::INVALID));
    }

    #[test]
    fn choose_nan_x87_snan_a_qnan_b_picks_b() {
        let policy = TargetPolicy::x87();
        let mut status = FloatStatus::default();
        assert_eq!(
            choose_nan(true, true, true, false, std::cmp::Ordering::Less, &mut status, &policy),
            NanChoice::B
        );
    }

    #[test]
    fn pick_nan_muladd_inf_zero_forces_default_on_x87() {
        let policy = TargetPolicy::x87();
        let mut status = FloatStatus::default();
        let operands = MulAddOperands {
            a: qnan(),
            b: qnan(),
            c: qnan(),
        };
        let picked = pick_nan_muladd(operands, true, &mut status, &policy);
        assert_eq!(picked.frac, default_nan(&policy).frac);
    }
}
