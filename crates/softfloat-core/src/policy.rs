//! Target-variant selection: NaN propagation policy, default-NaN payload
//! pattern, and the signaling-bit convention.
//!
//! `spec.md` §4.5/§9 asks for a runtime policy object in place of the
//! original's `#if defined(TARGET_...)` conditional compilation. Grounded in
//! `examples/original_source/fpu/softfloat-specialize.inc.c`'s per-target
//! `#ifdef` ladders for `parts_default_nan`, `pickNaN`, and `pickNaNMulAdd`,
//! and shaped like the teacher's plain-data `Config` (`config.rs`): a
//! `Copy + Default` struct, serde-derivable so a host emulator can select a
//! guest's policy from a config file the way the teacher's `Config` is
//! loaded from JSON.

use serde::{Deserialize, Serialize};

/// Which of `softfloat-specialize.inc.c`'s three `pickNaN` policies a target
/// uses to choose a result NaN when two quiet NaN operands collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NanPolicy {
    /// ARM, MIPS, HPPA: prefer the first operand.
    #[default]
    ArmMipsHppa,
    /// PowerPC, Xtensa, M68K: prefer the second operand.
    PpcXtensaM68k,
    /// x87: an sNaN paired with a qNaN propagates the qNaN; otherwise the
    /// operand with the larger significand wins, ties favoring the default.
    X87,
}

/// Which of `softfloat-specialize.inc.c`'s four default-NaN bit patterns a
/// target's `parts_default_nan` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefaultNanPattern {
    /// Sign 0, all fraction bits set (e.g. MIPS legacy, PPC).
    AllFractionBits,
    /// Sign 1, MSB of fraction set, rest clear (ARM, RISC-V, SPARC).
    #[default]
    SignAndMsb,
    /// Sign 0, all fraction bits except the MSB set (MIPS2008 variant).
    MsbMinusOne,
    /// Sign 1, MSB set, rest clear, matching the plain IEEE-754 convention
    /// used when no target-specific pattern applies (x87, most others).
    Ieee754Default,
}

/// Which bit value of a NaN's payload MSB marks it signaling versus quiet.
/// IEEE 754-2008 fixed this at 0 (signaling), but several older targets
/// (MIPS pre-2008, HPPA, legacy PA-RISC) used the opposite convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnanConvention {
    /// MSB clear signals signaling (the IEEE 754-2008 convention).
    #[default]
    Ieee754_2008,
    /// MSB set signals signaling (legacy MIPS/HPPA convention).
    BitIsOne,
}

/// Bundled target policy: NaN collision rule, default-NaN pattern, and
/// signaling-bit convention, held by [`crate::status::FloatStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetPolicy {
    /// Two-quiet-NaN collision policy.
    pub nan_policy: NanPolicy,
    /// Default NaN bit pattern produced by `parts_default_nan`.
    pub default_nan_pattern: DefaultNanPattern,
    /// Signaling-bit convention for `parts_is_snan_frac`.
    pub snan_convention: SnanConvention,
}

impl TargetPolicy {
    /// The plain IEEE 754-2008 policy with no target quirks: prefer the
    /// first operand on collision, ARM-style default NaN, MSB-clear-means-
    /// signaling.
    #[must_use]
    pub const fn ieee754() -> Self {
        Self {
            nan_policy: NanPolicy::ArmMipsHppa,
            default_nan_pattern: DefaultNanPattern::SignAndMsb,
            snan_convention: SnanConvention::Ieee754_2008,
        }
    }

    /// The x87 policy: larger-significand-wins on collision (ties favor the
    /// default NaN), IEEE convention otherwise.
    #[must_use]
    pub const fn x87() -> Self {
        Self {
            nan_policy: NanPolicy::X87,
            default_nan_pattern: DefaultNanPattern::Ieee754Default,
            snan_convention: SnanConvention::Ieee754_2008,
        }
    }

    /// The legacy MIPS-1985 / HPPA policy: second-operand preference on
    /// collision combined with the inverted signaling-bit convention.
    #[must_use]
    pub const fn mips_legacy() -> Self {
        Self {
            nan_policy: NanPolicy::ArmMipsHppa,
            default_nan_pattern: DefaultNanPattern::AllFractionBits,
            snan_convention: SnanConvention::BitIsOne,
        }
    }
}

/// Error returned when a [`TargetPolicy`] fails to deserialize from a
/// caller-supplied configuration source.
#[derive(Debug, thiserror::Error)]
pub enum PolicyConfigError {
    /// The configuration source was not valid JSON, or did not match the
    /// shape of [`TargetPolicy`].
    #[error("invalid target policy configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

impl TargetPolicy {
    /// Parses a `TargetPolicy` from a JSON configuration string, the way a
    /// host emulator would load a guest's FPU quirks from a config file.
    pub fn from_json(source: &str) -> Result<Self, PolicyConfigError> {
        serde_json::from_str(source).map_err(PolicyConfigError::from)
    }
}
