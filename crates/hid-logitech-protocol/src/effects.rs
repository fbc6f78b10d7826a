//! Force-effect model for the four classic effect slots.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

use crate::fields::{InvertBit, Nibble, Slope3};

/// Bitmask selecting which effect slot(s) a command targets.
///
/// Only the low nibble is meaningful; it lands in the high nibble of the
/// command byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotMask(u8);

/// A slot mask with bits outside the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("slot mask {0:#04x} has bits above 0x0F")]
pub struct InvalidSlotMask(pub u8);

impl SlotMask {
    pub const CONSTANT: Self = Self(0b0001);
    pub const SPRING: Self = Self(0b0010);
    pub const DAMPER: Self = Self(0b0100);
    pub const TRAPEZOID: Self = Self(0b1000);
    /// Every slot; used by autocenter-wide and stop-all commands.
    pub const ALL: Self = Self(0b1111);

    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Command byte: slot mask in the high nibble, `opcode` in the low one.
    pub const fn command_byte(self, opcode: u8) -> u8 {
        (self.0 << 4) | (opcode & 0x0F)
    }
}

impl TryFrom<u8> for SlotMask {
    type Error = InvalidSlotMask;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !0x0F == 0 {
            Ok(Self(bits))
        } else {
            Err(InvalidSlotMask(bits))
        }
    }
}

impl From<SlotMask> for u8 {
    fn from(mask: SlotMask) -> Self {
        mask.0
    }
}

impl Default for SlotMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Discriminant of [`ForceEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Constant,
    Spring,
    Damper,
    Trapezoid,
}

impl EffectKind {
    /// All kinds in the order the simulator derives them.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Constant,
        EffectKind::Spring,
        EffectKind::Damper,
        EffectKind::Trapezoid,
    ];

    pub const fn slot(self) -> SlotMask {
        match self {
            EffectKind::Constant => SlotMask::CONSTANT,
            EffectKind::Spring => SlotMask::SPRING,
            EffectKind::Damper => SlotMask::DAMPER,
            EffectKind::Trapezoid => SlotMask::TRAPEZOID,
        }
    }
}

/// Constant pull. `amplitude` is unsigned with 0x80 as "no force".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantForce {
    pub slot: SlotMask,
    pub enabled: bool,
    pub amplitude: u8,
}

impl Default for ConstantForce {
    fn default() -> Self {
        Self {
            slot: SlotMask::CONSTANT,
            enabled: false,
            amplitude: 0x80,
        }
    }
}

/// Position-dependent centering spring with a dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpringForce {
    pub slot: SlotMask,
    pub enabled: bool,
    pub dead_start: u8,
    pub dead_end: u8,
    pub slope_left: Slope3,
    pub slope_right: Slope3,
    pub invert_left: InvertBit,
    pub invert_right: InvertBit,
    pub amplitude: u8,
}

impl Default for SpringForce {
    fn default() -> Self {
        Self {
            slot: SlotMask::SPRING,
            enabled: false,
            dead_start: 0,
            dead_end: 0,
            slope_left: Slope3::ZERO,
            slope_right: Slope3::ZERO,
            invert_left: InvertBit::ZERO,
            invert_right: InvertBit::ZERO,
            amplitude: 0,
        }
    }
}

/// Velocity-dependent resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamperForce {
    pub slot: SlotMask,
    pub enabled: bool,
    pub slope_left: Slope3,
    pub slope_right: Slope3,
    pub invert_left: InvertBit,
    pub invert_right: InvertBit,
}

impl Default for DamperForce {
    fn default() -> Self {
        Self {
            slot: SlotMask::DAMPER,
            enabled: false,
            slope_left: Slope3::ZERO,
            slope_right: Slope3::ZERO,
            invert_left: InvertBit::ZERO,
            invert_right: InvertBit::ZERO,
        }
    }
}

/// Periodic trapezoid wave oscillating between two amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapezoidForce {
    pub slot: SlotMask,
    pub enabled: bool,
    pub amplitude_max: u8,
    pub amplitude_min: u8,
    /// Time held at `amplitude_max`.
    pub t_at_max: u8,
    /// Time held at `amplitude_min`.
    pub t_at_min: u8,
    pub slope_step_x: Nibble,
    pub slope_step_y: Nibble,
}

impl Default for TrapezoidForce {
    fn default() -> Self {
        Self {
            slot: SlotMask::TRAPEZOID,
            enabled: false,
            amplitude_max: 0x80,
            amplitude_min: 0x80,
            t_at_max: 0,
            t_at_min: 0,
            slope_step_x: Nibble::ZERO,
            slope_step_y: Nibble::ZERO,
        }
    }
}

/// One effect slot's full parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceEffect {
    Constant(ConstantForce),
    Spring(SpringForce),
    Damper(DamperForce),
    Trapezoid(TrapezoidForce),
}

impl ForceEffect {
    pub fn kind(&self) -> EffectKind {
        match self {
            ForceEffect::Constant(_) => EffectKind::Constant,
            ForceEffect::Spring(_) => EffectKind::Spring,
            ForceEffect::Damper(_) => EffectKind::Damper,
            ForceEffect::Trapezoid(_) => EffectKind::Trapezoid,
        }
    }

    pub fn slot(&self) -> SlotMask {
        match self {
            ForceEffect::Constant(f) => f.slot,
            ForceEffect::Spring(f) => f.slot,
            ForceEffect::Damper(f) => f.slot,
            ForceEffect::Trapezoid(f) => f.slot,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            ForceEffect::Constant(f) => f.enabled,
            ForceEffect::Spring(f) => f.enabled,
            ForceEffect::Damper(f) => f.enabled,
            ForceEffect::Trapezoid(f) => f.enabled,
        }
    }
}

impl From<ConstantForce> for ForceEffect {
    fn from(f: ConstantForce) -> Self {
        ForceEffect::Constant(f)
    }
}

impl From<SpringForce> for ForceEffect {
    fn from(f: SpringForce) -> Self {
        ForceEffect::Spring(f)
    }
}

impl From<DamperForce> for ForceEffect {
    fn from(f: DamperForce) -> Self {
        ForceEffect::Damper(f)
    }
}

impl From<TrapezoidForce> for ForceEffect {
    fn from(f: TrapezoidForce) -> Self {
        ForceEffect::Trapezoid(f)
    }
}
