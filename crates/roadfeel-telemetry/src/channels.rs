//! Typed channel ingestion.
//!
//! A host simulation publishes telemetry as named channels, each carrying a
//! value of a fixed type. [`TelemetryState::apply`] stores one such update.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{Orientation, TelemetryState};

/// Degrees per full turn; euler channels report angles in turns.
const DEGREES_PER_TURN: f32 = 360.0;

/// Channels the force simulator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryChannel {
    Orientation,
    Speed,
    EngineRpm,
    EngineGear,
    Steering,
    Throttle,
    Brake,
    Clutch,
    SubstanceLeft,
    SubstanceRight,
    /// Local linear acceleration; only the lateral (x) component is kept.
    LinearAcceleration,
    SuspensionDeflectionLeft,
    SuspensionDeflectionRight,
}

impl TelemetryChannel {
    pub const ALL: [TelemetryChannel; 13] = [
        TelemetryChannel::Orientation,
        TelemetryChannel::Speed,
        TelemetryChannel::EngineRpm,
        TelemetryChannel::EngineGear,
        TelemetryChannel::Steering,
        TelemetryChannel::Throttle,
        TelemetryChannel::Brake,
        TelemetryChannel::Clutch,
        TelemetryChannel::SubstanceLeft,
        TelemetryChannel::SubstanceRight,
        TelemetryChannel::LinearAcceleration,
        TelemetryChannel::SuspensionDeflectionLeft,
        TelemetryChannel::SuspensionDeflectionRight,
    ];

    /// Value type the channel is registered with.
    pub fn value_kind(self) -> ValueKind {
        match self {
            TelemetryChannel::Orientation => ValueKind::Euler,
            TelemetryChannel::EngineGear => ValueKind::S32,
            TelemetryChannel::SubstanceLeft | TelemetryChannel::SubstanceRight => ValueKind::U32,
            TelemetryChannel::LinearAcceleration => ValueKind::FVector,
            TelemetryChannel::Speed
            | TelemetryChannel::EngineRpm
            | TelemetryChannel::Steering
            | TelemetryChannel::Throttle
            | TelemetryChannel::Brake
            | TelemetryChannel::Clutch
            | TelemetryChannel::SuspensionDeflectionLeft
            | TelemetryChannel::SuspensionDeflectionRight => ValueKind::Float,
        }
    }

    /// Whether the host may report the channel with no value at all.
    pub fn accepts_no_value(self) -> bool {
        matches!(
            self,
            TelemetryChannel::Orientation
                | TelemetryChannel::SubstanceLeft
                | TelemetryChannel::SubstanceRight
        )
    }
}

impl fmt::Display for TelemetryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TelemetryChannel::Orientation => "orientation",
            TelemetryChannel::Speed => "speed",
            TelemetryChannel::EngineRpm => "engine_rpm",
            TelemetryChannel::EngineGear => "engine_gear",
            TelemetryChannel::Steering => "steering",
            TelemetryChannel::Throttle => "throttle",
            TelemetryChannel::Brake => "brake",
            TelemetryChannel::Clutch => "clutch",
            TelemetryChannel::SubstanceLeft => "substance_left",
            TelemetryChannel::SubstanceRight => "substance_right",
            TelemetryChannel::LinearAcceleration => "linear_acceleration",
            TelemetryChannel::SuspensionDeflectionLeft => "suspension_deflection_left",
            TelemetryChannel::SuspensionDeflectionRight => "suspension_deflection_right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Float,
    S32,
    U32,
    FVector,
    Euler,
}

/// A single channel value as published by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TelemetryValue {
    Float(f32),
    S32(i32),
    U32(u32),
    FVector { x: f32, y: f32, z: f32 },
    /// Angles in turns (0.0..1.0 is one revolution).
    Euler { heading: f32, pitch: f32, roll: f32 },
}

impl TelemetryValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TelemetryValue::Float(_) => ValueKind::Float,
            TelemetryValue::S32(_) => ValueKind::S32,
            TelemetryValue::U32(_) => ValueKind::U32,
            TelemetryValue::FVector { .. } => ValueKind::FVector,
            TelemetryValue::Euler { .. } => ValueKind::Euler,
        }
    }
}

impl TelemetryState {
    /// Store one channel update.
    ///
    /// `None` clears the orientation and is otherwise ignored. A value whose
    /// type does not match the channel is dropped. Returns whether the state
    /// changed.
    pub fn apply(&mut self, channel: TelemetryChannel, value: Option<TelemetryValue>) -> bool {
        let Some(value) = value else {
            if !channel.accepts_no_value() {
                debug!(%channel, "ignoring empty channel update");
                return false;
            }
            match channel {
                TelemetryChannel::SubstanceLeft => self.substance_left = None,
                TelemetryChannel::SubstanceRight => self.substance_right = None,
                _ => self.orientation = None,
            }
            return true;
        };

        match (channel, value) {
            (TelemetryChannel::Orientation, TelemetryValue::Euler { heading, pitch, roll }) => {
                self.orientation = Some(Orientation {
                    heading: heading * DEGREES_PER_TURN,
                    pitch: pitch * DEGREES_PER_TURN,
                    roll: roll * DEGREES_PER_TURN,
                });
            }
            (TelemetryChannel::Speed, TelemetryValue::Float(v)) => self.speed = Some(v),
            (TelemetryChannel::EngineRpm, TelemetryValue::Float(v)) => self.rpm = Some(v),
            (TelemetryChannel::EngineGear, TelemetryValue::S32(v)) => self.gear = Some(v),
            (TelemetryChannel::Steering, TelemetryValue::Float(v)) => self.steering = Some(v),
            (TelemetryChannel::Throttle, TelemetryValue::Float(v)) => self.throttle = Some(v),
            (TelemetryChannel::Brake, TelemetryValue::Float(v)) => self.brake = Some(v),
            (TelemetryChannel::Clutch, TelemetryValue::Float(v)) => self.clutch = Some(v),
            (TelemetryChannel::SubstanceLeft, TelemetryValue::U32(v)) => {
                self.substance_left = Some(v)
            }
            (TelemetryChannel::SubstanceRight, TelemetryValue::U32(v)) => {
                self.substance_right = Some(v)
            }
            (TelemetryChannel::LinearAcceleration, TelemetryValue::FVector { x, .. }) => {
                self.lateral_accel = x
            }
            (TelemetryChannel::SuspensionDeflectionLeft, TelemetryValue::Float(v)) => {
                self.suspension_deflection_left = v
            }
            (TelemetryChannel::SuspensionDeflectionRight, TelemetryValue::Float(v)) => {
                self.suspension_deflection_right = v
            }
            (channel, value) => {
                debug!(
                    %channel,
                    expected = ?channel.value_kind(),
                    got = ?value.kind(),
                    "ignoring channel update with mismatched type"
                );
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_float_channels() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = TelemetryState::new();
        assert!(state.apply(TelemetryChannel::Speed, Some(TelemetryValue::Float(22.0))));
        assert!(state.apply(TelemetryChannel::Brake, Some(TelemetryValue::Float(0.4))));
        assert!(state.apply(
            TelemetryChannel::SuspensionDeflectionRight,
            Some(TelemetryValue::Float(0.02))
        ));
        assert_eq!(state.speed, Some(22.0));
        assert_eq!(state.brake, Some(0.4));
        assert_eq!(state.suspension_deflection_right, 0.02);
        Ok(())
    }

    #[test]
    fn test_linear_acceleration_keeps_x() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = TelemetryState::new();
        state.apply(
            TelemetryChannel::LinearAcceleration,
            Some(TelemetryValue::FVector {
                x: -1.25,
                y: 9.0,
                z: 3.0,
            }),
        );
        assert_eq!(state.lateral_accel, -1.25);
        Ok(())
    }

    #[test]
    fn test_orientation_converts_turns_and_clears() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = TelemetryState::new();
        state.apply(
            TelemetryChannel::Orientation,
            Some(TelemetryValue::Euler {
                heading: 0.25,
                pitch: 0.0,
                roll: 0.5,
            }),
        );
        let orientation = state.orientation.ok_or("orientation should be set")?;
        assert_eq!(orientation.heading, 90.0);
        assert_eq!(orientation.roll, 180.0);

        assert!(state.apply(TelemetryChannel::Orientation, None));
        assert_eq!(state.orientation, None);
        Ok(())
    }

    #[test]
    fn test_empty_substance_update_clears_offroad() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = TelemetryState::new();
        assert!(state.apply(TelemetryChannel::SubstanceLeft, Some(TelemetryValue::U32(3))));
        assert!(state.apply(TelemetryChannel::SubstanceRight, Some(TelemetryValue::U32(5))));
        assert!(state.is_offroad());

        assert!(state.apply(TelemetryChannel::SubstanceLeft, None));
        assert_eq!(state.substance_left, None);
        assert!(state.is_offroad());

        assert!(state.apply(TelemetryChannel::SubstanceRight, None));
        assert!(!state.is_offroad());
        Ok(())
    }

    #[test]
    fn test_mismatched_type_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = TelemetryState::new();
        assert!(!state.apply(TelemetryChannel::EngineGear, Some(TelemetryValue::Float(3.0))));
        assert_eq!(state.gear, None);
        assert!(!state.apply(TelemetryChannel::Speed, None));
        assert_eq!(state.speed, None);
        Ok(())
    }

    #[test]
    fn test_every_channel_accepts_its_own_kind() -> Result<(), Box<dyn std::error::Error>> {
        for channel in TelemetryChannel::ALL {
            let value = match channel.value_kind() {
                ValueKind::Float => TelemetryValue::Float(1.0),
                ValueKind::S32 => TelemetryValue::S32(1),
                ValueKind::U32 => TelemetryValue::U32(1),
                ValueKind::FVector => TelemetryValue::FVector {
                    x: 1.0,
                    y: 0.0,
                    z: 0.0,
                },
                ValueKind::Euler => TelemetryValue::Euler {
                    heading: 0.0,
                    pitch: 0.0,
                    roll: 0.0,
                },
            };
            let mut state = TelemetryState::new();
            assert!(state.apply(channel, Some(value)), "{channel} rejected {value:?}");
        }
        Ok(())
    }

    #[test]
    fn test_value_json_shape() -> Result<(), Box<dyn std::error::Error>> {
        let value: TelemetryValue = serde_json::from_str(r#"{"type":"u32","value":2}"#)?;
        assert_eq!(value, TelemetryValue::U32(2));
        let value: TelemetryValue =
            serde_json::from_str(r#"{"type":"f_vector","value":{"x":1.0,"y":0.0,"z":0.0}}"#)?;
        assert_eq!(value.kind(), ValueKind::FVector);
        Ok(())
    }
}
