//! Per-tick vehicle telemetry snapshot.

use serde::{Deserialize, Serialize};

/// Replace NaN and infinities with zero.
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Vehicle attitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Latest known value of every channel the force simulator reads.
///
/// Channels update independently, so a snapshot may mix values from
/// different simulation steps. `None` means the channel has not reported
/// yet; the accessors read such values as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryState {
    /// Accumulated simulation time, excluding pauses (µs).
    pub timestamp: u64,
    pub raw_render_timestamp: u64,
    pub raw_simulation_timestamp: u64,
    pub raw_paused_simulation_timestamp: u64,

    pub orientation: Option<Orientation>,

    pub steering: Option<f32>,
    pub throttle: Option<f32>,
    pub brake: Option<f32>,
    pub clutch: Option<f32>,

    /// Signed forward speed in m/s.
    pub speed: Option<f32>,
    pub rpm: Option<f32>,
    pub gear: Option<i32>,

    /// Surface under each front wheel; 0 is regular road.
    pub substance_left: Option<u32>,
    pub substance_right: Option<u32>,

    /// Lateral acceleration in m/s², positive to the right.
    pub lateral_accel: f32,

    /// Suspension deflection in meters.
    pub suspension_deflection_left: f32,
    pub suspension_deflection_right: f32,
}

impl TelemetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speed magnitude in m/s.
    pub fn abs_speed(&self) -> f32 {
        sanitize(self.speed.unwrap_or(0.0)).abs()
    }

    pub fn brake_or_zero(&self) -> f32 {
        sanitize(self.brake.unwrap_or(0.0))
    }

    pub fn rpm_or_zero(&self) -> f32 {
        sanitize(self.rpm.unwrap_or(0.0))
    }

    pub fn lateral_accel(&self) -> f32 {
        sanitize(self.lateral_accel)
    }

    /// `(left, right)` suspension deflection, sanitized.
    pub fn deflection(&self) -> (f32, f32) {
        (
            sanitize(self.suspension_deflection_left),
            sanitize(self.suspension_deflection_right),
        )
    }

    /// Either front wheel is on a non-road surface.
    pub fn is_offroad(&self) -> bool {
        self.substance_left.unwrap_or(0) != 0 || self.substance_right.unwrap_or(0) != 0
    }
}
