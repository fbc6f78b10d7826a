//! Telemetry to effect-parameter derivations.
//!
//! Every function here is pure arithmetic on a sanitized snapshot. Speed is
//! always the magnitude of the signed forward speed. Float-to-byte
//! conversions truncate toward zero after clamping.

use roadfeel_hid_logitech_protocol::{
    ConstantForce, DamperForce, Nibble, Slope3, SpringForce, TrapezoidForce,
};
use roadfeel_telemetry::TelemetryState;

use crate::constants::*;

/// Suspension deflection seen on the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeflectionMemory {
    pub left: f32,
    pub right: f32,
}

impl DeflectionMemory {
    /// Largest per-side change since the remembered reading.
    pub fn delta(&self, left: f32, right: f32) -> f64 {
        let dl = f64::from((left - self.left).abs());
        let dr = f64::from((right - self.right).abs());
        dl.max(dr)
    }

    pub fn remember(&mut self, left: f32, right: f32) {
        self.left = left;
        self.right = right;
    }
}

fn speed(state: &TelemetryState) -> f64 {
    f64::from(state.abs_speed())
}

/// Lateral pull proportional to cornering load.
///
/// Ramps in over the first 5 m/s and is attenuated under hard braking.
pub fn derive_constant(state: &TelemetryState) -> ConstantForce {
    let mut force = ConstantForce::default();
    let speed = speed(state);
    if speed < CONSTANT_MIN_SPEED {
        return force;
    }

    let speed_factor = (speed / CONSTANT_FULL_GAIN_SPEED).clamp(0.0, 1.0);
    let raw = f64::from(state.lateral_accel()) * LATERAL_GAIN * speed_factor;
    let brake_factor = if f64::from(state.brake_or_zero()) > HARD_BRAKE_THRESHOLD {
        HARD_BRAKE_FACTOR
    } else {
        1.0
    };
    let amplitude = (NEUTRAL_AMPLITUDE + raw * brake_factor)
        .clamp(CONSTANT_MIN_AMPLITUDE, CONSTANT_MAX_AMPLITUDE);

    force.enabled = true;
    force.amplitude = amplitude as u8;
    force
}

/// Slope of the centering spring, 2 at walking pace up to 7 at 30 m/s.
pub fn spring_slope(speed: f64) -> u8 {
    let slope = if speed <= 3.0 {
        2.0
    } else if speed <= 15.0 {
        2.0 + (speed - 3.0) / 12.0 * 3.0
    } else {
        (5.0 + (speed - 15.0) / 15.0 * 2.0).min(SPRING_MAX_SLOPE)
    };
    slope as u8
}

pub fn spring_amplitude(speed: f64) -> u8 {
    let amplitude = if speed <= 5.0 {
        64.0 + speed * 12.0
    } else if speed <= 20.0 {
        124.0 + (speed - 5.0) * 5.0
    } else {
        199.0 + (speed - 20.0) * 2.0
    };
    amplitude.min(SPRING_MAX_AMPLITUDE) as u8
}

/// Centering spring that stiffens with speed. Off when stationary.
pub fn derive_spring(state: &TelemetryState) -> SpringForce {
    let mut force = SpringForce::default();
    let speed = speed(state);
    if speed < SPRING_MIN_SPEED {
        return force;
    }

    let slope = Slope3::saturating(spring_slope(speed));
    force.enabled = true;
    force.dead_start = SPRING_DEAD_START;
    force.dead_end = SPRING_DEAD_END;
    force.slope_left = slope;
    force.slope_right = slope;
    force.amplitude = spring_amplitude(speed);
    force
}

pub fn damper_slope(speed: f64, brake: f64) -> u8 {
    let base = (speed / 10.0 * 5.0).clamp(DAMPER_MIN_SLOPE, DAMPER_MAX_SLOPE);
    let bonus = i32::from(brake > DAMPER_BRAKE_THRESHOLD);
    let slope = (base as i32 + bonus).min(SLOPE3_MAX);
    Slope3::saturating(slope as u8).get()
}

/// Motion resistance. Always on; braking adds one step.
pub fn derive_damper(state: &TelemetryState) -> DamperForce {
    let slope = Slope3::saturating(damper_slope(
        speed(state),
        f64::from(state.brake_or_zero()),
    ));
    DamperForce {
        enabled: true,
        slope_left: slope,
        slope_right: slope,
        ..DamperForce::default()
    }
}

/// Off-road vibration, widened for a tick when a bump is detected.
///
/// `memory` is updated on every call, including when the effect is off,
/// so re-entering rough ground does not register a stale bump.
pub fn derive_trapezoid(state: &TelemetryState, memory: &mut DeflectionMemory) -> TrapezoidForce {
    let mut force = TrapezoidForce::default();
    let (left, right) = state.deflection();
    let speed = speed(state);
    if !state.is_offroad() || speed < TRAPEZOID_MIN_SPEED {
        memory.remember(left, right);
        return force;
    }

    let delta = memory.delta(left, right);
    memory.remember(left, right);
    let bump = if delta > BUMP_THRESHOLD { BUMP_EXTRA } else { 0.0 };

    let speed_scale = (speed / TRAPEZOID_FULL_SPEED).clamp(0.0, 1.0);
    let step = Nibble::saturating(((2.0 + 6.0 * speed_scale) as u8).min(TRAPEZOID_MAX_STEP));
    let period = ((TRAPEZOID_BASE_PERIOD - 32.0 * speed_scale) as u8).max(TRAPEZOID_MIN_PERIOD);

    force.enabled = true;
    force.amplitude_max = (TRAPEZOID_BASE_MAX - bump).max(TRAPEZOID_FLOOR_MAX) as u8;
    force.amplitude_min = (TRAPEZOID_BASE_MIN + bump).min(TRAPEZOID_CEIL_MIN) as u8;
    force.t_at_max = period;
    force.t_at_min = period;
    force.slope_step_x = step;
    force.slope_step_y = step;
    force
}
