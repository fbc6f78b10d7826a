//! Tuning constants for the force derivations.

/// Neutral amplitude for unsigned force bytes.
pub const NEUTRAL_AMPLITUDE: f64 = 128.0;

/// Below this speed (m/s) the constant pull is off.
pub const CONSTANT_MIN_SPEED: f64 = 0.1;
/// Speed at which the constant pull reaches full gain.
pub const CONSTANT_FULL_GAIN_SPEED: f64 = 5.0;
/// Amplitude units per m/s² of lateral acceleration.
pub const LATERAL_GAIN: f64 = 32.0;
/// Brake input above which grip loss attenuates the pull.
pub const HARD_BRAKE_THRESHOLD: f64 = 0.7;
pub const HARD_BRAKE_FACTOR: f64 = 0.6;
pub const CONSTANT_MIN_AMPLITUDE: f64 = 8.0;
pub const CONSTANT_MAX_AMPLITUDE: f64 = 248.0;

pub const SPRING_MIN_SPEED: f64 = 0.10;
pub const SPRING_DEAD_START: u8 = 126;
pub const SPRING_DEAD_END: u8 = 130;
pub const SPRING_MAX_AMPLITUDE: f64 = 240.0;
pub const SPRING_MAX_SLOPE: f64 = 7.0;

pub const DAMPER_MIN_SLOPE: f64 = 2.0;
pub const DAMPER_MAX_SLOPE: f64 = 6.0;
/// Brake input above which the damper stiffens by one step.
pub const DAMPER_BRAKE_THRESHOLD: f64 = 0.3;
/// Largest value a 3-bit slope field holds.
pub const SLOPE3_MAX: i32 = 7;

pub const TRAPEZOID_MIN_SPEED: f64 = 0.5;
/// Speed at which the vibration is fastest and steepest.
pub const TRAPEZOID_FULL_SPEED: f64 = 30.0;
/// Per-tick deflection change (m) treated as a bump.
pub const BUMP_THRESHOLD: f64 = 0.005;
pub const BUMP_EXTRA: f64 = 4.0;
pub const TRAPEZOID_BASE_MAX: f64 = 116.0;
pub const TRAPEZOID_FLOOR_MAX: f64 = 96.0;
pub const TRAPEZOID_BASE_MIN: f64 = 140.0;
pub const TRAPEZOID_CEIL_MIN: f64 = 160.0;
pub const TRAPEZOID_MAX_STEP: u8 = 15;
pub const TRAPEZOID_BASE_PERIOD: f64 = 48.0;
pub const TRAPEZOID_MIN_PERIOD: u8 = 8;

