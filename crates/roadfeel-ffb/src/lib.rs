//! Telemetry-driven force feedback for classic Logitech wheels.
//!
//! ## Modules
//! - `derive` - pure telemetry to effect-parameter curves
//! - `wheel` - effect slots, playback tracking, and report output
//! - `simulator` - per-tick synthesis of all four effects
//! - `session` - frame pacing, pause handling, and rev LEDs
//! - `replay` - offline replay of recorded telemetry
//!
//! ```
//! use roadfeel_ffb::{Simulator, Wheel};
//! use roadfeel_hid_common::{HidDeviceInfo, mock::RecordingWriter};
//! use roadfeel_telemetry::TelemetryState;
//!
//! let writer = RecordingWriter::new();
//! let info = HidDeviceInfo::new(0x046D, 0xC24F, "/dev/hidraw0".into());
//! let mut simulator = Simulator::new(Wheel::open(info, writer.clone()));
//!
//! let state = TelemetryState {
//!     speed: Some(10.0),
//!     lateral_accel: 1.5,
//!     ..TelemetryState::default()
//! };
//! simulator.update(&state)?;
//! assert_eq!(simulator.wheel().constant_force().amplitude, 176);
//! # Ok::<(), roadfeel_ffb::WheelError>(())
//! ```

#![deny(static_mut_refs)]

pub mod constants;
pub mod derive;
pub mod replay;
pub mod session;
pub mod simulator;
pub mod wheel;

pub use derive::{
    DeflectionMemory, derive_constant, derive_damper, derive_spring, derive_trapezoid,
};
pub use replay::{ReplaySummary, replay_capture};
pub use session::{FfbSession, rpm_led_pattern, rpm_led_pattern_with};
pub use simulator::Simulator;
pub use wheel::{Wheel, WheelError, WheelResult};
