//! Vehicle telemetry as the force simulator sees it.
//!
//! ## Modules
//! - `state` - the per-tick [`TelemetryState`] snapshot
//! - `channels` - typed channel updates applied to the snapshot
//! - `clock` - frame-start timestamp accumulation
//! - `capture` - recorded event streams for offline replay

#![deny(static_mut_refs)]

pub mod capture;
pub mod channels;
pub mod clock;
pub mod state;

pub use capture::{CAPTURE_FORMAT_VERSION, CaptureError, CaptureEvent, TelemetryCapture};
pub use channels::{TelemetryChannel, TelemetryValue, ValueKind};
pub use clock::{FrameClock, FrameStart};
pub use state::{Orientation, TelemetryState, sanitize};
