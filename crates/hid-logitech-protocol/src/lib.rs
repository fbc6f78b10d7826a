//! Logitech classic force-feedback protocol: effect model and report encoding.
//!
//! This crate is intentionally I/O-free. It provides the force-effect sum
//! type, the small bit-packed field types the wire format needs, and pure
//! encoder functions that turn a command plus its arguments into a
//! fixed-capacity [`Report`]. Sending the bytes is the caller's job.

#![deny(static_mut_refs)]

pub mod effects;
pub mod error;
pub mod fields;
pub mod ids;
pub mod output;
pub mod report;
pub mod types;

pub use effects::{
    ConstantForce, DamperForce, EffectKind, ForceEffect, InvalidSlotMask, SlotMask, SpringForce,
    TrapezoidForce,
};
pub use error::{ErrorCategory, ProtocolError, ReportResultExt};
pub use fields::{InvertBit, LedPattern, Nibble, Slope3, pack_nibbles, unpack_nibbles};
pub use ids::{KNOWN_WHEEL_DEVICE_IDS, LOGITECH_VENDOR_ID, device_ids, product_ids};
pub use output::{
    Command, DEFAULT_ROTATION_RANGE_DEG, EncodeResult, build_disable_autocenter_report,
    build_download_report, build_enable_autocenter_report, build_force_report,
    build_init_sequence, build_led_report, build_play_report, build_range_report,
    build_refresh_report, build_set_autocenter_report, build_slot_report, build_stop_report,
};
pub use report::{REPORT_CAPACITY, Report};
pub use types::{FfbProtocol, LogitechModel, is_known_wheel};
