//! Logitech classic output report encoding.
//!
//! All functions are pure: they take a protocol variant plus arguments and
//! return a [`Report`] or a [`ProtocolError`]. Nothing here touches a device.
//!
//! # Protocol notes
//!
//! The classic protocol addresses four effect slots. Slot commands carry the
//! slot bitmask in the high nibble of byte 0 and an opcode in the low nibble:
//!
//! ```text
//! Byte 0: (slots << 4) | opcode
//!   opcodes: 0x0-0x6 = download (per effect type), 0x2 = play, 0x3 = stop,
//!            0x4 = autocenter on, 0x5 = autocenter off, 0xC = refresh,
//!            0xE = autocenter set
//! Bytes 1..: command-specific
//! ```
//!
//! | Effect    | Byte 1 | Parameters |
//! |-----------|--------|------------|
//! | Constant  | `0x00` | amplitude repeated four times (0x80 = no force) |
//! | Spring    | `0x01` | dead band, packed 3-bit slopes, packed invert bits, amplitude |
//! | Damper    | `0x02` | slope/invert pairs, left then right |
//! | Trapezoid | `0x06` | amplitudes, hold times, packed slope steps |
//!
//! Vendor commands (LEDs, range, mode switch) use the `0xF8` prefix instead.

#![deny(static_mut_refs)]

use core::fmt;

use roadfeel_hid_common::DeviceId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{ForceEffect, SlotMask};
use crate::error::{ProtocolError, reject};
use crate::fields::{LedPattern, pack_nibbles};
use crate::ids::{commands, effect_types, opcodes, report_ids};
use crate::report::Report;
use crate::types::{FfbProtocol, is_known_wheel};

/// Rotation range applied by the init sequence, in degrees.
pub const DEFAULT_ROTATION_RANGE_DEG: u16 = 900;

pub type EncodeResult = Result<Report, ProtocolError>;

/// Commands accepted by the two dispatching builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    AutocenterOn,
    AutocenterOff,
    AutocenterSet,
    SetLeds,
    Download,
    Play,
    Refresh,
    Stop,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::AutocenterOn,
        Command::AutocenterOff,
        Command::AutocenterSet,
        Command::SetLeds,
        Command::Download,
        Command::Play,
        Command::Refresh,
        Command::Stop,
    ];

    /// Whether the command is addressed by slot mask alone.
    pub fn takes_slots(self) -> bool {
        matches!(
            self,
            Command::AutocenterOn | Command::AutocenterOff | Command::Play | Command::Stop
        )
    }

    /// Whether the command carries a full effect parameter set.
    pub fn takes_effect(self) -> bool {
        matches!(
            self,
            Command::AutocenterSet | Command::Download | Command::Refresh
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::AutocenterOn => "autocenter_on",
            Command::AutocenterOff => "autocenter_off",
            Command::AutocenterSet => "autocenter_set",
            Command::SetLeds => "set_leds",
            Command::Download => "download",
            Command::Play => "play",
            Command::Refresh => "refresh",
            Command::Stop => "stop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gate every builder on the protocol variant.
fn require_classic(protocol: FfbProtocol, operation: &'static str) -> Result<(), ProtocolError> {
    match protocol {
        FfbProtocol::LogitechClassic => Ok(()),
        FfbProtocol::LogitechHidpp => Err(reject(
            operation,
            ProtocolError::NotImplemented {
                protocol,
                operation,
            },
        )),
        FfbProtocol::Unsupported => Err(reject(
            operation,
            ProtocolError::UnsupportedProtocol {
                protocol,
                operation,
            },
        )),
    }
}

/// Dispatch a slot-only command.
///
/// Accepts autocenter on/off, play, and stop. Commands that need effect
/// parameters fail with [`ProtocolError::MissingParameters`].
pub fn build_slot_report(protocol: FfbProtocol, command: Command, slots: SlotMask) -> EncodeResult {
    match command {
        Command::AutocenterOff => build_disable_autocenter_report(protocol, slots),
        Command::AutocenterOn => build_enable_autocenter_report(protocol, slots),
        Command::Play => build_play_report(protocol, slots),
        Command::Stop => build_stop_report(protocol, slots),
        Command::AutocenterSet | Command::Download | Command::Refresh => Err(reject(
            "build_slot_report",
            ProtocolError::MissingParameters(command),
        )),
        Command::SetLeds => Err(reject(
            "build_slot_report",
            ProtocolError::MalformedCommand {
                command,
                reason: "LED patterns go through build_led_report",
            },
        )),
    }
}

/// Dispatch a parameterized command.
///
/// Accepts autocenter set, download, and refresh. Slot-only commands fail
/// with [`ProtocolError::ExcessParameters`].
pub fn build_force_report(
    protocol: FfbProtocol,
    command: Command,
    effect: &ForceEffect,
) -> EncodeResult {
    match command {
        Command::AutocenterSet => build_set_autocenter_report(protocol, effect),
        Command::Download => build_download_report(protocol, effect),
        Command::Refresh => build_refresh_report(protocol, effect),
        Command::AutocenterOn | Command::AutocenterOff | Command::Play | Command::Stop => Err(
            reject("build_force_report", ProtocolError::ExcessParameters(command)),
        ),
        Command::SetLeds => Err(reject(
            "build_force_report",
            ProtocolError::MalformedCommand {
                command,
                reason: "LED patterns go through build_led_report",
            },
        )),
    }
}

/// Build the 4-byte rev-light LED report (0xF8, cmd 0x12).
pub fn build_led_report(protocol: FfbProtocol, pattern: LedPattern) -> EncodeResult {
    require_classic(protocol, "set_led_pattern")?;
    Ok(Report::new([
        report_ids::VENDOR,
        commands::SET_LEDS,
        pattern.get(),
        0x00,
    ]))
}

/// Build the 7-byte set-range report (0xF8, cmd 0x81), range little-endian.
pub fn build_range_report(protocol: FfbProtocol, degrees: u16) -> EncodeResult {
    require_classic(protocol, "set_range")?;
    let [lo, hi] = degrees.to_le_bytes();
    Ok(Report::new([
        report_ids::VENDOR,
        commands::SET_RANGE,
        lo,
        hi,
        0x00,
        0x00,
        0x00,
    ]))
}

pub fn build_disable_autocenter_report(protocol: FfbProtocol, slots: SlotMask) -> EncodeResult {
    require_classic(protocol, "disable_autocenter")?;
    Ok(Report::new([slots.command_byte(opcodes::AUTOCENTER_OFF)]))
}

pub fn build_enable_autocenter_report(protocol: FfbProtocol, slots: SlotMask) -> EncodeResult {
    require_classic(protocol, "enable_autocenter")?;
    Ok(Report::new([slots.command_byte(opcodes::AUTOCENTER_ON)]))
}

/// Configure the device-native autocenter spring from spring parameters.
///
/// The slope bytes are OR-ed with `0b111`, so the device always receives
/// the steepest slope regardless of the input.
pub fn build_set_autocenter_report(protocol: FfbProtocol, effect: &ForceEffect) -> EncodeResult {
    require_classic(protocol, "set_autocenter")?;
    let ForceEffect::Spring(spring) = effect else {
        return Err(reject(
            "set_autocenter",
            ProtocolError::MalformedCommand {
                command: Command::AutocenterSet,
                reason: "autocenter parameters must be a spring effect",
            },
        ));
    };
    Ok(Report::new([
        spring.slot.command_byte(opcodes::AUTOCENTER_SET),
        0x00,
        spring.slope_left.get() | 0b0111,
        spring.slope_right.get() | 0b0111,
        spring.amplitude,
        0x00,
    ]))
}

/// Build the 7-byte download report for any effect kind.
pub fn build_download_report(protocol: FfbProtocol, effect: &ForceEffect) -> EncodeResult {
    require_classic(protocol, "download_force")?;
    let report = match effect {
        ForceEffect::Constant(f) => {
            let amp = f.amplitude;
            Report::new([
                f.slot.command_byte(opcodes::DOWNLOAD_CONSTANT),
                effect_types::CONSTANT,
                amp,
                amp,
                amp,
                amp,
                0x00,
            ])
        }
        ForceEffect::Spring(f) => Report::new([
            f.slot.command_byte(opcodes::DOWNLOAD_SPRING),
            effect_types::SPRING,
            f.dead_start,
            f.dead_end,
            pack_nibbles(f.slope_right.get(), f.slope_left.get()),
            pack_nibbles(f.invert_right.get(), f.invert_left.get()),
            f.amplitude,
        ]),
        ForceEffect::Damper(f) => Report::new([
            f.slot.command_byte(opcodes::DOWNLOAD_DAMPER),
            effect_types::DAMPER,
            f.slope_left.get(),
            f.invert_left.get(),
            f.slope_right.get(),
            f.invert_right.get(),
            0x00,
        ]),
        ForceEffect::Trapezoid(f) => Report::new([
            f.slot.command_byte(opcodes::DOWNLOAD_TRAPEZOID),
            effect_types::TRAPEZOID,
            f.amplitude_max,
            f.amplitude_min,
            f.t_at_max,
            f.t_at_min,
            pack_nibbles(f.slope_step_x.get(), f.slope_step_y.get()),
        ]),
    };
    Ok(report)
}

pub fn build_play_report(protocol: FfbProtocol, slots: SlotMask) -> EncodeResult {
    require_classic(protocol, "play_force")?;
    Ok(Report::new([slots.command_byte(opcodes::PLAY), 0x00]))
}

/// Same bytes as the download report with the opcode nibble set to 0xC.
pub fn build_refresh_report(protocol: FfbProtocol, effect: &ForceEffect) -> EncodeResult {
    require_classic(protocol, "refresh_force")?;
    let mut report = build_download_report(protocol, effect)?;
    report.replace_opcode(opcodes::REFRESH);
    Ok(report)
}

pub fn build_stop_report(protocol: FfbProtocol, slots: SlotMask) -> EncodeResult {
    require_classic(protocol, "stop_force")?;
    Ok(Report::new([slots.command_byte(opcodes::STOP), 0x00]))
}

/// Reports that put a known wheel into native mode at full range.
///
/// The mode switch is sent on report ID 0x30, followed by a 900° range.
/// Unknown device ids fail with [`ProtocolError::UnknownDevice`].
pub fn build_init_sequence(
    protocol: FfbProtocol,
    device_id: DeviceId,
) -> Result<Vec<Report>, ProtocolError> {
    require_classic(protocol, "init_sequence")?;
    if !is_known_wheel(device_id) {
        return Err(reject(
            "init_sequence",
            ProtocolError::UnknownDevice(device_id),
        ));
    }
    debug!(device = %device_id, "building native-mode init sequence");
    Ok(vec![
        Report::new([
            report_ids::MODE_SWITCH,
            report_ids::VENDOR,
            commands::MODE_SWITCH,
            commands::MODE_G29,
            0x01,
        ]),
        build_range_report(protocol, DEFAULT_ROTATION_RANGE_DEG)?,
    ])
}
