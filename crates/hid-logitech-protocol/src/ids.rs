//! Logitech USB vendor, product, and command constants.

#![deny(static_mut_refs)]

use roadfeel_hid_common::DeviceId;

/// Logitech USB vendor ID.
pub const LOGITECH_VENDOR_ID: u16 = 0x046D;

/// Report IDs used by the classic protocol.
pub mod report_ids {
    /// Vendor-specific command prefix (range, LEDs, mode switch).
    pub const VENDOR: u8 = 0xF8;
    /// Report ID the PlayStation-mode wheels expect for the mode-switch command.
    pub const MODE_SWITCH: u8 = 0x30;
}

/// Command bytes carried after the 0xF8 vendor prefix.
pub mod commands {
    /// Set rev-light LEDs.
    pub const SET_LEDS: u8 = 0x12;
    /// Set wheel rotation range.
    pub const SET_RANGE: u8 = 0x81;
    /// Switch the wheel to a target compatibility mode.
    pub const MODE_SWITCH: u8 = 0x09;
    /// Mode id for G29 native operation.
    pub const MODE_G29: u8 = 0x05;
}

/// Low-nibble opcodes of slot commands; the high nibble carries the slot mask.
pub mod opcodes {
    pub const DOWNLOAD_CONSTANT: u8 = 0x00;
    pub const DOWNLOAD_SPRING: u8 = 0x01;
    pub const DOWNLOAD_DAMPER: u8 = 0x02;
    pub const PLAY: u8 = 0x02;
    pub const STOP: u8 = 0x03;
    pub const AUTOCENTER_ON: u8 = 0x04;
    pub const AUTOCENTER_OFF: u8 = 0x05;
    pub const DOWNLOAD_TRAPEZOID: u8 = 0x06;
    pub const REFRESH: u8 = 0x0C;
    pub const AUTOCENTER_SET: u8 = 0x0E;
}

/// Effect-type bytes (byte 1 of a download report).
pub mod effect_types {
    pub const CONSTANT: u8 = 0x00;
    pub const SPRING: u8 = 0x01;
    pub const DAMPER: u8 = 0x02;
    pub const TRAPEZOID: u8 = 0x06;
}

/// Known Logitech wheel product IDs.
pub mod product_ids {
    /// G29 racing wheel (PlayStation/PC, 900°).
    pub const G29_PS: u16 = 0xC24F;
    /// G923 racing wheel, PlayStation variant after the native-mode switch.
    pub const G923: u16 = 0xC266;
}

/// Packed device identifiers the init sequence is known for.
pub mod device_ids {
    use super::{DeviceId, LOGITECH_VENDOR_ID, product_ids};

    pub const G923_PS: DeviceId = DeviceId::new(LOGITECH_VENDOR_ID, product_ids::G923);
    pub const G29_PS4: DeviceId = DeviceId::new(LOGITECH_VENDOR_ID, product_ids::G29_PS);
}

pub const KNOWN_WHEEL_DEVICE_IDS: [DeviceId; 2] = [device_ids::G923_PS, device_ids::G29_PS4];
