//! Protocol variant resolution and Logitech model classification.

#![deny(static_mut_refs)]

use core::fmt;
use core::str::FromStr;

use roadfeel_hid_common::{DeviceId, HidDeviceInfo};
use serde::{Deserialize, Serialize};

use crate::ids::{LOGITECH_VENDOR_ID, product_ids};

/// Wire protocol family spoken by a force-feedback wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FfbProtocol {
    /// Four-slot classic protocol (G25 through G923).
    LogitechClassic,
    /// HID++ protocol. Recognized, but no operation is implemented yet.
    LogitechHidpp,
    /// Device from a vendor with no known protocol.
    Unsupported,
}

impl FfbProtocol {
    /// Resolve the protocol from a USB vendor ID.
    ///
    /// Unknown vendors resolve to [`FfbProtocol::Unsupported`], never to a guess.
    pub fn for_vendor(vendor_id: u16) -> Self {
        match vendor_id {
            LOGITECH_VENDOR_ID => Self::LogitechClassic,
            _ => Self::Unsupported,
        }
    }

    pub fn for_device(info: &HidDeviceInfo) -> Self {
        Self::for_vendor(info.vendor_id)
    }

    /// Whether this variant has a working encoder.
    pub fn is_implemented(self) -> bool {
        matches!(self, Self::LogitechClassic)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LogitechClassic => "logitech_classic",
            Self::LogitechHidpp => "logitech_hidpp",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FfbProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FfbProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logitech_classic" | "classic" => Ok(Self::LogitechClassic),
            "logitech_hidpp" | "hidpp" => Ok(Self::LogitechHidpp),
            "unsupported" => Ok(Self::Unsupported),
            other => Err(format!("unknown protocol '{other}'")),
        }
    }
}

/// Logitech wheel models the init sequence knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogitechModel {
    /// G29 racing wheel, PlayStation 4 variant (900°).
    G29Ps4,
    /// G923 racing wheel, PlayStation variant in native mode (900°).
    G923Ps,
    /// Any other device.
    Unknown,
}

impl LogitechModel {
    /// Classify a packed device id. The vendor half must be Logitech.
    pub fn from_device_id(device_id: DeviceId) -> Self {
        if device_id.vendor_id() != LOGITECH_VENDOR_ID {
            return Self::Unknown;
        }
        match device_id.product_id() {
            product_ids::G29_PS => Self::G29Ps4,
            product_ids::G923 => Self::G923Ps,
            _ => Self::Unknown,
        }
    }

    /// Maximum wheel rotation in degrees.
    pub fn max_rotation_deg(self) -> u16 {
        900
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::G29Ps4 => "Logitech G29 (PS4)",
            Self::G923Ps => "Logitech G923 (PS)",
            Self::Unknown => "Unknown device",
        }
    }
}

/// Return `true` if the device id is one the init sequence supports.
pub fn is_known_wheel(device_id: DeviceId) -> bool {
    LogitechModel::from_device_id(device_id) != LogitechModel::Unknown
}
