//! Command implementations for roadfeelctl

pub mod config;
pub mod device;
pub mod encode;
pub mod replay;

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use roadfeel_hid_common::DeviceId;
use roadfeel_hid_logitech_protocol::SlotMask;

#[derive(Subcommand, Debug)]
pub enum DeviceCommands {
    /// List wheels with a known init sequence
    List,

    /// Show how a vendor:product id would be driven
    Probe {
        /// Device id as vendor:product in hex, e.g. 046d:c24f
        #[arg(value_parser = parse_device_id)]
        device: DeviceId,
    },
}

#[derive(Subcommand, Debug)]
pub enum EncodeCommands {
    /// Rev-light LED pattern; only the low five bits are used
    Led {
        #[arg(value_parser = parse_byte)]
        pattern: u8,
    },

    /// Wheel rotation range in degrees
    Range { degrees: u16 },

    /// Native-mode init sequence for a device
    Init {
        #[arg(value_parser = parse_device_id, default_value = "046d:c24f")]
        device: DeviceId,
    },

    /// Turn off the device-native autocenter
    AutocenterOff(SlotArgs),

    /// Turn on the device-native autocenter
    AutocenterOn(SlotArgs),

    /// Start playing downloaded effects
    Play(SlotArgs),

    /// Stop effects
    Stop(SlotArgs),

    /// Download (or refresh) an effect described in a JSON file
    Effect {
        /// File holding one force effect, e.g. {"kind": "constant", ...}
        file: PathBuf,
        /// Emit a refresh instead of a download
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Args, Debug)]
pub struct SlotArgs {
    /// Target slot; repeat to combine
    #[arg(short, long = "slot", value_enum, default_value = "all")]
    pub slots: Vec<SlotArg>,
}

impl SlotArgs {
    pub fn mask(&self) -> SlotMask {
        self.slots
            .iter()
            .fold(SlotMask::from_bits_truncate(0), |acc, slot| {
                acc.union((*slot).into())
            })
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotArg {
    All,
    Constant,
    Spring,
    Damper,
    Trapezoid,
}

impl From<SlotArg> for SlotMask {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::All => SlotMask::ALL,
            SlotArg::Constant => SlotMask::CONSTANT,
            SlotArg::Spring => SlotMask::SPRING,
            SlotArg::Damper => SlotMask::DAMPER,
            SlotArg::Trapezoid => SlotMask::TRAPEZOID,
        }
    }
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Telemetry capture (JSON)
    pub capture: PathBuf,

    /// Session config (YAML or JSON); defaults apply when omitted
    #[arg(short, long, env = "ROADFEEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Wheel to simulate, as vendor:product
    #[arg(long, value_parser = parse_device_id, default_value = "046d:c24f")]
    pub device: DeviceId,

    /// Print every report the wheel would have received
    #[arg(long)]
    pub dump: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective session config
    Show {
        /// Config file; defaults apply when omitted
        path: Option<PathBuf>,
    },

    /// Validate a config file
    Check { path: PathBuf },
}

/// Parse `vendor:product` with both halves in hex.
pub fn parse_device_id(s: &str) -> Result<DeviceId, String> {
    let (vendor, product) = s
        .split_once(':')
        .ok_or_else(|| format!("expected vendor:product, got '{s}'"))?;
    let vendor = u16::from_str_radix(vendor.trim_start_matches("0x"), 16)
        .map_err(|e| format!("bad vendor id '{vendor}': {e}"))?;
    let product = u16::from_str_radix(product.trim_start_matches("0x"), 16)
        .map_err(|e| format!("bad product id '{product}': {e}"))?;
    Ok(DeviceId::new(vendor, product))
}

/// Parse a byte given in decimal or as `0x`-prefixed hex.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("bad byte '{s}': {e}"))
}
