//! Offline report encoding

use anyhow::Result;
use roadfeel_config::{MAX_ROTATION_RANGE_DEG, MIN_ROTATION_RANGE_DEG};
use roadfeel_hid_logitech_protocol::{
    Command, FfbProtocol, ForceEffect, LedPattern, ProtocolError, Report, build_force_report,
    build_init_sequence, build_led_report, build_range_report, build_slot_report,
};
use tracing::debug;

use crate::commands::EncodeCommands;
use crate::error::CliError;
use crate::output;

pub fn execute(cmd: &EncodeCommands, protocol: FfbProtocol, json: bool) -> Result<()> {
    let reports = build_reports(cmd, protocol)?;
    output::print_reports(&reports, json);
    Ok(())
}

/// Reports for one encode command, in send order.
pub fn build_reports(cmd: &EncodeCommands, protocol: FfbProtocol) -> Result<Vec<Report>, CliError> {
    debug!(?cmd, %protocol, "encoding");
    let reports = match cmd {
        EncodeCommands::Led { pattern } => {
            vec![build_led_report(protocol, LedPattern::from_masked(*pattern))?]
        }
        EncodeCommands::Range { degrees } => {
            if !(MIN_ROTATION_RANGE_DEG..=MAX_ROTATION_RANGE_DEG).contains(degrees) {
                return Err(CliError::ValidationError(format!(
                    "range {degrees} outside {MIN_ROTATION_RANGE_DEG}..={MAX_ROTATION_RANGE_DEG}"
                )));
            }
            vec![build_range_report(protocol, *degrees)?]
        }
        EncodeCommands::Init { device } => {
            build_init_sequence(protocol, *device).map_err(|err| match err {
                ProtocolError::UnknownDevice(id) => CliError::DeviceNotFound(id.to_string()),
                other => other.into(),
            })?
        }
        EncodeCommands::AutocenterOff(slots) => {
            vec![build_slot_report(protocol, Command::AutocenterOff, slots.mask())?]
        }
        EncodeCommands::AutocenterOn(slots) => {
            vec![build_slot_report(protocol, Command::AutocenterOn, slots.mask())?]
        }
        EncodeCommands::Play(slots) => {
            vec![build_slot_report(protocol, Command::Play, slots.mask())?]
        }
        EncodeCommands::Stop(slots) => {
            vec![build_slot_report(protocol, Command::Stop, slots.mask())?]
        }
        EncodeCommands::Effect { file, refresh } => {
            let text = std::fs::read_to_string(file)?;
            let effect: ForceEffect = serde_json::from_str(&text)?;
            let command = if *refresh {
                Command::Refresh
            } else {
                Command::Download
            };
            vec![build_force_report(protocol, command, &effect)?]
        }
    };
    Ok(reports)
}
