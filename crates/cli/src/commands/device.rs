//! Device listing and probing

use anyhow::Result;
use roadfeel_hid_common::DeviceId;
use roadfeel_hid_logitech_protocol::{
    FfbProtocol, KNOWN_WHEEL_DEVICE_IDS, LogitechModel, is_known_wheel,
};
use serde::Serialize;

use crate::commands::DeviceCommands;
use crate::output;

/// What roadfeel knows about one device id.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub id: String,
    pub name: &'static str,
    pub protocol: FfbProtocol,
    pub ffb_supported: bool,
    pub init_sequence: bool,
    pub max_rotation_deg: Option<u16>,
}

impl DeviceReport {
    pub fn for_id(device: DeviceId) -> Self {
        let protocol = FfbProtocol::for_vendor(device.vendor_id());
        let model = LogitechModel::from_device_id(device);
        let known = is_known_wheel(device);
        Self {
            id: device.to_string(),
            name: model.display_name(),
            protocol,
            ffb_supported: protocol.is_implemented(),
            init_sequence: known,
            max_rotation_deg: known.then_some(model.max_rotation_deg()),
        }
    }
}

pub fn execute(cmd: &DeviceCommands, json: bool) -> Result<()> {
    match cmd {
        DeviceCommands::List => {
            let devices: Vec<DeviceReport> = KNOWN_WHEEL_DEVICE_IDS
                .iter()
                .map(|id| DeviceReport::for_id(*id))
                .collect();
            output::print_device_list(&devices, json);
        }
        DeviceCommands::Probe { device } => {
            output::print_device(&DeviceReport::for_id(*device), json);
        }
    }
    Ok(())
}
