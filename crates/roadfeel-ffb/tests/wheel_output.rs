//! Wire-level snapshots of what the simulator sends a wheel.

use insta::assert_snapshot;
use roadfeel_ffb::{Simulator, Wheel};
use roadfeel_hid_common::HidDeviceInfo;
use roadfeel_hid_common::mock::RecordingWriter;
use roadfeel_hid_logitech_protocol::{LOGITECH_VENDOR_ID, product_ids};
use roadfeel_telemetry::TelemetryState;

fn hex(history: &[Vec<u8>]) -> String {
    history
        .iter()
        .map(|report| format!("{report:02X?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn simulator() -> (Simulator, RecordingWriter) {
    let writer = RecordingWriter::new();
    let info = HidDeviceInfo::new(LOGITECH_VENDOR_ID, product_ids::G29_PS, "/dev/hidraw0".into());
    (Simulator::new(Wheel::open(info, writer.clone())), writer)
}

#[test]
fn snapshot_startup() -> Result<(), Box<dyn std::error::Error>> {
    let (_sim, writer) = simulator();
    assert_snapshot!(hex(&writer.history()), @r"
    [F5]
    [F3, 00]
    ");
    Ok(())
}

#[test]
fn snapshot_cornering_first_tick() -> Result<(), Box<dyn std::error::Error>> {
    let (mut sim, writer) = simulator();
    writer.take_history();
    let state = TelemetryState {
        speed: Some(10.0),
        lateral_accel: 1.5,
        brake: Some(0.2),
        ..TelemetryState::default()
    };
    sim.update(&state)?;
    assert_snapshot!(hex(&writer.history()), @r"
    [10, 00, B0, B0, B0, B0, 00]
    [12, 00]
    [21, 01, 7E, 82, 33, 00, 95]
    [22, 00]
    [42, 02, 05, 00, 05, 00, 00]
    [42, 00]
    ");
    Ok(())
}

#[test]
fn snapshot_offroad_then_stop() -> Result<(), Box<dyn std::error::Error>> {
    let (mut sim, writer) = simulator();
    let rough = TelemetryState {
        speed: Some(15.0),
        substance_left: Some(2),
        ..TelemetryState::default()
    };
    sim.update(&rough)?;
    writer.take_history();

    sim.update(&rough)?;
    assert_snapshot!(hex(&writer.take_history()), @r"
    [1C, 00, 80, 80, 80, 80, 00]
    [2C, 01, 7E, 82, 55, 00, AE]
    [4C, 02, 06, 00, 06, 00, 00]
    [8C, 06, 74, 8C, 20, 20, 55]
    ");

    sim.update(&TelemetryState::default())?;
    assert_snapshot!(hex(&writer.take_history()), @r"
    [13, 00]
    [23, 00]
    [4C, 02, 02, 00, 02, 00, 00]
    [83, 00]
    ");
    Ok(())
}
