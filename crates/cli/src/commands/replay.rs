//! Replay a telemetry capture against a simulated wheel

use std::path::Path;

use anyhow::Result;
use roadfeel_config::SessionConfig;
use roadfeel_ffb::{FfbSession, ReplaySummary, Simulator, Wheel, replay_capture};
use roadfeel_hid_common::HidDeviceInfo;
use roadfeel_hid_common::mock::RecordingWriter;
use roadfeel_telemetry::TelemetryCapture;
use serde::Serialize;
use tracing::info;

use crate::commands::ReplayArgs;
use crate::error::CliError;
use crate::output;

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub capture: String,
    pub description: Option<String>,
    pub device: String,
    pub summary: ReplaySummary,
    pub reports_written: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<String>,
}

pub fn execute(args: &ReplayArgs, json: bool) -> Result<()> {
    let outcome = run(args)?;
    output::print_replay(&outcome, json);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, CliError> {
    match path {
        Some(path) => SessionConfig::load_from_path(path)
            .map_err(|e| CliError::InvalidConfiguration(format!("{e:#}"))),
        None => Ok(SessionConfig::default()),
    }
}

/// Calibrate a recording wheel, feed it the capture, and collect the output.
pub fn run(args: &ReplayArgs) -> Result<ReplayOutcome, CliError> {
    let capture = TelemetryCapture::load(&args.capture)?;
    let config = load_config(args.config.as_deref())?;

    let writer = RecordingWriter::new();
    let info = HidDeviceInfo::new(
        args.device.vendor_id(),
        args.device.product_id(),
        format!("replay:{}", args.capture.display()),
    );
    let wheel = Wheel::open(info, writer.clone());
    if !wheel.is_ready() {
        return Err(CliError::DeviceNotFound(format!(
            "{} has no force-feedback encoder",
            args.device
        )));
    }

    let mut session = FfbSession::new(Simulator::new(wheel), config);
    session.initialize()?;
    info!(events = capture.events.len(), frames = capture.frame_count(), "replaying capture");
    let summary = replay_capture(&mut session, &capture);

    let history = writer.take_history();
    let reports = if args.dump {
        history.iter().map(|r| hex_line(r)).collect()
    } else {
        Vec::new()
    };
    Ok(ReplayOutcome {
        capture: args.capture.display().to_string(),
        description: capture.description.clone(),
        device: args.device.to_string(),
        summary,
        reports_written: history.len(),
        reports,
    })
}

fn hex_line(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
