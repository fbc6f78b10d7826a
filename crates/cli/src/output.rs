//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use roadfeel_config::SessionConfig;
use roadfeel_hid_logitech_protocol::Report;
use serde::Serialize;
use serde_json::json;

use crate::commands::device::DeviceReport;
use crate::commands::replay::ReplayOutcome;
use crate::error::CliError;

fn print_json<T: Serialize>(value: &T, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": format!("{error:#}"),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<CliError>()
        .map(CliError::kind)
        .unwrap_or("error")
}

pub fn print_reports(reports: &[Report], json: bool) {
    if json {
        let hex: Vec<String> = reports.iter().map(Report::to_string).collect();
        print_json(&json!({ "success": true, "reports": hex }), "reports");
    } else {
        for report in reports {
            println!("{}", report);
        }
    }
}

pub fn print_device_list(devices: &[DeviceReport], json: bool) {
    if json {
        print_json(&json!({ "success": true, "devices": devices }), "device list");
        return;
    }
    if devices.is_empty() {
        println!("{}", "No known wheels".yellow());
        return;
    }
    println!("{}", "Known Wheels:".bold());
    for device in devices {
        print_device_human(device);
    }
}

pub fn print_device(device: &DeviceReport, json: bool) {
    if json {
        print_json(&json!({ "success": true, "device": device }), "device");
    } else {
        print_device_human(device);
    }
}

fn print_device_human(device: &DeviceReport) {
    let marker = if device.ffb_supported {
        "●".green()
    } else {
        "●".red()
    };
    println!("  {} {} ({})", marker, device.name.bold(), device.id.dimmed());
    println!("    Protocol: {}", device.protocol);
    let init = if device.init_sequence { "yes" } else { "no" };
    println!("    Init sequence: {}", init);
    if let Some(deg) = device.max_rotation_deg {
        println!("    Max rotation: {}°", deg);
    }
}

pub fn print_config(config: &SessionConfig, json: bool) -> Result<(), CliError> {
    if json {
        print_json(&json!({ "success": true, "config": config }), "config");
    } else {
        print!("{}", serde_yaml::to_string(config)?);
    }
    Ok(())
}

pub fn print_config_ok(path: &str, config: &SessionConfig, json: bool) {
    if json {
        print_json(
            &json!({ "success": true, "path": path, "config": config }),
            "config check",
        );
    } else {
        println!("{} {} is valid", "✓".green(), path);
        println!(
            "    update every {} frame(s), range {}°, LEDs {}",
            config.update_divider,
            config.rotation_range_deg,
            if config.leds_enabled { "on" } else { "off" }
        );
    }
}

pub fn print_replay(outcome: &ReplayOutcome, json: bool) {
    if json {
        print_json(&json!({ "success": true, "replay": outcome }), "replay");
        return;
    }

    println!("{} {}", "Replayed".bold(), outcome.capture);
    if let Some(description) = &outcome.description {
        println!("    {}", description.dimmed());
    }
    println!("    Device: {}", outcome.device);
    println!("    Frames: {}", outcome.summary.frames);
    println!("    Force updates: {}", outcome.summary.updates);
    let failures = outcome.summary.failures.to_string();
    if outcome.summary.failures == 0 {
        println!("    Failures: {}", failures.green());
    } else {
        println!("    Failures: {}", failures.red());
    }
    println!("    Reports written: {}", outcome.reports_written);
    for line in &outcome.reports {
        println!("      {}", line);
    }
}
