//! Error types for roadfeelctl

use roadfeel_ffb::WheelError;
use roadfeel_hid_logitech_protocol::ProtocolError;
use roadfeel_telemetry::CaptureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Wheel unavailable: {0}")]
    WheelUnavailable(#[from] WheelError),

    #[error("Encoding failed: {0}")]
    EncodeError(#[from] ProtocolError),

    #[error("Capture error: {0}")]
    CaptureError(#[from] CaptureError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DeviceNotFound(_) => 2,
            CliError::ValidationError(_)
            | CliError::InvalidConfiguration(_)
            | CliError::EncodeError(_)
            | CliError::CaptureError(_)
            | CliError::JsonError(_)
            | CliError::YamlError(_) => 4,
            CliError::WheelUnavailable(_) => 5,
            CliError::IoError(_) => 1,
        }
    }

    /// Short machine-readable name used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::DeviceNotFound(_) => "device_not_found",
            CliError::ValidationError(_) => "validation_error",
            CliError::InvalidConfiguration(_) => "invalid_configuration",
            CliError::WheelUnavailable(_) => "wheel_unavailable",
            CliError::EncodeError(_) => "encode_error",
            CliError::CaptureError(_) => "capture_error",
            CliError::IoError(_) => "io_error",
            CliError::JsonError(_) => "json_error",
            CliError::YamlError(_) => "yaml_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadfeel_hid_logitech_protocol::Command;

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(CliError::DeviceNotFound("x".into()).exit_code(), 2);
        assert_eq!(
            CliError::from(ProtocolError::ExcessParameters(Command::Play)).exit_code(),
            4
        );
        assert_eq!(CliError::from(WheelError::NotReady).exit_code(), 5);
    }
}
