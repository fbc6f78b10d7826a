//! Encoder error type and its classification.

#![deny(static_mut_refs)]

use core::fmt;

use roadfeel_hid_common::DeviceId;
use tracing::warn;

use crate::output::Command;
use crate::report::Report;
use crate::types::FfbProtocol;

/// Reasons an encoder refuses to produce a report.
///
/// None of these are fatal; the caller may skip the command and carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The protocol variant has no encoder at all.
    #[error("protocol {protocol} cannot encode {operation}")]
    UnsupportedProtocol {
        protocol: FfbProtocol,
        operation: &'static str,
    },

    /// The protocol is recognized but the operation is not written yet.
    #[error("{operation} is not implemented for protocol {protocol}")]
    NotImplemented {
        protocol: FfbProtocol,
        operation: &'static str,
    },

    /// The command needs effect parameters but only slots were given.
    #[error("command {0} requires effect parameters")]
    MissingParameters(Command),

    /// The command takes only slots but effect parameters were given.
    #[error("command {0} does not take effect parameters")]
    ExcessParameters(Command),

    #[error("malformed {command} command: {reason}")]
    MalformedCommand {
        command: Command,
        reason: &'static str,
    },

    /// No init sequence is known for this device.
    #[error("no init sequence for device {0}")]
    UnknownDevice(DeviceId),
}

impl ProtocolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProtocolError::UnsupportedProtocol { .. } => ErrorCategory::UnsupportedProtocol,
            ProtocolError::NotImplemented { .. } => ErrorCategory::NotImplemented,
            ProtocolError::MissingParameters(_)
            | ProtocolError::ExcessParameters(_)
            | ProtocolError::MalformedCommand { .. } => ErrorCategory::MalformedCommand,
            ProtocolError::UnknownDevice(_) => ErrorCategory::UnknownIdentifier,
        }
    }
}

/// Coarse classification of [`ProtocolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    UnsupportedProtocol = 0,
    NotImplemented = 1,
    MalformedCommand = 2,
    UnknownIdentifier = 3,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::UnsupportedProtocol => write!(f, "unsupported protocol"),
            ErrorCategory::NotImplemented => write!(f, "not implemented"),
            ErrorCategory::MalformedCommand => write!(f, "malformed command"),
            ErrorCategory::UnknownIdentifier => write!(f, "unknown identifier"),
        }
    }
}

/// Collapse an encoder result into the sentinel form.
pub trait ReportResultExt {
    /// The report on success, [`Report::EMPTY`] on any error.
    fn or_noop(self) -> Report;
}

impl ReportResultExt for Result<Report, ProtocolError> {
    fn or_noop(self) -> Report {
        self.unwrap_or(Report::EMPTY)
    }
}

/// Log an encoder rejection and hand the error back for propagation.
pub(crate) fn reject(component: &'static str, err: ProtocolError) -> ProtocolError {
    warn!(component, category = %err.category(), "{err}");
    err
}
