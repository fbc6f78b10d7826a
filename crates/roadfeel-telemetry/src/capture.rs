//! Recorded telemetry event streams for offline replay.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::channels::{TelemetryChannel, TelemetryValue};
use crate::clock::FrameStart;

/// Highest capture format version this crate reads.
pub const CAPTURE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read capture: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed capture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("capture format version {found} is newer than supported {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// One host event, in the order the host delivered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CaptureEvent {
    FrameStart(FrameStart),
    Channel {
        channel: TelemetryChannel,
        #[serde(default)]
        value: Option<TelemetryValue>,
    },
    FrameEnd,
    Paused,
    Started,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCapture {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub events: Vec<CaptureEvent>,
}

fn default_version() -> u32 {
    CAPTURE_FORMAT_VERSION
}

impl TelemetryCapture {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CaptureError> {
        let capture: TelemetryCapture = serde_json::from_reader(reader)?;
        capture.check_version()
    }

    pub fn from_json_str(json: &str) -> Result<Self, CaptureError> {
        let capture: TelemetryCapture = serde_json::from_str(json)?;
        capture.check_version()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of frame-end events, i.e. simulation ticks.
    pub fn frame_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CaptureEvent::FrameEnd))
            .count()
    }

    fn check_version(self) -> Result<Self, CaptureError> {
        if self.version > CAPTURE_FORMAT_VERSION {
            return Err(CaptureError::UnsupportedVersion {
                found: self.version,
                supported: CAPTURE_FORMAT_VERSION,
            });
        }
        Ok(self)
    }
}
