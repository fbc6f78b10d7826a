//! Force-feedback session settings.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SESSION_YAML: &str = include_str!("default_session.yaml");

pub const DEFAULT_UPDATE_DIVIDER: u32 = 4;
pub const DEFAULT_ROTATION_RANGE_DEG: u16 = 900;
pub const DEFAULT_LED_THRESHOLDS_RPM: [f32; 4] = [1000.0, 1300.0, 1600.0, 1800.0];

/// Rotation ranges the classic wheels accept.
pub const MIN_ROTATION_RANGE_DEG: u16 = 40;
pub const MAX_ROTATION_RANGE_DEG: u16 = 900;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("update_divider must be at least 1")]
    ZeroDivider,

    #[error("rotation_range_deg {0} outside 40..=900")]
    RangeOutOfBounds(u16),

    #[error("led_thresholds_rpm must be finite and strictly ascending, got {0:?}")]
    ThresholdsNotAscending([f32; 4]),

    #[error("unrecognized config extension {0:?}; expected .yaml, .yml or .json")]
    UnknownFormat(String),
}

/// On-disk encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(ext)),
        }
    }
}

/// Settings for one force-feedback session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Recompute forces every Nth frame end.
    pub update_divider: u32,
    /// Wheel rotation range applied after calibration.
    pub rotation_range_deg: u16,
    /// Drive the rev-light LEDs from engine rpm.
    pub leds_enabled: bool,
    /// Upper rpm bounds for one through four lit LEDs; above the last, all five light.
    pub led_thresholds_rpm: [f32; 4],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            update_divider: DEFAULT_UPDATE_DIVIDER,
            rotation_range_deg: DEFAULT_ROTATION_RANGE_DEG,
            leds_enabled: true,
            led_thresholds_rpm: DEFAULT_LED_THRESHOLDS_RPM,
        }
    }
}

impl SessionConfig {
    /// The settings shipped in `default_session.yaml`.
    pub fn stock() -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(DEFAULT_SESSION_YAML)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("invalid YAML session config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid JSON session config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file. The format follows the extension.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = match format {
            ConfigFormat::Yaml => Self::from_yaml_str(&text),
            ConfigFormat::Json => Self::from_json_str(&text),
        }
        .with_context(|| format!("failed to load {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded session config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_divider == 0 {
            return Err(ConfigError::ZeroDivider);
        }
        if !(MIN_ROTATION_RANGE_DEG..=MAX_ROTATION_RANGE_DEG).contains(&self.rotation_range_deg) {
            return Err(ConfigError::RangeOutOfBounds(self.rotation_range_deg));
        }
        let t = &self.led_thresholds_rpm;
        let finite = t.iter().all(|v| v.is_finite());
        let ascending = t.windows(2).all(|w| matches!(w, [a, b] if a < b));
        if !finite || !ascending {
            return Err(ConfigError::ThresholdsNotAscending(*t));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn stock_config_matches_defaults() -> TestResult {
        let stock = SessionConfig::stock()?;
        assert_eq!(stock, SessionConfig::default());
        stock.validate()?;
        Ok(())
    }

    #[test]
    fn partial_yaml_fills_defaults() -> TestResult {
        let config = SessionConfig::from_yaml_str("update_divider: 2\n")?;
        assert_eq!(config.update_divider, 2);
        assert_eq!(config.rotation_range_deg, 900);
        assert!(config.leds_enabled);
        Ok(())
    }

    #[test]
    fn json_config_parses() -> TestResult {
        let config =
            SessionConfig::from_json_str(r#"{"rotation_range_deg": 540, "leds_enabled": false}"#)?;
        assert_eq!(config.rotation_range_deg, 540);
        assert!(!config.leds_enabled);
        Ok(())
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(SessionConfig::from_yaml_str("update_dividr: 2\n").is_err());
    }

    #[test]
    fn zero_divider_is_rejected() {
        let config = SessionConfig {
            update_divider: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDivider));
    }

    #[test]
    fn range_bounds_are_inclusive() -> TestResult {
        for deg in [40, 900] {
            let config = SessionConfig {
                rotation_range_deg: deg,
                ..SessionConfig::default()
            };
            config.validate()?;
        }
        for deg in [39, 901, 1080] {
            let config = SessionConfig {
                rotation_range_deg: deg,
                ..SessionConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::RangeOutOfBounds(deg)));
        }
        Ok(())
    }

    #[test]
    fn thresholds_must_ascend() {
        let config = SessionConfig {
            led_thresholds_rpm: [1000.0, 900.0, 1600.0, 1800.0],
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdsNotAscending(_))
        ));
    }

    #[test]
    fn format_from_extension() -> TestResult {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml"))?, ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML"))?, ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.json"))?, ConfigFormat::Json);
        assert!(ConfigFormat::from_path(Path::new("a.toml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("noext")).is_err());
        Ok(())
    }

    #[test]
    fn load_yaml_file() -> TestResult {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "update_divider: 8")?;
        writeln!(file, "rotation_range_deg: 270")?;
        let config = SessionConfig::load_from_path(file.path())?;
        assert_eq!(config.update_divider, 8);
        assert_eq!(config.rotation_range_deg, 270);
        Ok(())
    }

    #[test]
    fn load_invalid_file_reports_path() -> TestResult {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(file, r#"{{"update_divider": 0}}"#)?;
        let err = SessionConfig::load_from_path(file.path())
            .err()
            .ok_or("zero divider must fail")?;
        let message = format!("{err:#}");
        assert!(message.contains("failed to load"), "{message}");
        assert!(message.contains("update_divider"), "{message}");
        Ok(())
    }
}
