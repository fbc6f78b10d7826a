//! Session configuration for roadfeel force feedback.
//!
//! Settings load from YAML or JSON, fall back to defaults field by field,
//! and are validated before use.

pub mod session;

pub use session::{
    ConfigError, ConfigFormat, DEFAULT_LED_THRESHOLDS_RPM, DEFAULT_ROTATION_RANGE_DEG,
    DEFAULT_SESSION_YAML, DEFAULT_UPDATE_DIVIDER, MAX_ROTATION_RANGE_DEG, MIN_ROTATION_RANGE_DEG,
    SessionConfig,
};
