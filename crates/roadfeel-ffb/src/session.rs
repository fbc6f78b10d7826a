//! Frame-paced force-feedback session.

use core::num::FpCategory;

use roadfeel_config::{DEFAULT_LED_THRESHOLDS_RPM, DEFAULT_ROTATION_RANGE_DEG, SessionConfig};
use roadfeel_hid_logitech_protocol::LedPattern;
use roadfeel_telemetry::TelemetryState;
use tracing::{debug, info};

use crate::simulator::Simulator;
use crate::wheel::{WheelError, WheelResult};

/// Rev-light pattern for `rpm` using the stock thresholds.
pub fn rpm_led_pattern(rpm: f32) -> LedPattern {
    rpm_led_pattern_with(rpm, &DEFAULT_LED_THRESHOLDS_RPM)
}

/// Rev-light pattern for `rpm`: one more LED lit per threshold crossed,
/// all five above the last, none when the engine is off.
pub fn rpm_led_pattern_with(rpm: f32, thresholds: &[f32; 4]) -> LedPattern {
    if matches!(rpm.classify(), FpCategory::Zero) {
        return LedPattern::ZERO;
    }
    let lit = thresholds.iter().take_while(|t| rpm >= **t).count();
    LedPattern::from_masked(((1u16 << (lit + 1)) - 1) as u8)
}

/// Drives a [`Simulator`] from host frame events.
///
/// Forces are recomputed every `update_divider` frame ends. Sessions start
/// paused; the host's start event unpauses them.
#[derive(Debug)]
pub struct FfbSession {
    simulator: Simulator,
    config: SessionConfig,
    paused: bool,
    countdown: u32,
}

impl FfbSession {
    pub fn new(simulator: Simulator, config: SessionConfig) -> Self {
        let countdown = config.update_divider.max(1);
        Self {
            simulator,
            config,
            paused: true,
            countdown,
        }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.simulator
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Calibrate the wheel and apply the configured rotation range.
    pub fn initialize(&mut self) -> WheelResult<()> {
        let wheel = self.simulator.wheel_mut();
        wheel.calibrate()?;
        if self.config.rotation_range_deg != DEFAULT_ROTATION_RANGE_DEG {
            wheel.set_range(self.config.rotation_range_deg)?;
        }
        Ok(())
    }

    /// Handle the end of a host frame.
    ///
    /// Returns `Ok(true)` when forces were recomputed on this frame.
    pub fn on_frame_end(&mut self, state: &TelemetryState) -> WheelResult<bool> {
        if self.paused {
            return Ok(false);
        }
        if !self.simulator.is_ready() {
            return Err(WheelError::NotReady);
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return Ok(false);
        }
        self.countdown = self.config.update_divider.max(1);

        self.simulator.update(state)?;
        if self.config.leds_enabled {
            let pattern =
                rpm_led_pattern_with(state.rpm_or_zero(), &self.config.led_thresholds_rpm);
            self.simulator.wheel_mut().set_led_pattern(pattern)?;
        }
        Ok(true)
    }

    /// Pausing stops all forces and darkens the LEDs.
    pub fn set_paused(&mut self, paused: bool) -> WheelResult<()> {
        if paused == self.paused {
            debug!(paused, "pause state unchanged");
        }
        self.paused = paused;
        if paused {
            info!("telemetry paused, force feedback stopped");
            self.reset_wheel()
        } else {
            info!("telemetry started");
            Ok(())
        }
    }

    fn reset_wheel(&mut self) -> WheelResult<()> {
        let wheel = self.simulator.wheel_mut();
        if !wheel.is_ready() {
            return Ok(());
        }
        wheel.queue_disable_autocenter()?;
        wheel.queue_stop_forces()?;
        wheel.queue_led_pattern(LedPattern::ZERO)?;
        wheel.flush_reports()
    }
}
