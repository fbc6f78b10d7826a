//! Per-tick force synthesis.

use roadfeel_telemetry::TelemetryState;
use tracing::{error, trace};

use crate::derive::{
    DeflectionMemory, derive_constant, derive_damper, derive_spring, derive_trapezoid,
};
use crate::wheel::{Wheel, WheelResult};

/// Derives all effects from telemetry and commits them to a [`Wheel`].
///
/// Holds no timers; the caller decides how often [`Simulator::update`] runs.
#[derive(Debug)]
pub struct Simulator {
    wheel: Wheel,
    deflection: DeflectionMemory,
}

impl Simulator {
    /// Take ownership of `wheel`, turning off its native autocenter and
    /// stopping any effect left playing.
    ///
    /// A wheel that is not ready is kept anyway; the simulator then runs
    /// degraded and [`Simulator::is_ready`] reports false.
    pub fn new(mut wheel: Wheel) -> Self {
        if wheel.is_ready() {
            if let Err(err) = wheel.disable_autocenter() {
                error!(%err, "failed disabling autocenter");
            }
            if let Err(err) = wheel.stop_forces() {
                error!(%err, "failed stopping forces");
            }
        } else {
            error!(device = %wheel.info().device_id(), "failed initializing wheel");
        }
        Self {
            wheel,
            deflection: DeflectionMemory::default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.wheel.is_ready()
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut Wheel {
        &mut self.wheel
    }

    pub fn deflection_memory(&self) -> DeflectionMemory {
        self.deflection
    }

    /// Recompute every slot from `state` and push the set in one refresh.
    pub fn update(&mut self, state: &TelemetryState) -> WheelResult<()> {
        self.update_autocenter(state);
        *self.wheel.constant_force_mut() = derive_constant(state);
        *self.wheel.spring_force_mut() = derive_spring(state);
        *self.wheel.damper_force_mut() = derive_damper(state);
        *self.wheel.trapezoid_force_mut() = derive_trapezoid(state, &mut self.deflection);
        trace!(timestamp = state.timestamp, "forces derived");
        self.wheel.refresh_forces()
    }

    /// Hook for driving the device-native autocenter from telemetry.
    /// Currently leaves it untouched.
    fn update_autocenter(&mut self, _state: &TelemetryState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadfeel_hid_common::HidDeviceInfo;
    use roadfeel_hid_common::mock::RecordingWriter;
    use roadfeel_hid_logitech_protocol::{EffectKind, LOGITECH_VENDOR_ID, product_ids};

    fn simulator() -> (Simulator, RecordingWriter) {
        let writer = RecordingWriter::new();
        let info = HidDeviceInfo::new(LOGITECH_VENDOR_ID, product_ids::G923, "/dev/hidraw0".into());
        (Simulator::new(Wheel::open(info, writer.clone())), writer)
    }

    #[test]
    fn test_new_resets_wheel() -> Result<(), Box<dyn std::error::Error>> {
        let (sim, writer) = simulator();
        assert!(sim.is_ready());
        assert_eq!(writer.history(), vec![vec![0xF5], vec![0xF3, 0x00]]);
        Ok(())
    }

    #[test]
    fn test_new_with_unready_wheel_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let writer = RecordingWriter::new();
        writer.disconnect();
        let info = HidDeviceInfo::new(LOGITECH_VENDOR_ID, product_ids::G923, "/dev/hidraw0".into());
        let sim = Simulator::new(Wheel::open(info, writer.clone()));
        assert!(!sim.is_ready());
        writer.reconnect();
        assert!(writer.history().is_empty());
        Ok(())
    }

    #[test]
    fn test_update_at_rest_plays_damper_only() -> Result<(), Box<dyn std::error::Error>> {
        let (mut sim, writer) = simulator();
        writer.take_history();
        sim.update(&TelemetryState::default())?;
        assert!(!sim.wheel().is_playing(EffectKind::Constant));
        assert!(!sim.wheel().is_playing(EffectKind::Spring));
        assert!(sim.wheel().is_playing(EffectKind::Damper));
        assert!(!sim.wheel().is_playing(EffectKind::Trapezoid));
        assert_eq!(
            writer.history(),
            vec![vec![0x42, 0x02, 0x02, 0x00, 0x02, 0x00, 0x00], vec![0x42, 0x00]]
        );
        Ok(())
    }

    #[test]
    fn test_memory_tracks_even_when_trapezoid_off() -> Result<(), Box<dyn std::error::Error>> {
        let (mut sim, _) = simulator();
        let state = TelemetryState {
            speed: Some(12.0),
            suspension_deflection_left: 0.03,
            suspension_deflection_right: -0.01,
            ..TelemetryState::default()
        };
        sim.update(&state)?;
        assert!(!sim.wheel().trapezoid_force().enabled);
        let memory = sim.deflection_memory();
        assert_eq!((memory.left, memory.right), (0.03, -0.01));
        Ok(())
    }

    #[test]
    fn test_update_on_unready_wheel_still_derives() -> Result<(), Box<dyn std::error::Error>> {
        let (mut sim, writer) = simulator();
        writer.disconnect();
        let state = TelemetryState {
            speed: Some(10.0),
            lateral_accel: 1.5,
            ..TelemetryState::default()
        };
        assert!(sim.update(&state).is_err());
        assert_eq!(sim.wheel().constant_force().amplitude, 176);
        Ok(())
    }
}
