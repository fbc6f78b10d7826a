//! Frame-start timestamp accumulation.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::state::TelemetryState;

/// Timing data delivered with every frame-start event (µs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStart {
    /// The host restarted its timers; paused simulation time begins at 0 again.
    pub timer_restarted: bool,
    pub render_time: u64,
    pub simulation_time: u64,
    pub paused_simulation_time: u64,
}

/// Turns per-frame host times into a monotonically accumulated timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, as after a session restart.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advance `state.timestamp` by the paused-simulation time elapsed since
    /// the previous frame and copy the raw host times into `state`.
    ///
    /// The first frame contributes nothing. A timer restart measures from 0.
    pub fn begin_frame(&mut self, state: &mut TelemetryState, frame: FrameStart) {
        let mut last = self.last.unwrap_or(frame.paused_simulation_time);
        if frame.timer_restarted {
            last = 0;
        }
        let elapsed = frame.paused_simulation_time.saturating_sub(last);
        state.timestamp = state.timestamp.saturating_add(elapsed);
        self.last = Some(frame.paused_simulation_time);

        state.raw_render_timestamp = frame.render_time;
        state.raw_simulation_timestamp = frame.simulation_time;
        state.raw_paused_simulation_timestamp = frame.paused_simulation_time;
        trace!(timestamp = state.timestamp, elapsed, "frame start");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(paused: u64) -> FrameStart {
        FrameStart {
            timer_restarted: false,
            render_time: paused + 7,
            simulation_time: paused + 3,
            paused_simulation_time: paused,
        }
    }

    #[test]
    fn test_first_frame_seeds_from_paused_time() -> Result<(), Box<dyn std::error::Error>> {
        let mut clock = FrameClock::new();
        let mut state = TelemetryState::new();
        clock.begin_frame(&mut state, frame(5_000));
        assert_eq!(state.timestamp, 0);
        assert_eq!(state.raw_paused_simulation_timestamp, 5_000);
        assert_eq!(state.raw_render_timestamp, 5_007);
        assert_eq!(state.raw_simulation_timestamp, 5_003);
        Ok(())
    }

    #[test]
    fn test_accumulates_elapsed_paused_time() -> Result<(), Box<dyn std::error::Error>> {
        let mut clock = FrameClock::new();
        let mut state = TelemetryState::new();
        for t in [1_000, 17_000, 33_000] {
            clock.begin_frame(&mut state, frame(t));
        }
        assert_eq!(state.timestamp, 32_000);
        Ok(())
    }

    #[test]
    fn test_timer_restart_measures_from_zero() -> Result<(), Box<dyn std::error::Error>> {
        let mut clock = FrameClock::new();
        let mut state = TelemetryState::new();
        clock.begin_frame(&mut state, frame(50_000));
        clock.begin_frame(
            &mut state,
            FrameStart {
                timer_restarted: true,
                ..frame(4_000)
            },
        );
        assert_eq!(state.timestamp, 4_000);
        clock.begin_frame(&mut state, frame(6_000));
        assert_eq!(state.timestamp, 6_000);
        Ok(())
    }

    #[test]
    fn test_reset_reseeds() -> Result<(), Box<dyn std::error::Error>> {
        let mut clock = FrameClock::new();
        let mut state = TelemetryState::new();
        clock.begin_frame(&mut state, frame(1_000));
        clock.reset();
        clock.begin_frame(&mut state, frame(90_000));
        assert_eq!(state.timestamp, 0);
        Ok(())
    }
}
