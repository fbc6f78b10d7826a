//! Offline replay of recorded telemetry through a session.

use roadfeel_telemetry::{CaptureEvent, FrameClock, TelemetryCapture, TelemetryState};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::session::FfbSession;

/// Outcome of one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Frame-end events seen.
    pub frames: usize,
    /// Frames on which forces were recomputed.
    pub updates: usize,
    /// Events whose wheel output failed.
    pub failures: usize,
}

/// Feed every event of `capture` to `session` in order.
///
/// Wheel errors are logged and counted; the replay always runs to the end.
pub fn replay_capture(session: &mut FfbSession, capture: &TelemetryCapture) -> ReplaySummary {
    let mut state = TelemetryState::new();
    let mut clock = FrameClock::new();
    let mut summary = ReplaySummary::default();

    for event in &capture.events {
        match event {
            CaptureEvent::FrameStart(frame) => clock.begin_frame(&mut state, *frame),
            CaptureEvent::Channel { channel, value } => {
                state.apply(*channel, *value);
            }
            CaptureEvent::FrameEnd => {
                summary.frames += 1;
                match session.on_frame_end(&state) {
                    Ok(true) => summary.updates += 1,
                    Ok(false) => {}
                    Err(err) => {
                        warn!(frame = summary.frames, %err, "force update failed");
                        summary.failures += 1;
                    }
                }
            }
            CaptureEvent::Paused | CaptureEvent::Started => {
                let paused = matches!(event, CaptureEvent::Paused);
                if let Err(err) = session.set_paused(paused) {
                    warn!(paused, %err, "pause transition failed");
                    summary.failures += 1;
                }
            }
        }
    }
    info!(
        frames = summary.frames,
        updates = summary.updates,
        failures = summary.failures,
        "replay finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::Simulator;
    use crate::wheel::Wheel;
    use roadfeel_config::SessionConfig;
    use roadfeel_hid_common::HidDeviceInfo;
    use roadfeel_hid_common::mock::RecordingWriter;
    use roadfeel_hid_logitech_protocol::{EffectKind, LOGITECH_VENDOR_ID, product_ids};

    const CAPTURE: &str = r#"{
        "events": [
            {"event": "frame_start", "paused_simulation_time": 0},
            {"event": "channel", "channel": "speed", "value": {"type": "float", "value": 10.0}},
            {"event": "frame_end"},
            {"event": "started"},
            {"event": "frame_start", "paused_simulation_time": 16000},
            {"event": "channel", "channel": "linear_acceleration", "value": {"type": "f_vector", "value": {"x": 1.5, "y": 0.0, "z": 0.0}}},
            {"event": "frame_end"},
            {"event": "frame_start", "paused_simulation_time": 32000},
            {"event": "frame_end"},
            {"event": "paused"}
        ]
    }"#;

    fn session(config: SessionConfig) -> (FfbSession, RecordingWriter) {
        let writer = RecordingWriter::new();
        let info = HidDeviceInfo::new(LOGITECH_VENDOR_ID, product_ids::G29_PS, "/dev/hidraw0".into());
        let simulator = Simulator::new(Wheel::open(info, writer.clone()));
        (FfbSession::new(simulator, config), writer)
    }

    #[test]
    fn test_replay_counts_frames_and_updates() -> Result<(), Box<dyn std::error::Error>> {
        let capture = TelemetryCapture::from_json_str(CAPTURE)?;
        let config = SessionConfig {
            update_divider: 1,
            ..SessionConfig::default()
        };
        let (mut session, _) = session(config);
        let summary = replay_capture(&mut session, &capture);
        assert_eq!(
            summary,
            ReplaySummary {
                frames: 3,
                updates: 2,
                failures: 0,
            }
        );
        assert!(session.is_paused());
        assert!(!session.simulator().wheel().is_playing(EffectKind::Damper));
        Ok(())
    }

    #[test]
    fn test_replay_counts_failures() -> Result<(), Box<dyn std::error::Error>> {
        let capture = TelemetryCapture::from_json_str(CAPTURE)?;
        let (mut session, writer) = session(SessionConfig::default());
        writer.disconnect();
        let summary = replay_capture(&mut session, &capture);
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.updates, 0);
        assert_eq!(summary.failures, 2);
        Ok(())
    }

    #[test]
    fn test_summary_json_shape() -> Result<(), Box<dyn std::error::Error>> {
        let summary = ReplaySummary {
            frames: 12,
            updates: 3,
            failures: 1,
        };
        let json = serde_json::to_string(&summary)?;
        assert_eq!(json, r#"{"frames":12,"updates":3,"failures":1}"#);
        Ok(())
    }
}
