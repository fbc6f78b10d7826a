//! A force-feedback wheel: effect slots, playback tracking, and report output.

use core::fmt;

use roadfeel_hid_common::{HidCommonError, HidDeviceInfo, ReportWriter};
use roadfeel_hid_logitech_protocol::{
    ConstantForce, DamperForce, EffectKind, FfbProtocol, ForceEffect, LedPattern, ProtocolError,
    Report, SlotMask, SpringForce, TrapezoidForce, build_disable_autocenter_report,
    build_download_report, build_enable_autocenter_report, build_init_sequence, build_led_report,
    build_play_report, build_range_report, build_refresh_report, build_set_autocenter_report,
    build_stop_report,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("wheel is not ready")]
    NotReady,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("report transport failed: {0}")]
    Transport(#[from] HidCommonError),
}

pub type WheelResult<T> = Result<T, WheelError>;

/// Owns the four effect slots of one wheel and the writer its reports go to.
///
/// The slot accessors only change local parameters; nothing reaches the
/// device until [`Wheel::refresh_forces`].
pub struct Wheel {
    info: HidDeviceInfo,
    protocol: FfbProtocol,
    writer: Box<dyn ReportWriter>,
    constant: ConstantForce,
    spring: SpringForce,
    damper: DamperForce,
    trapezoid: TrapezoidForce,
    /// Per-slot playback, indexed like [`EffectKind::ALL`].
    playing: [bool; 4],
    pending: Vec<Report>,
}

impl fmt::Debug for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wheel")
            .field("device", &self.info.device_id())
            .field("protocol", &self.protocol)
            .field("playing", &self.playing)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Wheel {
    /// Attach to a device. The protocol follows the vendor id.
    pub fn open(info: HidDeviceInfo, writer: impl ReportWriter + 'static) -> Self {
        let protocol = FfbProtocol::for_device(&info);
        if protocol.is_implemented() {
            info!(device = %info.device_id(), %protocol, "opened wheel");
        } else {
            warn!(device = %info.device_id(), %protocol, "no force-feedback encoder for device");
        }
        Self {
            info,
            protocol,
            writer: Box::new(writer),
            constant: ConstantForce::default(),
            spring: SpringForce::default(),
            damper: DamperForce::default(),
            trapezoid: TrapezoidForce::default(),
            playing: [false; 4],
            pending: Vec::new(),
        }
    }

    pub fn info(&self) -> &HidDeviceInfo {
        &self.info
    }

    pub fn protocol(&self) -> FfbProtocol {
        self.protocol
    }

    /// True when the protocol has an encoder and the writer is connected.
    pub fn is_ready(&self) -> bool {
        self.protocol.is_implemented() && self.writer.is_connected()
    }

    pub fn constant_force(&self) -> &ConstantForce {
        &self.constant
    }

    pub fn constant_force_mut(&mut self) -> &mut ConstantForce {
        &mut self.constant
    }

    pub fn spring_force(&self) -> &SpringForce {
        &self.spring
    }

    pub fn spring_force_mut(&mut self) -> &mut SpringForce {
        &mut self.spring
    }

    pub fn damper_force(&self) -> &DamperForce {
        &self.damper
    }

    pub fn damper_force_mut(&mut self) -> &mut DamperForce {
        &mut self.damper
    }

    pub fn trapezoid_force(&self) -> &TrapezoidForce {
        &self.trapezoid
    }

    pub fn trapezoid_force_mut(&mut self) -> &mut TrapezoidForce {
        &mut self.trapezoid
    }

    /// Current parameters of one slot.
    pub fn effect(&self, kind: EffectKind) -> ForceEffect {
        match kind {
            EffectKind::Constant => self.constant.into(),
            EffectKind::Spring => self.spring.into(),
            EffectKind::Damper => self.damper.into(),
            EffectKind::Trapezoid => self.trapezoid.into(),
        }
    }

    /// Whether the device is currently playing this slot.
    pub fn is_playing(&self, kind: EffectKind) -> bool {
        EffectKind::ALL
            .iter()
            .zip(self.playing)
            .any(|(k, playing)| *k == kind && playing)
    }

    fn set_playing(&mut self, kind: EffectKind, value: bool) {
        for (k, playing) in EffectKind::ALL.iter().zip(self.playing.iter_mut()) {
            if *k == kind {
                *playing = value;
            }
        }
    }

    pub fn disable_autocenter(&mut self) -> WheelResult<()> {
        let report = build_disable_autocenter_report(self.protocol, SlotMask::ALL)?;
        self.send(report)
    }

    pub fn enable_autocenter(&mut self) -> WheelResult<()> {
        let report = build_enable_autocenter_report(self.protocol, SlotMask::ALL)?;
        self.send(report)
    }

    /// Configure the device-native centering spring.
    pub fn set_autocenter(&mut self, spring: SpringForce) -> WheelResult<()> {
        let report = build_set_autocenter_report(self.protocol, &spring.into())?;
        self.send(report)
    }

    /// Stop every slot.
    pub fn stop_forces(&mut self) -> WheelResult<()> {
        let report = build_stop_report(self.protocol, SlotMask::ALL)?;
        self.send(report)?;
        self.playing = [false; 4];
        Ok(())
    }

    /// Push every slot's parameters to the device.
    ///
    /// A slot that just became enabled is downloaded and started, one that
    /// stays enabled is refreshed in place, and one that was disabled is
    /// stopped.
    pub fn refresh_forces(&mut self) -> WheelResult<()> {
        for kind in EffectKind::ALL {
            let effect = self.effect(kind);
            match (effect.is_enabled(), self.is_playing(kind)) {
                (true, false) => {
                    let download = build_download_report(self.protocol, &effect)?;
                    self.send(download)?;
                    let play = build_play_report(self.protocol, effect.slot())?;
                    self.send(play)?;
                    self.set_playing(kind, true);
                }
                (true, true) => {
                    let refresh = build_refresh_report(self.protocol, &effect)?;
                    self.send(refresh)?;
                }
                (false, true) => {
                    let stop = build_stop_report(self.protocol, effect.slot())?;
                    self.send(stop)?;
                    self.set_playing(kind, false);
                }
                (false, false) => {}
            }
        }
        Ok(())
    }

    pub fn set_led_pattern(&mut self, pattern: LedPattern) -> WheelResult<()> {
        let report = build_led_report(self.protocol, pattern)?;
        self.send(report)
    }

    pub fn set_range(&mut self, degrees: u16) -> WheelResult<()> {
        let report = build_range_report(self.protocol, degrees)?;
        self.send(report)
    }

    /// Switch the wheel into native mode at full range.
    pub fn calibrate(&mut self) -> WheelResult<()> {
        let device_id = self.info.device_id();
        for report in build_init_sequence(self.protocol, device_id)? {
            self.send(report)?;
        }
        info!(device = %device_id, "wheel calibrated");
        Ok(())
    }

    pub fn queue_disable_autocenter(&mut self) -> WheelResult<()> {
        let report = build_disable_autocenter_report(self.protocol, SlotMask::ALL)?;
        self.pending.push(report);
        Ok(())
    }

    /// Queue a stop for every slot. Playback is considered stopped at once.
    pub fn queue_stop_forces(&mut self) -> WheelResult<()> {
        let report = build_stop_report(self.protocol, SlotMask::ALL)?;
        self.pending.push(report);
        self.playing = [false; 4];
        Ok(())
    }

    pub fn queue_led_pattern(&mut self, pattern: LedPattern) -> WheelResult<()> {
        let report = build_led_report(self.protocol, pattern)?;
        self.pending.push(report);
        Ok(())
    }

    pub fn pending_reports(&self) -> &[Report] {
        &self.pending
    }

    /// Send all queued reports in order. The queue is empty afterwards even
    /// if a write fails part way.
    pub fn flush_reports(&mut self) -> WheelResult<()> {
        let pending = std::mem::take(&mut self.pending);
        for report in pending {
            self.send(report)?;
        }
        Ok(())
    }

    fn send(&mut self, report: Report) -> WheelResult<()> {
        if !self.is_ready() {
            return Err(WheelError::NotReady);
        }
        let bytes = report.as_bytes();
        let written = self.writer.write_report(bytes)?;
        if written != bytes.len() {
            return Err(HidCommonError::ShortWrite {
                expected: bytes.len(),
                written,
            }
            .into());
        }
        debug!(%report, "sent report");
        Ok(())
    }
}
