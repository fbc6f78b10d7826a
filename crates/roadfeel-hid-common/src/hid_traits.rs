//! HID transport traits

use crate::HidCommonResult;

/// Sink for encoded output reports.
///
/// The transport behind this trait (hidraw, hidapi, a capture file) is not
/// part of this workspace; implementations may block.
pub trait ReportWriter: Send {
    fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize>;

    fn is_connected(&self) -> bool {
        true
    }
}

impl<W: ReportWriter + ?Sized> ReportWriter for Box<W> {
    fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        (**self).write_report(data)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

pub mod mock {
    use super::*;
    use crate::HidCommonError;
    use std::sync::{Arc, Mutex};
    use tracing::trace;

    /// Writer that records every report and can simulate a disconnect.
    ///
    /// Clones share the same history, so a test can keep one handle while
    /// the wheel owns another.
    #[derive(Clone, Default)]
    pub struct RecordingWriter {
        write_history: Arc<Mutex<Vec<Vec<u8>>>>,
        disconnected: Arc<Mutex<bool>>,
    }

    impl RecordingWriter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn history(&self) -> Vec<Vec<u8>> {
            let history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
            history.clone()
        }

        /// Drain and return everything written so far.
        pub fn take_history(&self) -> Vec<Vec<u8>> {
            let mut history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *history)
        }

        pub fn disconnect(&self) {
            let mut disconnected = self.disconnected.lock().unwrap_or_else(|e| e.into_inner());
            *disconnected = true;
        }

        pub fn reconnect(&self) {
            let mut disconnected = self.disconnected.lock().unwrap_or_else(|e| e.into_inner());
            *disconnected = false;
        }
    }

    impl ReportWriter for RecordingWriter {
        fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
            if !self.is_connected() {
                return Err(HidCommonError::Disconnected);
            }

            trace!(len = data.len(), "recording report");
            let mut history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
            history.push(data.to_vec());
            Ok(data.len())
        }

        fn is_connected(&self) -> bool {
            !*self.disconnected.lock().unwrap_or_else(|e| e.into_inner())
        }
    }
}
