//! Fixed-capacity output report buffer.

#![deny(static_mut_refs)]

use core::fmt;

/// Largest report the classic protocol emits, rounded up.
pub const REPORT_CAPACITY: usize = 8;

/// A single device command: up to [`REPORT_CAPACITY`] bytes, stored inline.
///
/// The empty report doubles as the "no-op" marker returned in place of a
/// rejected command; it must never be sent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Report {
    data: [u8; REPORT_CAPACITY],
    len: usize,
}

impl Report {
    /// The all-zero, zero-length no-op marker.
    pub const EMPTY: Report = Report {
        data: [0; REPORT_CAPACITY],
        len: 0,
    };

    /// Build a report from a fixed-size array known to fit.
    pub fn new<const N: usize>(bytes: [u8; N]) -> Self {
        const { assert!(N <= REPORT_CAPACITY, "report exceeds capacity") };
        let mut data = [0; REPORT_CAPACITY];
        for (dst, src) in data.iter_mut().zip(bytes) {
            *dst = src;
        }
        Self { data, len: N }
    }

    /// Copy `bytes` into a report; `None` when it does not fit.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > REPORT_CAPACITY {
            return None;
        }
        let mut data = [0; REPORT_CAPACITY];
        data.iter_mut().zip(bytes).for_each(|(dst, src)| *dst = *src);
        Some(Self {
            data,
            len: bytes.len(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.get(..self.len).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` for the rejected-command marker (every byte zero).
    pub fn is_noop(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// First byte: slot mask in the high nibble, opcode in the low nibble.
    pub fn command_byte(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    /// Replace the opcode nibble of byte 0, keeping the slot nibble.
    pub(crate) fn replace_opcode(&mut self, opcode: u8) {
        if self.len == 0 {
            return;
        }
        if let Some(first) = self.data.first_mut() {
            *first = (*first & 0xF0) | (opcode & 0x0F);
        }
    }
}

impl AsRef<[u8]> for Report {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Report({:02X?})", self.as_bytes())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for byte in self.as_bytes() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
            first = false;
        }
        Ok(())
    }
}
