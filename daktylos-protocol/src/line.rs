//! Byte-fed line accumulator
//!
//! The transport hands us raw bytes in arbitrary chunks. The buffer
//! reassembles newline-terminated lines and parses each one; an
//! overlong or non-UTF-8 line is reported once at its terminating
//! newline and the stream resynchronizes immediately after.

use heapless::Vec;

use crate::message::{Message, MessageError};

/// Maximum message line length, excluding the newline
pub const MAX_LINE_LEN: usize = 64;

/// State machine for reassembling incoming lines
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(message))` when a newline completes a valid
    /// line, `Ok(None)` when more bytes are needed, or `Err` when the
    /// completed line was malformed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Message>, MessageError> {
        if byte != b'\n' {
            if self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return Ok(None);
        }

        let overflowed = self.overflowed;
        let result = if overflowed {
            Err(MessageError::MalformedLine)
        } else {
            match core::str::from_utf8(&self.buffer) {
                Ok(line) => Message::parse(line),
                Err(_) => Err(MessageError::MalformedLine),
            }
        };
        self.reset();
        result.map(Some)
    }
}
