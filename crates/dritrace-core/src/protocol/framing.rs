//! Byte-stuffed frame synchronization.
//!
//! Frames are delimited by 0x7E; inside a frame, 0x7D marks an escaped
//! byte that is restored by OR-ing 0x7C. The last accumulated byte is a
//! checksum (low byte of the sum of everything before it). A checksum
//! mismatch drops the frame without surfacing an error: on a shared
//! serial line, corruption is routine and the next frame resynchronizes
//! the stream.

use std::collections::VecDeque;

use super::{BIT_RESTORE, CTRL_CHAR, FRAME_CHAR};

/// Resumable single-byte framing state machine.
///
/// Feed bytes with [`push`](Self::push) in arrival order and drain
/// validated frames with [`next_frame`](Self::next_frame); a frame may
/// complete mid-chunk, so state carries over between calls. The machine
/// is not re-entrant: one instance per stream.
///
/// # Examples
/// ```
/// use dritrace_core::protocol::FrameSync;
///
/// let mut sync = FrameSync::new();
/// // payload 0x01 0x02, checksum 0x03
/// for byte in [0x7E, 0x01, 0x02, 0x03, 0x7E] {
///     sync.push(byte);
/// }
/// assert_eq!(sync.next_frame(), Some(vec![0x01, 0x02]));
/// ```
#[derive(Debug)]
pub struct FrameSync {
    awaiting_start: bool,
    collecting: bool,
    closing: bool,
    escape_pending: bool,
    accum: Vec<u8>,
    frames: VecDeque<Vec<u8>>,
    seen: u64,
    accepted: u64,
}

impl Default for FrameSync {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSync {
    pub fn new() -> Self {
        Self {
            awaiting_start: true,
            collecting: false,
            closing: false,
            escape_pending: false,
            accum: Vec::new(),
            frames: VecDeque::new(),
            seen: 0,
            accepted: 0,
        }
    }

    /// Feed one byte from the stream.
    pub fn push(&mut self, byte: u8) {
        if byte == FRAME_CHAR {
            if self.awaiting_start {
                self.awaiting_start = false;
                self.collecting = true;
            } else {
                self.closing = true;
                self.collecting = false;
            }
        }

        if self.collecting {
            if byte == CTRL_CHAR {
                self.escape_pending = true;
            } else if self.escape_pending {
                self.escape_pending = false;
                self.accum.push(byte | BIT_RESTORE);
            } else if byte != FRAME_CHAR {
                self.accum.push(byte);
            }
        } else if self.closing {
            if self.accum.is_empty() {
                // Two delimiters back to back: the second one opens the
                // next frame rather than closing an empty one.
                self.collecting = true;
                self.closing = false;
            } else {
                self.seen += 1;
                let sum: u32 = self.accum[..self.accum.len() - 1]
                    .iter()
                    .map(|b| u32::from(*b))
                    .sum();
                if sum as u8 == self.accum[self.accum.len() - 1] {
                    self.accepted += 1;
                    self.accum.pop();
                    self.frames.push_back(std::mem::take(&mut self.accum));
                } else {
                    self.accum.clear();
                }
                self.closing = false;
            }
        }
    }

    /// Feed a chunk of bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.push(*byte);
        }
    }

    /// Pop the oldest validated frame, checksum byte stripped.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        self.frames.pop_front()
    }

    /// Delimited frame candidates observed so far.
    pub fn frames_seen(&self) -> u64 {
        self.seen
    }

    /// Candidates that passed checksum validation.
    pub fn frames_accepted(&self) -> u64 {
        self.accepted
    }
}
