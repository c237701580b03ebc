//! Datex Record Interface wire protocol.
//!
//! The monitor speaks a byte-stuffed serial framing (`framing`) carrying
//! fixed-layout little-endian records (`layout`). Outbound subscription
//! frames are built in `request`. Constants below follow the interface
//! definitions of the Record Interface; names keep the protocol's own
//! terminology.

pub mod framing;
pub mod layout;
pub mod request;

pub use framing::FrameSync;
pub use request::{PhdbRecordType, RequestError, WaveRequestMode};

/// Frame delimiter.
pub const FRAME_CHAR: u8 = 0x7E;
/// Escape character inside a frame.
pub const CTRL_CHAR: u8 = 0x7D;
/// OR-mask restoring an escaped byte on receive.
pub const BIT_RESTORE: u8 = 0x7C;
/// AND-mask applied to delimiter/escape bytes when stuffing on send.
pub const STUFF_MASK: u8 = 0x5F;

/// Smallest sentinel: no valid data at all.
pub const DATA_INVALID: i16 = -32767;
/// Value exceeds the upper valid limit. Everything at or below this (down
/// to `DATA_INVALID`) is control information, not a measurement.
pub const DATA_OVER_RANGE: i16 = -32763;

/// Record main type: physiological data and related requests.
pub const MT_PHDB: u16 = 0;
/// Record main type: waveform data and related requests.
pub const MT_WAVE: u16 = 1;

/// Physiological record subtype: currently displayed values.
pub const PH_DISPL: u8 = 1;
/// Physiological record subtype: 10 second trend.
pub const PH_10S_TREND: u8 = 2;
/// Physiological record subtype: 60 second trend.
pub const PH_60S_TREND: u8 = 3;

/// Class bitmask: basic class is implied by a zero mask.
pub const PHDBCL_REQ_BASIC_MASK: u32 = 0x0000;
pub const PHDBCL_REQ_EXT1_MASK: u32 = 0x0002;
pub const PHDBCL_REQ_EXT2_MASK: u32 = 0x0004;
pub const PHDBCL_REQ_EXT3_MASK: u32 = 0x0008;

/// Waveform request types.
pub const WF_REQ_CONT_START: u16 = 0;
pub const WF_REQ_CONT_STOP: u16 = 1;
pub const WF_REQ_TIMED_START: u16 = 2;

/// Terminates a subrecord descriptor list shorter than eight entries.
pub const EOL_SUBR_LIST: u8 = 0xFF;
/// Waveform channel code carrying transmission commands, never samples.
pub const WAVE_CMD: u8 = 0;

/// The monitor honours waveform sets up to this aggregate rate.
pub const MAX_WAVE_SAMPLES_PER_SECOND: u32 = 600;

/// Common header length in bytes.
pub const HEADER_LEN: usize = 40;
/// Physiological transmission request record length.
pub const PHDB_REQUEST_LEN: usize = 49;
/// Waveform transmission request record length.
pub const WAVE_REQUEST_LEN: usize = 72;
/// Full monitor response record length.
pub const RESPONSE_LEN: usize = 1490;
/// Data area length inside a response (after the common header).
pub const DATA_AREA_LEN: usize = 1450;
/// Physiological data block length.
pub const PHDB_LEN: usize = 1088;
/// Length of each physiological class block (basic, ext1, ext2, ext3).
pub const CLASS_LEN: usize = 270;
/// Number of subrecord descriptor slots in the common header.
pub const SUBRECORD_SLOTS: usize = 8;
