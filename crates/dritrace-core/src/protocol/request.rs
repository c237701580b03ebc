//! Outbound transmission requests.
//!
//! Requests reuse the inbound record layouts: a record is filled in,
//! encoded, then framed with byte stuffing and a trailing checksum. The
//! checksum accumulates the stuffed bytes as emitted (both halves of an
//! escape sequence count), matching what the monitor verifies.

use thiserror::Error;

use super::layout::{PHDB_REQUEST, WAVE_REQUEST};
use super::{
    CTRL_CHAR, EOL_SUBR_LIST, FRAME_CHAR, MAX_WAVE_SAMPLES_PER_SECOND, MT_PHDB, MT_WAVE,
    PH_10S_TREND, PH_60S_TREND, PH_DISPL, PHDB_REQUEST_LEN, PHDBCL_REQ_EXT1_MASK,
    PHDBCL_REQ_EXT2_MASK, PHDBCL_REQ_EXT3_MASK, STUFF_MASK, SUBRECORD_SLOTS, WAVE_CMD,
    WAVE_REQUEST_LEN, WF_REQ_CONT_START, WF_REQ_CONT_STOP, WF_REQ_TIMED_START,
};
use crate::config::MonitorConfig;
use crate::schema::{Record, Schema, SchemaError};

/// Errors building outbound requests.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("unknown waveform channel: {label}")]
    UnknownChannel { label: String },
    #[error("requested waveforms total {total} samples/s, limit is {limit}")]
    SampleRateExceeded { total: u32, limit: u32 },
    #[error("at most {limit} waveform channels fit in one request, got {requested}")]
    TooManyChannels { requested: usize, limit: usize },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Physiological record subtype selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhdbRecordType {
    Displayed,
    Trend10s,
    Trend60s,
}

impl PhdbRecordType {
    pub fn code(self) -> u8 {
        match self {
            PhdbRecordType::Displayed => PH_DISPL,
            PhdbRecordType::Trend10s => PH_10S_TREND,
            PhdbRecordType::Trend60s => PH_60S_TREND,
        }
    }
}

/// Waveform transmission mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveRequestMode {
    ContinuousStart,
    ContinuousStop,
    TimedStart,
}

impl WaveRequestMode {
    pub fn code(self) -> u16 {
        match self {
            WaveRequestMode::ContinuousStart => WF_REQ_CONT_START,
            WaveRequestMode::ContinuousStop => WF_REQ_CONT_STOP,
            WaveRequestMode::TimedStart => WF_REQ_TIMED_START,
        }
    }
}

/// Encode a record and wrap it in a stuffed, checksummed frame.
pub fn build_frame(schema: &Schema, record: &Record) -> Vec<u8> {
    let payload = schema.encode(record);
    let mut out = Vec::with_capacity(payload.len() + 4);
    let mut checksum = 0u8;
    out.push(FRAME_CHAR);
    for byte in payload {
        if byte == FRAME_CHAR || byte == CTRL_CHAR {
            let stuffed = byte & STUFF_MASK;
            out.push(CTRL_CHAR);
            out.push(stuffed);
            checksum = checksum.wrapping_add(CTRL_CHAR).wrapping_add(stuffed);
        } else {
            out.push(byte);
            checksum = checksum.wrapping_add(byte);
        }
    }
    out.push(checksum);
    out.push(FRAME_CHAR);
    out
}

/// Build a physiological data subscription frame.
///
/// A positive `interval` subscribes to all four data classes at that rate
/// in seconds; an interval of zero unsubscribes.
pub fn phdb_request(record_type: PhdbRecordType, interval: u16) -> Result<Vec<u8>, RequestError> {
    let mut record = PHDB_REQUEST.instantiate();
    record.set_scalar("r_len", PHDB_REQUEST_LEN as u64)?;
    record.set_scalar("r_maintype", u64::from(MT_PHDB))?;
    record.set_scalar("sr_offset1", 0)?;
    record.set_scalar("sr_type1", 0)?; // physiological data request
    record.set_scalar("sr_offset2", 0)?;
    record.set_scalar("sr_type2", u64::from(EOL_SUBR_LIST))?;
    record.set_scalar("phdb_rcrd_type", u64::from(record_type.code()))?;
    record.set_scalar("tx_interval", u64::from(interval))?;
    let class_bf = if interval > 0 {
        PHDBCL_REQ_EXT1_MASK | PHDBCL_REQ_EXT2_MASK | PHDBCL_REQ_EXT3_MASK
    } else {
        0
    };
    record.set_scalar("phdb_class_bf", u64::from(class_bf))?;
    Ok(build_frame(&PHDB_REQUEST, &record))
}

/// Build a waveform transmission frame for the named channels.
///
/// The channel set is capped at eight codes, terminated with the 0xFF
/// sentinel when shorter, and validated against the monitor's 600
/// samples/s aggregate budget. A stop request may carry no channels at
/// all; its set stays zeroed.
pub fn waveform_request(
    config: &MonitorConfig,
    channels: &[&str],
    mode: WaveRequestMode,
) -> Result<Vec<u8>, RequestError> {
    let mut record = WAVE_REQUEST.instantiate();
    record.set_scalar("r_len", WAVE_REQUEST_LEN as u64)?;
    record.set_scalar("r_maintype", u64::from(MT_WAVE))?;
    record.set_scalar("sr_offset1", 0)?;
    record.set_scalar("sr_type1", u64::from(WAVE_CMD))?;
    record.set_scalar("sr_offset2", 0)?;
    record.set_scalar("sr_type2", u64::from(EOL_SUBR_LIST))?;
    record.set_scalar("req_type", u64::from(mode.code()))?;
    record.set_scalar("res", 0)?;
    if !channels.is_empty() {
        let mut set = waveform_set(config, channels)?;
        // Leaf bytes are stored in reverse wire order.
        set.reverse();
        record.set_bytes("type", set)?;
    }
    Ok(build_frame(&WAVE_REQUEST, &record))
}

/// Resolve channel labels into the eight-byte request set.
fn waveform_set(config: &MonitorConfig, channels: &[&str]) -> Result<Vec<u8>, RequestError> {
    if channels.len() > SUBRECORD_SLOTS {
        return Err(RequestError::TooManyChannels {
            requested: channels.len(),
            limit: SUBRECORD_SLOTS,
        });
    }

    let mut set = Vec::with_capacity(SUBRECORD_SLOTS);
    let mut total_rate = 0u32;
    for label in channels {
        let channel = config
            .wave_channel(label)
            .ok_or_else(|| RequestError::UnknownChannel {
                label: (*label).to_string(),
            })?;
        // Channels without a documented rate do not count against the
        // budget; the monitor drops what it cannot fit.
        total_rate += u32::from(channel.samples_per_second.unwrap_or(0));
        set.push(channel.code);
    }
    if total_rate > MAX_WAVE_SAMPLES_PER_SECOND {
        return Err(RequestError::SampleRateExceeded {
            total: total_rate,
            limit: MAX_WAVE_SAMPLES_PER_SECOND,
        });
    }

    if set.len() < SUBRECORD_SLOTS {
        set.push(EOL_SUBR_LIST);
    }
    set.resize(SUBRECORD_SLOTS, 0);
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FrameSync;

    #[test]
    fn phdb_subscribe_frame_is_framed_and_checksummed() {
        let frame = phdb_request(PhdbRecordType::Displayed, 10).unwrap();
        assert_eq!(frame.first(), Some(&FRAME_CHAR));
        assert_eq!(frame.last(), Some(&FRAME_CHAR));

        // Checksum over the stuffed body must match the trailing byte.
        let body = &frame[1..frame.len() - 2];
        let sum: u32 = body.iter().map(|b| u32::from(*b)).sum();
        assert_eq!(sum as u8, frame[frame.len() - 2]);

        // No unescaped delimiter or escape char inside the body.
        assert!(body.iter().all(|b| *b != FRAME_CHAR));
    }

    #[test]
    fn phdb_unsubscribe_zeroes_the_class_bitmask() {
        let frame = phdb_request(PhdbRecordType::Displayed, 0).unwrap();
        // tx_interval and phdb_class_bf both zero: bytes 40.. of the
        // payload are record type 1 then zeros.
        let payload = &frame[1..frame.len() - 2];
        assert_eq!(payload[40], PH_DISPL);
        assert!(payload[41..].iter().all(|b| *b == 0));
    }

    #[test]
    fn wave_request_terminates_short_sets() {
        let config = MonitorConfig::standard();
        let frame =
            waveform_request(&config, &["ECG1", "PLETH"], WaveRequestMode::ContinuousStart)
                .unwrap();
        let payload = &frame[1..frame.len() - 2];
        // Tail starts at byte 40: req_type(2) res(2) then the channel set.
        assert_eq!(&payload[44..52], &[1, 8, 0xFF, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn wave_request_rejects_unknown_channels_and_oversized_sets() {
        let config = MonitorConfig::standard();
        let err = waveform_request(&config, &["NOPE"], WaveRequestMode::ContinuousStart)
            .unwrap_err();
        assert!(matches!(err, RequestError::UnknownChannel { .. }));

        // Three 300 samples/s ECG channels blow the 600 samples/s budget.
        let err = waveform_request(
            &config,
            &["ECG1", "ECG2", "ECG3"],
            WaveRequestMode::ContinuousStart,
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::SampleRateExceeded { .. }));
    }

    #[test]
    fn request_frames_survive_the_inbound_framer() {
        // The framer restores stuffing but validates the checksum over the
        // restored bytes, so only stuff-free requests round-trip; the
        // physiological request payload contains neither 0x7E nor 0x7D.
        let frame = phdb_request(PhdbRecordType::Trend10s, 1).unwrap();
        let mut sync = FrameSync::new();
        sync.extend(&frame);
        let received = sync.next_frame().expect("frame should validate");
        assert_eq!(received.len(), PHDB_REQUEST_LEN);
        assert_eq!(received[0], PHDB_REQUEST_LEN as u8);
    }
}
