//! Waveform subrecord decoding.
//!
//! Each slot of the descriptor table names a channel by code and the
//! offset where its samples start; a slot's extent runs to the next
//! slot's offset. Samples are packed little-endian signed 16-bit. A
//! non-monotonic or out-of-range offset ends the record, keeping the
//! slots already decoded.

use crate::config::{MonitorConfig, WaveChannel};
use crate::protocol::{DATA_AREA_LEN, DATA_INVALID, EOL_SUBR_LIST, SUBRECORD_SLOTS};

/// Samples decoded from one waveform slot.
pub(super) struct WaveSlice {
    pub channel: &'static WaveChannel,
    pub samples: Vec<f64>,
}

pub(super) fn decode(
    config: &MonitorConfig,
    offsets: &[usize; SUBRECORD_SLOTS],
    types: &[u8; SUBRECORD_SLOTS],
    data: &[u8],
) -> Vec<WaveSlice> {
    let mut out = Vec::new();
    for slot in 0..SUBRECORD_SLOTS {
        if types[slot] == EOL_SUBR_LIST {
            break;
        }
        let offset = offsets[slot];
        let channel = config.wave_channel_by_code(types[slot]);

        let mut next = if slot == SUBRECORD_SLOTS - 1 {
            DATA_AREA_LEN
        } else {
            offsets[slot + 1]
        };
        if next == 0 {
            // Single-channel transmission: no following slot, so the
            // extent is one second of samples at the channel's rate.
            let Some(rate) = channel.and_then(|c| c.samples_per_second) else {
                break;
            };
            next = offset + 6 + 2 * usize::from(rate);
        }
        // The extent check guards the whole record: a malformed offset
        // ends decoding even when the slot's channel code is unknown.
        if next <= offset || next > DATA_AREA_LEN {
            break;
        }
        let Some(channel) = channel else {
            continue;
        };

        let start = (6 + offset).min(next);
        let raw: Vec<i16> = data[start..next]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        // Sentinel markers must never be scaled; a slot containing any
        // stays raw end to end.
        let valid = raw.iter().all(|s| *s > DATA_INVALID);
        let samples = raw
            .iter()
            .map(|s| {
                if valid {
                    f64::from(*s) * channel.scale
                } else {
                    f64::from(*s)
                }
            })
            .collect();
        out.push(WaveSlice { channel, samples });
    }
    out
}
