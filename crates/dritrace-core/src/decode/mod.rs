//! Streaming frame decoding.
//!
//! Raw bytes go through the frame synchronizer; each validated frame is
//! padded to the fixed response length, its common header decoded, and
//! the payload routed by main type to the physiological or waveform
//! decoder. Unknown main types are ignored, matching a monitor that may
//! speak newer record kinds than this tool understands.

mod subrecords;
mod waveforms;

use std::path::Path;
use std::sync::LazyLock;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::config::MonitorConfig;
use crate::protocol::layout::FRAME_RESPONSE;
use crate::protocol::{EOL_SUBR_LIST, FrameSync, MT_PHDB, MT_WAVE, RESPONSE_LEN, SUBRECORD_SLOTS};
use crate::schema::{FieldPath, FieldValue, SchemaError};
use crate::source::{ByteSource, RawFileSource, SourceError};
use crate::{
    DEFAULT_GENERATED_AT, InputInfo, MeasurementRow, ModuleStatus, REPORT_VERSION, Report,
    StreamSummary, ToolInfo, WaveSegment, WaveformSeries,
};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Common header paths, parsed once.
struct HeaderPaths {
    maintype: FieldPath,
    time: FieldPath,
    /// Data area in wire order.
    data: FieldPath,
    offsets: Vec<FieldPath>,
    types: Vec<FieldPath>,
}

static PATHS: LazyLock<HeaderPaths> = LazyLock::new(|| HeaderPaths {
    maintype: header_path("r_maintype"),
    time: header_path("r_time"),
    data: header_path("-data,"),
    offsets: (1..=SUBRECORD_SLOTS)
        .map(|i| header_path(&format!("sr_offset{i}")))
        .collect(),
    types: (1..=SUBRECORD_SLOTS)
        .map(|i| header_path(&format!("sr_type{i}")))
        .collect(),
});

fn header_path(path: &str) -> FieldPath {
    match FieldPath::parse(path) {
        Ok(path) => path,
        Err(err) => panic!("header path {path:?}: {err}"),
    }
}

/// Stateful decoder over an append-only byte stream.
///
/// Callers hand the whole buffer to [`process`](Self::process) after
/// every append; a cursor ensures bytes are consumed exactly once, so
/// repeated passes over a growing buffer are idempotent. One decoder
/// instance per stream; concurrent passes need external serialization.
pub struct StreamDecoder {
    config: MonitorConfig,
    sync: FrameSync,
    cursor: usize,
    filters: Option<Vec<String>>,
    wave_filters: Option<Vec<String>>,
    modules: Vec<ModuleStatus>,
    rows: Vec<MeasurementRow>,
    waves: Vec<WaveformSeries>,
    last_time: Option<i64>,
}

impl StreamDecoder {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            sync: FrameSync::new(),
            cursor: 0,
            filters: None,
            wave_filters: None,
            modules: Vec::new(),
            rows: Vec::new(),
            waves: Vec::new(),
            last_time: None,
        }
    }

    /// Restrict measurement rows to the given labels.
    pub fn with_filters(mut self, filters: Vec<String>) -> Self {
        self.filters = (!filters.is_empty()).then_some(filters);
        self
    }

    /// Restrict waveform series to the given channel labels.
    pub fn with_wave_filters(mut self, filters: Vec<String>) -> Self {
        self.wave_filters = (!filters.is_empty()).then_some(filters);
        self
    }

    /// Consume the bytes appended to `buffer` since the last call and
    /// decode every frame that completes.
    pub fn process(&mut self, buffer: &[u8]) -> Result<(), DecodeError> {
        if buffer.len() > self.cursor {
            self.sync.extend(&buffer[self.cursor..]);
            self.cursor = buffer.len();
        }
        while let Some(frame) = self.sync.next_frame() {
            self.dispatch(&frame)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, frame: &[u8]) -> Result<(), DecodeError> {
        // Short frames omit trailing unused subrecord slots; pad back to
        // the fixed response length before decoding.
        let mut padded = frame.to_vec();
        if padded.len() < RESPONSE_LEN {
            padded.resize(RESPONSE_LEN, 0);
        }
        let record = FRAME_RESPONSE.decode(&padded)?;
        let paths = &*PATHS;

        let main_type = record.get_scalar(&paths.maintype)? as u16;
        if main_type != MT_PHDB && main_type != MT_WAVE {
            return Ok(());
        }

        let epoch = record.get_scalar(&paths.time)? as i64;
        self.last_time = Some(epoch);
        let time = epoch_to_rfc3339(epoch);

        let mut offsets = [0usize; SUBRECORD_SLOTS];
        let mut types = [0u8; SUBRECORD_SLOTS];
        for slot in 0..SUBRECORD_SLOTS {
            offsets[slot] = record.get_scalar(&paths.offsets[slot])? as usize;
            types[slot] = record.get_scalar(&paths.types[slot])? as u8;
        }
        let FieldValue::Bytes(data) = record.get(&paths.data)? else {
            return Ok(());
        };

        if main_type == MT_PHDB {
            let descriptors: Vec<(usize, u8)> = offsets
                .iter()
                .zip(&types)
                .map(|(offset, ty)| (*offset, *ty))
                .take_while(|(_, ty)| *ty != EOL_SUBR_LIST)
                .collect();
            let (modules, row) = subrecords::decode(
                &self.config,
                self.filters.as_deref(),
                &descriptors,
                &data,
                &time,
            )?;
            self.modules = modules;
            if let Some(row) = row {
                self.rows.push(row);
            }
        } else {
            for slice in waveforms::decode(&self.config, &offsets, &types, &data) {
                if let Some(allowed) = &self.wave_filters {
                    if !allowed.iter().any(|l| l == slice.channel.label) {
                        continue;
                    }
                }
                self.append_wave(slice.channel.label, &time, slice.samples);
            }
        }
        Ok(())
    }

    fn append_wave(&mut self, label: &str, time: &str, samples: Vec<f64>) {
        let segment = WaveSegment {
            time: time.to_string(),
            samples,
        };
        match self.waves.iter_mut().find(|w| w.channel == label) {
            Some(series) => series.segments.push(segment),
            None => self.waves.push(WaveformSeries {
                channel: label.to_string(),
                segments: vec![segment],
            }),
        }
    }

    /// Latest module status snapshot.
    pub fn modules(&self) -> &[ModuleStatus] {
        &self.modules
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn waves(&self) -> &[WaveformSeries] {
        &self.waves
    }

    pub fn frames_seen(&self) -> u64 {
        self.sync.frames_seen()
    }

    pub fn frames_accepted(&self) -> u64 {
        self.sync.frames_accepted()
    }

    /// Consume the decoder into a report.
    pub fn into_report(self, input_path: &str, input_bytes: u64) -> Report {
        let generated_at = self
            .last_time
            .map(epoch_to_rfc3339)
            .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());

        // Waveform series in channel-table order, independent of the
        // order slots happened to arrive in.
        let order: Vec<&str> = self
            .config
            .wave_channels()
            .iter()
            .map(|c| c.label)
            .collect();
        let mut waves = self.waves;
        waves.sort_by_key(|series| {
            order
                .iter()
                .position(|label| *label == series.channel)
                .unwrap_or(usize::MAX)
        });

        Report {
            report_version: REPORT_VERSION,
            tool: ToolInfo {
                name: "dritrace".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at,
            input: InputInfo {
                path: input_path.to_string(),
                bytes: input_bytes,
            },
            stream: StreamSummary {
                frames_seen: self.sync.frames_seen(),
                frames_accepted: self.sync.frames_accepted(),
            },
            modules: self.modules,
            rows: self.rows,
            waves,
        }
    }
}

/// Decode a raw capture file into a report.
pub fn decode_raw_file(path: &Path) -> Result<Report, DecodeError> {
    let bytes = path.metadata()?.len();
    let source = RawFileSource::open(path)?;
    decode_byte_source(&path.display().to_string(), bytes, source)
}

/// Decode any byte source into a report.
pub fn decode_byte_source<S: ByteSource>(
    input_path: &str,
    input_bytes: u64,
    mut source: S,
) -> Result<Report, DecodeError> {
    let mut decoder = StreamDecoder::new(MonitorConfig::standard());
    let mut buffer = Vec::new();
    while let Some(chunk) = source.next_chunk()? {
        buffer.extend_from_slice(&chunk);
        decoder.process(&buffer)?;
    }
    Ok(decoder.into_report(input_path, input_bytes))
}

fn epoch_to_rfc3339(epoch: i64) -> String {
    OffsetDateTime::from_unix_timestamp(epoch)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string())
}
