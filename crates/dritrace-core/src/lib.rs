//! Core decoding library for Datex Record Interface serial captures.
//!
//! This crate implements the decoding pipeline used by the CLI: byte
//! sources feed a resumable frame synchronizer, validated frames are
//! decoded through declarative record schemas, and physiological or
//! waveform payloads are aggregated into a deterministic report.
//! Decoding is byte-oriented and side-effect free; all I/O is isolated
//! in `source` modules. Wire conventions (byte stuffing, little-endian
//! records, subrecord descriptor tables) live in `protocol`, the
//! generic record codec in `schema`, and the monitor's measurement and
//! waveform tables in `config`.
//!
//! Invariants:
//! - Report outputs are deterministic and stable across runs.
//! - Corrupt frames are dropped silently; the stream resynchronizes on
//!   the next delimiter.
//! - Sentinel readings surface as explicit missing markers, never as
//!   scaled numbers.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use dritrace_core::decode_raw_file;
//!
//! let report = decode_raw_file(Path::new("capture.bin"))?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod config;
mod decode;
pub mod protocol;
pub mod schema;
mod source;

pub use decode::{DecodeError, StreamDecoder, decode_byte_source, decode_raw_file};
pub use source::{ByteSource, RawFileSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Timestamp used when the stream carried no decodable frame time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use dritrace_core::make_stub_report;
///
/// let report = make_stub_report("capture.bin", 123);
/// assert_eq!(report.report_version, dritrace_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the protocol level).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the last decoded frame.
    pub generated_at: String,

    /// Input capture metadata.
    pub input: InputInfo,

    /// Frame synchronizer counters.
    pub stream: StreamSummary,
    /// Latest module status snapshot, in reporting order.
    pub modules: Vec<ModuleStatus>,
    /// One row per decoded physiological record, in arrival order.
    pub rows: Vec<MeasurementRow>,
    /// Waveform series in channel-table order.
    pub waves: Vec<WaveformSeries>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use dritrace_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "dritrace".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "dritrace");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "dritrace").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use dritrace_core::InputInfo;
///
/// let input = InputInfo {
///     path: "capture.bin".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Frame synchronizer counters for one stream.
///
/// # Examples
/// ```
/// use dritrace_core::StreamSummary;
///
/// let stream = StreamSummary {
///     frames_seen: 4,
///     frames_accepted: 3,
/// };
/// assert!(stream.frames_accepted <= stream.frames_seen);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Delimited frame candidates observed.
    pub frames_seen: u64,
    /// Candidates that passed checksum validation.
    pub frames_accepted: u64,
}

/// Status of one measurement module instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleStatus {
    /// Module name, carrying the instance for multi-slot modules
    /// ("INV-BP (p2)").
    pub name: String,
    /// Whether the module was both present and actively measuring.
    pub active: bool,
}

/// One decoded physiological record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// RFC3339 timestamp from the frame's embedded time field.
    pub time: String,
    /// Labeled values from every active module, in configuration order.
    pub values: Vec<MeasurementSample>,
}

/// A labeled measurement value inside a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementSample {
    pub label: String,
    pub value: MeasurementValue,
}

/// A resolved measurement value.
///
/// Sentinel readings (no data, over range and the rest of the reserved
/// band) are reported as `Missing` and serialize to JSON `null`; they
/// are never scaled into plausible-looking numbers.
///
/// # Examples
/// ```
/// use dritrace_core::MeasurementValue;
///
/// let json = serde_json::to_string(&MeasurementValue::Missing)?;
/// assert_eq!(json, "null");
/// let json = serde_json::to_string(&MeasurementValue::Float(0.72))?;
/// assert_eq!(json, "0.72");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Float(f64),
    Integer(i64),
    Bool(bool),
    /// Text resolved through a configured lookup table.
    Text(String),
    Missing,
}

/// Samples of one waveform channel, growing as frames arrive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformSeries {
    /// Channel label ("ECG1", "PLETH", ...).
    pub channel: String,
    /// Per-frame sample batches in arrival order.
    pub segments: Vec<WaveSegment>,
}

/// Samples decoded from one frame; all share the frame's timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSegment {
    /// RFC3339 timestamp of the enclosing frame.
    pub time: String,
    pub samples: Vec<f64>,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use dritrace_core::make_stub_report;
///
/// let report = make_stub_report("capture.bin", 123);
/// assert!(report.rows.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "dritrace".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        stream: StreamSummary {
            frames_seen: 0,
            frames_accepted: 0,
        },
        modules: vec![],
        rows: vec![],
        waves: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_serialize_to_null() {
        let row = MeasurementRow {
            time: DEFAULT_GENERATED_AT.to_string(),
            values: vec![
                MeasurementSample {
                    label: "ECG HR".to_string(),
                    value: MeasurementValue::Integer(72),
                },
                MeasurementSample {
                    label: "ECG ST1".to_string(),
                    value: MeasurementValue::Missing,
                },
            ],
        };

        let value = serde_json::to_value(&row).expect("row json");
        assert_eq!(value["values"][0]["value"], 72);
        assert!(value["values"][1]["value"].is_null());
    }

    #[test]
    fn report_roundtrips_through_json() {
        let mut report = make_stub_report("capture.bin", 9);
        report.modules.push(ModuleStatus {
            name: "ECG".to_string(),
            active: true,
        });
        report.waves.push(WaveformSeries {
            channel: "PLETH".to_string(),
            segments: vec![WaveSegment {
                time: DEFAULT_GENERATED_AT.to_string(),
                samples: vec![1.0, 2.0],
            }],
        });

        let json = serde_json::to_string(&report).expect("report json");
        let back: Report = serde_json::from_str(&json).expect("report parse");
        assert_eq!(back.modules[0].name, "ECG");
        assert_eq!(back.waves[0].segments[0].samples, vec![1.0, 2.0]);
    }
}
