//! End-to-end decoding over synthetic monitor output.

use std::io::Write;
use std::path::PathBuf;

use dritrace_core::config::MonitorConfig;
use dritrace_core::protocol::{
    CTRL_CHAR, DATA_AREA_LEN, EOL_SUBR_LIST, FRAME_CHAR, HEADER_LEN, MT_PHDB, MT_WAVE,
    RESPONSE_LEN, STUFF_MASK,
};
use dritrace_core::{MeasurementValue, StreamDecoder, decode_raw_file};

/// 2020-09-13T12:26:40Z.
const EPOCH: u32 = 1_600_000_000;

fn stuff_into(out: &mut Vec<u8>, byte: u8) {
    if byte == FRAME_CHAR || byte == CTRL_CHAR {
        out.push(CTRL_CHAR);
        out.push(byte & STUFF_MASK);
    } else {
        out.push(byte);
    }
}

/// Frame a record payload the way the monitor transmits it: delimiters,
/// byte stuffing, trailing checksum over the unstuffed payload.
fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = vec![FRAME_CHAR];
    let mut checksum = 0u8;
    for byte in payload {
        checksum = checksum.wrapping_add(*byte);
        stuff_into(&mut out, *byte);
    }
    stuff_into(&mut out, checksum);
    out.push(FRAME_CHAR);
    out
}

/// A response record: common header, descriptor table, data area.
fn response(main_type: u16, descriptors: &[(u16, u8)], data: &[u8]) -> Vec<u8> {
    assert!(descriptors.len() <= 8);
    assert_eq!(data.len(), DATA_AREA_LEN);
    let mut payload = vec![0u8; RESPONSE_LEN];
    payload[0..2].copy_from_slice(&(RESPONSE_LEN as u16).to_le_bytes());
    payload[6..10].copy_from_slice(&EPOCH.to_le_bytes());
    payload[14..16].copy_from_slice(&main_type.to_le_bytes());
    for (slot, (offset, ty)) in descriptors.iter().enumerate() {
        let at = 16 + 3 * slot;
        payload[at..at + 2].copy_from_slice(&offset.to_le_bytes());
        payload[at + 2] = *ty;
    }
    payload[HEADER_LEN..].copy_from_slice(data);
    payload
}

/// Data area whose basic class block carries an active ECG module with
/// heart rate 72 and an invasive pressure on channel p2.
fn phys_data() -> Vec<u8> {
    let mut data = vec![0u8; DATA_AREA_LEN];
    // Basic class at offset 0 starts after the 4-byte subrecord time.
    // ecg: status(4) label(2) hr(2) ...
    data[4] = 0b0000_0011; // exists | active
    data[10..12].copy_from_slice(&72i16.to_le_bytes());
    // p2 follows ecg (16 B) and p1 (14 B) at class offset 30.
    let p2 = 4 + 30;
    data[p2] = 0b0000_0011;
    data[p2 + 6..p2 + 8].copy_from_slice(&12_000i16.to_le_bytes()); // sys
    data
}

/// Data area carrying one second of PLETH samples in the first slot.
fn wave_data(sample: i16, count: usize) -> Vec<u8> {
    let mut data = vec![0u8; DATA_AREA_LEN];
    for i in 0..count {
        data[6 + 2 * i..8 + 2 * i].copy_from_slice(&sample.to_le_bytes());
    }
    data
}

fn capture_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend(frame(&response(
        MT_PHDB,
        &[(0, 1), (0, EOL_SUBR_LIST)],
        &phys_data(),
    )));
    // PLETH is channel code 8 at 100 samples/s.
    bytes.extend(frame(&response(
        MT_WAVE,
        &[(0, 8), (0, EOL_SUBR_LIST)],
        &wave_data(100, 100),
    )));
    // A corrupted copy: flip one payload byte, keep the stale checksum.
    let mut bad = frame(&response(MT_PHDB, &[(0, 1), (0, EOL_SUBR_LIST)], &phys_data()));
    bad[5] ^= 0x01;
    bytes.extend(bad);
    bytes
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("dritrace-stream-{}-{}", name, std::process::id()));
    path
}

fn value(report: &dritrace_core::Report, label: &str) -> MeasurementValue {
    report.rows[0]
        .values
        .iter()
        .find(|v| v.label == label)
        .unwrap_or_else(|| panic!("no sample {label}"))
        .value
        .clone()
}

#[test]
fn decodes_a_raw_capture_into_a_report() {
    let path = temp_path("capture");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&capture_bytes())
        .unwrap();

    let report = decode_raw_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(report.stream.frames_seen, 3);
    assert_eq!(report.stream.frames_accepted, 2);
    assert_eq!(report.generated_at, "2020-09-13T12:26:40Z");

    let ecg = report.modules.iter().find(|m| m.name == "ECG").unwrap();
    assert!(ecg.active);
    let bp = report
        .modules
        .iter()
        .find(|m| m.name == "INV-BP (p2)")
        .unwrap();
    assert!(bp.active);

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].time, "2020-09-13T12:26:40Z");
    assert_eq!(value(&report, "ECG HR"), MeasurementValue::Integer(72));
    let MeasurementValue::Float(sys) = value(&report, "INV-BP SYS (p2)") else {
        panic!("pressure should scale to a float");
    };
    assert!((sys - 120.0).abs() < 1e-9);

    assert_eq!(report.waves.len(), 1);
    assert_eq!(report.waves[0].channel, "PLETH");
    assert_eq!(report.waves[0].segments.len(), 1);
    let samples = &report.waves[0].segments[0].samples;
    assert_eq!(samples.len(), 100);
    assert!((samples[0] - 1.0).abs() < 1e-9);
}

#[test]
fn chunked_feeding_matches_a_single_pass() {
    let bytes = capture_bytes();

    let mut whole = StreamDecoder::new(MonitorConfig::standard());
    whole.process(&bytes).unwrap();

    let mut chunked = StreamDecoder::new(MonitorConfig::standard());
    let mut buffer = Vec::new();
    for chunk in bytes.chunks(97) {
        buffer.extend_from_slice(chunk);
        chunked.process(&buffer).unwrap();
    }

    assert_eq!(whole.frames_accepted(), chunked.frames_accepted());
    assert_eq!(whole.rows().len(), chunked.rows().len());
    assert_eq!(
        whole.rows()[0].values.len(),
        chunked.rows()[0].values.len()
    );
    assert_eq!(whole.waves().len(), chunked.waves().len());
}

#[test]
fn measurement_filters_restrict_report_rows() {
    let mut decoder = StreamDecoder::new(MonitorConfig::standard())
        .with_filters(vec!["ECG HR".to_string()]);
    decoder.process(&capture_bytes()).unwrap();

    let report = decoder.into_report("capture.bin", 0);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].values.len(), 1);
    assert_eq!(report.rows[0].values[0].label, "ECG HR");
    // Filters restrict rows only; the module snapshot stays complete.
    assert!(report.modules.iter().any(|m| m.name == "INV-BP (p2)"));
}

#[test]
fn wave_filters_restrict_report_series() {
    let mut decoder = StreamDecoder::new(MonitorConfig::standard())
        .with_wave_filters(vec!["ECG1".to_string()]);
    decoder.process(&capture_bytes()).unwrap();
    // Only PLETH arrived, and it was filtered out.
    assert!(decoder.waves().is_empty());
    assert_eq!(decoder.rows().len(), 1);
}

#[test]
fn short_frames_are_padded_to_full_length() {
    // A record truncated after the basic class block still decodes; the
    // missing tail reads as zeroed subrecord slots.
    let full = response(MT_PHDB, &[(0, 1), (0, EOL_SUBR_LIST)], &phys_data());
    let short = &full[..HEADER_LEN + 4 + 270];
    let mut decoder = StreamDecoder::new(MonitorConfig::standard());
    decoder.process(&frame(short)).unwrap();
    assert_eq!(decoder.rows().len(), 1);
    assert!(decoder.modules().iter().any(|m| m.name == "ECG"));
}

#[test]
fn unknown_main_types_are_counted_but_not_decoded() {
    let mut decoder = StreamDecoder::new(MonitorConfig::standard());
    let bytes = frame(&response(9, &[(0, 1)], &phys_data()));
    decoder.process(&bytes).unwrap();
    assert_eq!(decoder.frames_accepted(), 1);
    assert!(decoder.rows().is_empty());
    assert!(decoder.waves().is_empty());
}
