use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

use dritrace_core::protocol::{
    CTRL_CHAR, DATA_AREA_LEN, EOL_SUBR_LIST, FRAME_CHAR, HEADER_LEN, MT_PHDB, RESPONSE_LEN,
    STUFF_MASK,
};

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dritrace"))
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let checksum = payload.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    let mut out = vec![FRAME_CHAR];
    for byte in payload.iter().chain(std::iter::once(&checksum)) {
        if *byte == FRAME_CHAR || *byte == CTRL_CHAR {
            out.push(CTRL_CHAR);
            out.push(byte & STUFF_MASK);
        } else {
            out.push(*byte);
        }
    }
    out.push(FRAME_CHAR);
    out
}

/// One physiological response frame carrying an active ECG module.
fn sample_capture_bytes() -> Vec<u8> {
    let mut payload = vec![0u8; RESPONSE_LEN];
    payload[0..2].copy_from_slice(&(RESPONSE_LEN as u16).to_le_bytes());
    payload[6..10].copy_from_slice(&1_600_000_000u32.to_le_bytes());
    payload[14..16].copy_from_slice(&MT_PHDB.to_le_bytes());
    payload[18] = 1; // basic class in slot one
    payload[21] = EOL_SUBR_LIST;
    let data = &mut payload[HEADER_LEN..HEADER_LEN + DATA_AREA_LEN];
    data[4] = 0b0000_0011; // ecg exists | active
    data[10..12].copy_from_slice(&72i16.to_le_bytes());
    frame(&payload)
}

fn write_sample_capture(temp: &TempDir) -> std::path::PathBuf {
    let path = temp.path().join("monitor.bin");
    std::fs::write(&path, sample_capture_bytes()).expect("write capture");
    path
}

#[test]
fn help_covers_capture_and_request() {
    cmd()
        .arg("capture")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
    cmd().arg("request").arg("phdb").arg("--help").assert().success();
    cmd().arg("request").arg("wave").arg("--help").assert().success();
}

#[test]
fn long_version_carries_build_metadata() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("commit"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_sample_capture(&temp);

    let assert = cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["report_version"], 1);
    assert_eq!(report["stream"]["frames_accepted"], 1);
    assert_eq!(report["rows"][0]["time"], "2020-09-13T12:26:40Z");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_sample_capture(&temp);
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_sample_capture(&temp);
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_sample_capture(&temp);
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn measurement_filter_limits_rows() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_sample_capture(&temp);

    let assert = cmd()
        .arg("capture")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--measurement")
        .arg("ECG HR")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    let values = report["rows"][0]["values"].as_array().expect("values");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["label"], "ECG HR");
    assert_eq!(values[0]["value"], 72);
}

#[test]
fn request_phdb_prints_a_framed_hex_line() {
    let assert = cmd()
        .arg("request")
        .arg("phdb")
        .arg("--record-type")
        .arg("displayed")
        .arg("--interval")
        .arg("10")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let hex = stdout.trim();
    assert!(hex.starts_with("7e"));
    assert!(hex.ends_with("7e"));
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn request_phdb_json_summary() {
    let assert = cmd()
        .arg("request")
        .arg("phdb")
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let summary: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(summary["kind"], "phdb");
    assert!(summary["bytes"].as_u64().expect("bytes") >= 49);
}

#[test]
fn request_wave_writes_frame_bytes() {
    let temp = TempDir::new().expect("tempdir");
    let out = temp.path().join("wave.frame");

    cmd()
        .arg("request")
        .arg("wave")
        .arg("--channel")
        .arg("ECG1")
        .arg("--channel")
        .arg("PLETH")
        .arg("--mode")
        .arg("start")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let bytes = std::fs::read(&out).expect("frame bytes");
    assert_eq!(bytes.first(), Some(&0x7E));
    assert_eq!(bytes.last(), Some(&0x7E));
}

#[test]
fn request_wave_rejects_unknown_channels() {
    cmd()
        .arg("request")
        .arg("wave")
        .arg("--channel")
        .arg("NOPE")
        .assert()
        .failure()
        .stderr(contains("unknown waveform channel"));
}

#[test]
fn request_wave_without_channels_needs_stop_mode() {
    cmd()
        .arg("request")
        .arg("wave")
        .assert()
        .failure()
        .stderr(contains("no waveform channels requested"));

    cmd()
        .arg("request")
        .arg("wave")
        .arg("--mode")
        .arg("stop")
        .assert()
        .success();
}
