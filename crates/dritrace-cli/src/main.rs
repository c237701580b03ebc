use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;

use dritrace_core::config::MonitorConfig;
use dritrace_core::protocol::{PhdbRecordType, WaveRequestMode, request};
use dritrace_core::{ByteSource, RawFileSource, Report, StreamDecoder};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("DRITRACE_BUILD_COMMIT"),
    ", ",
    env!("DRITRACE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "dritrace")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline decoder for Datex Record Interface serial captures.",
    long_about = None,
    after_help = "Examples:\n  dritrace capture decode monitor.bin -o report.json\n  dritrace capture decode monitor.bin --stdout --measurement \"ECG HR\"\n  dritrace request phdb --record-type displayed --interval 10\n  dritrace request wave --channel ECG1 --channel PLETH --mode start"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on recorded serial byte streams (offline-first).
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Build outbound transmission request frames.
    Request {
        #[command(subcommand)]
        command: RequestCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode a capture file and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  dritrace capture decode monitor.bin -o report.json\n  dritrace capture decode monitor.bin --stdout --pretty"
    )]
    Decode {
        /// Path to a raw serial capture file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Restrict rows to the given measurement label (repeatable)
        #[arg(long = "measurement")]
        measurements: Vec<String>,

        /// Restrict waveform series to the given channel label (repeatable)
        #[arg(long = "waveform")]
        waveforms: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RequestCommands {
    /// Build a physiological data subscription frame.
    Phdb {
        /// Record subtype to subscribe to
        #[arg(long, value_enum, default_value_t = RecordTypeArg::Displayed)]
        record_type: RecordTypeArg,

        /// Transmission interval in seconds; zero unsubscribes
        #[arg(long, default_value_t = 10)]
        interval: u16,

        #[command(flatten)]
        output: RequestOutput,
    },
    /// Build a waveform transmission request frame.
    Wave {
        /// Waveform channel label (repeatable, up to eight)
        #[arg(long = "channel")]
        channels: Vec<String>,

        /// Transmission mode
        #[arg(long, value_enum, default_value_t = ModeArg::Start)]
        mode: ModeArg,

        #[command(flatten)]
        output: RequestOutput,
    },
}

#[derive(clap::Args, Debug)]
struct RequestOutput {
    /// Write the raw frame bytes to this path instead of printing hex
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,

    /// Print a JSON summary instead of bare hex
    #[arg(long, conflicts_with = "out")]
    json: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RecordTypeArg {
    Displayed,
    Trend10s,
    Trend60s,
}

impl From<RecordTypeArg> for PhdbRecordType {
    fn from(arg: RecordTypeArg) -> Self {
        match arg {
            RecordTypeArg::Displayed => PhdbRecordType::Displayed,
            RecordTypeArg::Trend10s => PhdbRecordType::Trend10s,
            RecordTypeArg::Trend60s => PhdbRecordType::Trend60s,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Start,
    Stop,
    Timed,
}

impl From<ModeArg> for WaveRequestMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Start => WaveRequestMode::ContinuousStart,
            ModeArg::Stop => WaveRequestMode::ContinuousStop,
            ModeArg::Timed => WaveRequestMode::TimedStart,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                measurements,
                waveforms,
            } => cmd_capture_decode(
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                measurements,
                waveforms,
            ),
        },
        Commands::Request { command } => match command {
            RequestCommands::Phdb {
                record_type,
                interval,
                output,
            } => cmd_request_phdb(record_type, interval, output),
            RequestCommands::Wave {
                channels,
                mode,
                output,
            } => cmd_request_wave(channels, mode, output),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_capture_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    measurements: Vec<String>,
    waveforms: Vec<String>,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    if !resolved_input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", resolved_input.display()),
            Some("pass a recorded serial byte stream".to_string()),
        ));
    }
    let meta = fs::metadata(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a recorded serial byte stream".to_string()),
        ));
    }

    let rep = decode_capture(&resolved_input, meta.len(), measurements, waveforms)
        .context("capture decoding failed")?;
    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
        return Ok(());
    }

    let report = report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn decode_capture(
    input: &PathBuf,
    input_bytes: u64,
    measurements: Vec<String>,
    waveforms: Vec<String>,
) -> Result<Report> {
    let mut source = RawFileSource::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let mut decoder = StreamDecoder::new(MonitorConfig::standard())
        .with_filters(measurements)
        .with_wave_filters(waveforms);
    let mut buffer = Vec::new();
    while let Some(chunk) = source.next_chunk().context("read failed")? {
        buffer.extend_from_slice(&chunk);
        decoder.process(&buffer).context("decode failed")?;
    }
    Ok(decoder.into_report(&input.display().to_string(), input_bytes))
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

#[derive(Debug, Serialize)]
struct RequestSummary<'a> {
    kind: &'a str,
    bytes: usize,
    hex: String,
}

fn cmd_request_phdb(
    record_type: RecordTypeArg,
    interval: u16,
    output: RequestOutput,
) -> Result<(), CliError> {
    let frame = request::phdb_request(record_type.into(), interval)
        .context("request building failed")?;
    emit_request("phdb", &frame, output)
}

fn cmd_request_wave(
    channels: Vec<String>,
    mode: ModeArg,
    output: RequestOutput,
) -> Result<(), CliError> {
    let mode: WaveRequestMode = mode.into();
    if channels.is_empty() && mode != WaveRequestMode::ContinuousStop {
        return Err(CliError::new(
            "no waveform channels requested",
            Some("pass --channel at least once, or --mode stop".to_string()),
        ));
    }
    let config = MonitorConfig::standard();
    let labels: Vec<&str> = channels.iter().map(String::as_str).collect();
    let frame = request::waveform_request(&config, &labels, mode).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("list known channels with --help".to_string()),
        )
    })?;
    emit_request("wave", &frame, output)
}

fn emit_request(kind: &str, frame: &[u8], output: RequestOutput) -> Result<(), CliError> {
    if let Some(out) = output.out {
        fs::write(&out, frame)
            .with_context(|| format!("Failed to write frame: {}", out.display()))?;
        if !output.quiet {
            eprintln!("OK: {} byte frame written -> {}", frame.len(), out.display());
        }
        return Ok(());
    }

    let hex: String = frame.iter().map(|b| format!("{b:02x}")).collect();
    if output.json {
        let summary = RequestSummary {
            kind,
            bytes: frame.len(),
            hex,
        };
        let json = serde_json::to_string(&summary)
            .context("JSON serialization failed")
            .map_err(CliError::from)?;
        println!("{}", json);
    } else {
        println!("{}", hex);
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single capture file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches.iter().take(3).collect::<Vec<_>>();
        if !listed.is_empty() {
            let mut details = String::new();
            details.push_str("; matches: ");
            details.push_str(
                &listed
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if matches.len() > 3 {
                details.push_str(", ...");
            }
            message.push_str(&details);
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
