//! Monitor configuration: measurement modules and waveform channels.
//!
//! The monitor reports values through a fixed set of measurement modules
//! (ECG, invasive pressures, gas analysis and so on), each owning a
//! status field and a list of measurements addressed by schema paths.
//! The tables in [`tables`] are the raw, protocol-level description;
//! [`MonitorConfig::standard`] parses them once into reusable paths.
//! Path defects in the tables are programming errors and abort at
//! construction, like a schema length mismatch.

mod tables;

use crate::schema::{FieldPath, Segment};

/// The four physiological data classes carried by one transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhdbClass {
    Basic,
    Ext1,
    Ext2,
    Ext3,
}

/// One requestable waveform channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveChannel {
    pub label: &'static str,
    pub code: u8,
    /// Documented sample rate, used to budget requests. Channels without
    /// one decode fine but cannot be rate-checked.
    pub samples_per_second: Option<u16>,
    pub scale: f64,
}

/// A measurement module instance with parsed status and value paths.
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    /// Display name, carrying the instance for multi-slot modules
    /// ("INV-BP (p2)").
    pub name: String,
    pub group: &'static str,
    pub class: PhdbClass,
    pub exists: FieldPath,
    pub active: FieldPath,
    pub measurements: Vec<Measurement>,
}

/// One measurement inside a module.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub label: String,
    pub class: PhdbClass,
    pub path: FieldPath,
    /// Raw stored-bytes view of the same field, present when the path
    /// addresses a whole leaf rather than bits of one. Plain values are
    /// read through this as signed 16-bit quantities.
    pub raw_path: Option<FieldPath>,
    pub scale: f64,
    pub choices: Option<&'static [(u32, &'static str)]>,
    pub dynamic_label: Option<DynamicLabel>,
}

/// A display label resolved at decode time from a sibling field.
#[derive(Debug, Clone)]
pub struct DynamicLabel {
    /// Template with a `{}` placeholder for the resolved choice text.
    pub template: &'static str,
    pub path: FieldPath,
    pub choices: &'static [(u32, &'static str)],
}

pub fn choice_text(choices: &'static [(u32, &'static str)], key: u32) -> Option<&'static str> {
    choices.iter().find(|(k, _)| *k == key).map(|(_, text)| *text)
}

/// The full parsed configuration of a monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    modules: Vec<ModuleConfig>,
    channels: &'static [WaveChannel],
}

impl MonitorConfig {
    /// Build the standard module and channel set.
    pub fn standard() -> Self {
        let mut modules = Vec::new();
        for raw in tables::MODULES {
            if raw.instances.is_empty() {
                modules.push(build_module(raw, None));
            } else {
                for instance in raw.instances {
                    modules.push(build_module(raw, Some(*instance)));
                }
            }
        }
        Self {
            modules,
            channels: tables::WAVE_CHANNELS,
        }
    }

    /// Module instances in reporting order.
    pub fn modules(&self) -> &[ModuleConfig] {
        &self.modules
    }

    pub fn wave_channels(&self) -> &'static [WaveChannel] {
        self.channels
    }

    pub fn wave_channel(&self, label: &str) -> Option<&'static WaveChannel> {
        self.channels.iter().find(|c| c.label == label)
    }

    pub fn wave_channel_by_code(&self, code: u8) -> Option<&'static WaveChannel> {
        self.channels.iter().find(|c| c.code == code)
    }
}

fn build_module(
    raw: &'static tables::RawModule,
    instance: Option<(&'static str, &'static str)>,
) -> ModuleConfig {
    let name = match instance {
        Some((_, to)) => format!("{} ({})", raw.group, to),
        None => raw.group.to_string(),
    };
    let status = substitute(raw.status_key, instance);
    let exists = parse_path(&format!("{status}:0"));
    let active = parse_path(&format!("{status}:1"));
    let measurements = raw
        .measurements
        .iter()
        .map(|m| build_measurement(raw, m, instance))
        .collect();
    ModuleConfig {
        name,
        group: raw.group,
        class: raw.class,
        exists,
        active,
        measurements,
    }
}

fn build_measurement(
    raw: &'static tables::RawModule,
    entry: &'static tables::RawMeasurement,
    instance: Option<(&'static str, &'static str)>,
) -> Measurement {
    let label = match instance {
        Some((_, to)) => format!("{} ({})", entry.label, to),
        None => entry.label.to_string(),
    };
    let key = substitute(entry.key, instance);
    let path = parse_path(&key);
    let raw_path = matches!(path.segments().last(), Some(Segment::Name(_)))
        .then(|| parse_path(&format!("{key},")));
    let dynamic_label = entry.label_from.map(|(template, source)| {
        let Some(sibling) = raw.measurements.iter().find(|c| c.label == source) else {
            panic!("module {}: no label source {source}", raw.group);
        };
        let Some(choices) = sibling.choices else {
            panic!("module {}: label source {source} has no choices", raw.group);
        };
        DynamicLabel {
            template,
            path: parse_path(&substitute(sibling.key, instance)),
            choices,
        }
    });
    Measurement {
        label,
        class: raw.class,
        path,
        raw_path,
        scale: entry.scale,
        choices: entry.choices,
        dynamic_label,
    }
}

fn substitute(key: &str, instance: Option<(&str, &str)>) -> String {
    match instance {
        Some((from, to)) => key.replace(from, to),
        None => key.to_string(),
    }
}

fn parse_path(key: &str) -> FieldPath {
    match FieldPath::parse(key) {
        Ok(path) => path,
        Err(err) => panic!("configuration path {key:?}: {err}"),
    }
}
