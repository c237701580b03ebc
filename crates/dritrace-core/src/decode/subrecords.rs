//! Physiological subrecord decoding.
//!
//! A physiological transmission carries up to four class blocks (basic,
//! ext1, ext2, ext3) located through the frame's subrecord descriptor
//! table. Classes the monitor did not send stay zeroed, so module
//! existence bits read false and their measurements are skipped.

use super::DecodeError;
use crate::config::{Measurement, MonitorConfig, PhdbClass, choice_text};
use crate::protocol::layout::{BASIC_CLASS, EXT1_CLASS, EXT2_CLASS, EXT3_CLASS};
use crate::protocol::{CLASS_LEN, DATA_OVER_RANGE};
use crate::schema::{FieldValue, Record, Schema, SchemaError};
use crate::{MeasurementRow, MeasurementSample, MeasurementValue, ModuleStatus};

/// The four class records of one transmission, zeroed where absent.
struct ClassSet {
    records: [Record; 4],
}

impl ClassSet {
    /// Decode the class blocks named by the descriptor table. Blocks are
    /// filled positionally: slot 0 is basic, slot 3 is ext3. An offset
    /// that would run past the data area ends the table quietly, keeping
    /// whatever already decoded.
    fn decode(descriptors: &[(usize, u8)], data: &[u8]) -> Result<Self, SchemaError> {
        let schemas: [&Schema; 4] = [&BASIC_CLASS, &EXT1_CLASS, &EXT2_CLASS, &EXT3_CLASS];
        let mut records = [
            BASIC_CLASS.instantiate(),
            EXT1_CLASS.instantiate(),
            EXT2_CLASS.instantiate(),
            EXT3_CLASS.instantiate(),
        ];
        for (slot, (offset, _)) in descriptors.iter().take(records.len()).enumerate() {
            // The class block starts after the subrecord's own timestamp.
            let start = 4 + offset;
            let end = start + CLASS_LEN;
            if end > data.len() {
                break;
            }
            records[slot] = schemas[slot].decode(&data[start..end])?;
        }
        Ok(Self { records })
    }

    fn record(&self, class: PhdbClass) -> &Record {
        let slot = match class {
            PhdbClass::Basic => 0,
            PhdbClass::Ext1 => 1,
            PhdbClass::Ext2 => 2,
            PhdbClass::Ext3 => 3,
        };
        &self.records[slot]
    }
}

/// Decode one physiological record into a module status snapshot and a
/// measurement row. Only active modules contribute values; the optional
/// filter list restricts rows to the named measurements.
pub(super) fn decode(
    config: &MonitorConfig,
    filters: Option<&[String]>,
    descriptors: &[(usize, u8)],
    data: &[u8],
    time: &str,
) -> Result<(Vec<ModuleStatus>, Option<MeasurementRow>), DecodeError> {
    let classes = ClassSet::decode(descriptors, data)?;
    let mut modules = Vec::new();
    let mut values = Vec::new();

    for module in config.modules() {
        let record = classes.record(module.class);
        if !record.get(&module.exists)?.as_bit().unwrap_or(false) {
            continue;
        }
        let active = record.get(&module.active)?.as_bit().unwrap_or(false);
        modules.push(ModuleStatus {
            name: module.name.clone(),
            active,
        });
        if !active {
            continue;
        }

        for measurement in &module.measurements {
            if let Some(filters) = filters {
                if !filters.iter().any(|f| f == &measurement.label) {
                    continue;
                }
            }
            let record = classes.record(measurement.class);
            values.push(MeasurementSample {
                label: display_label(record, measurement)?,
                value: extract(record, measurement)?,
            });
        }
    }

    let row = (!values.is_empty()).then(|| MeasurementRow {
        time: time.to_string(),
        values,
    });
    Ok((modules, row))
}

/// Resolve a measurement's display label, following a dynamic label to
/// its source field when configured. An unmapped source value keeps the
/// static label.
fn display_label(record: &Record, measurement: &Measurement) -> Result<String, SchemaError> {
    let Some(dynamic) = &measurement.dynamic_label else {
        return Ok(measurement.label.clone());
    };
    let key = record.get_scalar(&dynamic.path)? as u32;
    Ok(match choice_text(dynamic.choices, key) {
        Some(text) => dynamic.template.replace("{}", text),
        None => measurement.label.clone(),
    })
}

fn extract(record: &Record, measurement: &Measurement) -> Result<MeasurementValue, SchemaError> {
    if let Some(choices) = measurement.choices {
        let key = match record.get(&measurement.path)? {
            FieldValue::Bit(bit) => u32::from(bit),
            FieldValue::Bits(bits) => bits,
            FieldValue::Scalar(value) => value as u32,
            _ => return Ok(MeasurementValue::Missing),
        };
        return Ok(text_or_missing(choice_text(choices, key)));
    }

    match record.get(&measurement.path)? {
        FieldValue::Bit(bit) => Ok(MeasurementValue::Bool(bit)),
        FieldValue::Bits(bits) => Ok(scaled(i64::from(bits), measurement.scale)),
        FieldValue::Scalar(value) => plain(record, measurement, value),
        _ => Ok(MeasurementValue::Missing),
    }
}

/// A whole-leaf value: two-byte fields are signed 16-bit quantities with
/// a sentinel band, anything else is taken unsigned.
fn plain(
    record: &Record,
    measurement: &Measurement,
    fallback: u64,
) -> Result<MeasurementValue, SchemaError> {
    let Some(raw) = &measurement.raw_path else {
        return Ok(scaled(fallback as i64, measurement.scale));
    };
    let FieldValue::Bytes(bytes) = record.get(raw)? else {
        return Ok(MeasurementValue::Missing);
    };
    if bytes.len() == 2 {
        let value = i16::from_be_bytes([bytes[0], bytes[1]]);
        if value <= DATA_OVER_RANGE {
            return Ok(MeasurementValue::Missing);
        }
        return Ok(scaled(i64::from(value), measurement.scale));
    }
    Ok(scaled(fallback as i64, measurement.scale))
}

fn scaled(value: i64, scale: f64) -> MeasurementValue {
    if scale == 1.0 {
        MeasurementValue::Integer(value)
    } else {
        MeasurementValue::Float(value as f64 * scale)
    }
}

fn text_or_missing(text: Option<&'static str>) -> MeasurementValue {
    match text {
        Some(text) => MeasurementValue::Text(text.to_string()),
        None => MeasurementValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::DATA_AREA_LEN;

    /// A data area whose basic class block reports an existing, active
    /// ECG module with the given heart rate and ST1 wire bytes.
    fn data_with_ecg(hr: i16, st1: [u8; 2]) -> Vec<u8> {
        let mut data = vec![0u8; DATA_AREA_LEN];
        // Basic class at descriptor offset 0, after the 4-byte time:
        // ecg hdr status (4), label (2), hr (2), st1 (2).
        data[4] = 0b0000_0011; // exists | active
        data[10..12].copy_from_slice(&hr.to_le_bytes());
        data[12..14].copy_from_slice(&st1);
        data
    }

    fn sample(row: &MeasurementRow, label: &str) -> MeasurementValue {
        row.values
            .iter()
            .find(|v| v.label == label)
            .unwrap_or_else(|| panic!("no sample {label}"))
            .value
            .clone()
    }

    #[test]
    fn active_module_yields_status_and_values() {
        let config = MonitorConfig::standard();
        let data = data_with_ecg(72, [0, 0]);
        let (modules, row) =
            decode(&config, None, &[(0, 1)], &data, "2024-05-01T00:00:00Z").unwrap();

        let ecg = modules.iter().find(|m| m.name == "ECG").unwrap();
        assert!(ecg.active);
        // The extra ECG block shares the ECG status field.
        assert!(modules.iter().any(|m| m.name == "ECG-EXTRA"));

        let row = row.unwrap();
        assert_eq!(row.time, "2024-05-01T00:00:00Z");
        assert_eq!(sample(&row, "ECG HR"), MeasurementValue::Integer(72));
        assert_eq!(sample(&row, "ECG ST1"), MeasurementValue::Float(0.0));
        assert_eq!(
            sample(&row, "ECG HR-SRC"),
            MeasurementValue::Text("Not selected".to_string())
        );
    }

    #[test]
    fn sentinel_values_become_missing_not_scaled() {
        let config = MonitorConfig::standard();
        // ST1 = -32767 on the wire (no valid data).
        let data = data_with_ecg(60, (-32767i16).to_le_bytes());
        let (_, row) = decode(&config, None, &[(0, 1)], &data, "t").unwrap();
        assert_eq!(sample(&row.unwrap(), "ECG ST1"), MeasurementValue::Missing);
    }

    #[test]
    fn inactive_modules_contribute_no_values() {
        let config = MonitorConfig::standard();
        let mut data = data_with_ecg(72, [0, 0]);
        data[4] = 0b0000_0001; // exists, not active
        let (modules, row) = decode(&config, None, &[(0, 1)], &data, "t").unwrap();
        let ecg = modules.iter().find(|m| m.name == "ECG").unwrap();
        assert!(!ecg.active);
        assert!(row.is_none());
    }

    #[test]
    fn filters_restrict_the_row() {
        let config = MonitorConfig::standard();
        let data = data_with_ecg(72, [0, 0]);
        let filters = vec!["ECG HR".to_string()];
        let (_, row) = decode(&config, Some(&filters), &[(0, 1)], &data, "t").unwrap();
        let row = row.unwrap();
        assert_eq!(row.values.len(), 1);
        assert_eq!(row.values[0].label, "ECG HR");
    }

    #[test]
    fn out_of_bounds_class_offset_keeps_partial_results() {
        let config = MonitorConfig::standard();
        let data = data_with_ecg(72, [0, 0]);
        // Second slot points past the data area; the basic block survives.
        let (modules, row) =
            decode(&config, None, &[(0, 1), (DATA_AREA_LEN, 1)], &data, "t").unwrap();
        assert!(modules.iter().any(|m| m.name == "ECG"));
        assert!(row.is_some());
    }
}
