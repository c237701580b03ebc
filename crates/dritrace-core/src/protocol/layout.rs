//! Record layouts for the Record Interface.
//!
//! Every schema is built once and length-checked against the interface
//! definition; a mismatch between the field tables and the declared record
//! sizes aborts at first use. Field names keep the wire struct names so
//! configuration paths read like the interface documentation
//! (`basic:ecg:hr`, `ext2:ent:eeg_ent`).

use std::sync::LazyLock;

use super::{
    CLASS_LEN, DATA_AREA_LEN, HEADER_LEN, PHDB_LEN, PHDB_REQUEST_LEN, RESPONSE_LEN,
    WAVE_REQUEST_LEN,
};
use crate::schema::{Field, Schema, group, leaf};

/// Common 40-byte header carried by every record, inbound and outbound.
pub static COMMON_HEADER: LazyLock<Schema> =
    LazyLock::new(|| Schema::new("common_header", header_fields(), HEADER_LEN));

/// Physiological transmission request: header plus a 9-byte tail.
pub static PHDB_REQUEST: LazyLock<Schema> = LazyLock::new(|| {
    let mut fields = header_fields();
    fields.extend([
        leaf("phdb_rcrd_type", 1),
        leaf("tx_interval", 2),
        leaf("phdb_class_bf", 4),
        leaf("reserved", 2),
    ]);
    Schema::new("phdb_request", fields, PHDB_REQUEST_LEN)
});

/// Waveform transmission request: header plus a 32-byte tail.
pub static WAVE_REQUEST: LazyLock<Schema> = LazyLock::new(|| {
    let mut fields = header_fields();
    fields.extend([
        leaf("req_type", 2),
        leaf("res", 2),
        leaf("type", 8),
        leaf("reserved", 20),
    ]);
    Schema::new("wave_request", fields, WAVE_REQUEST_LEN)
});

/// Full-size monitor response: header plus a 1450-byte data area.
pub static FRAME_RESPONSE: LazyLock<Schema> = LazyLock::new(|| {
    let mut fields = header_fields();
    fields.push(leaf("data", DATA_AREA_LEN));
    Schema::new("frame_response", fields, RESPONSE_LEN)
});

/// Physiological data block: timestamp, four class blocks, trailer.
pub static PHYS_DATA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(
        "phys_data",
        vec![
            leaf("time", 4),
            group("basic", basic_class_fields()),
            group("ext1", ext1_class_fields()),
            group("ext2", ext2_class_fields()),
            group("ext3", ext3_class_fields()),
            leaf("marker", 1),
            leaf("reserved", 1),
            leaf("cl_drilvl_subt", 2),
        ],
        PHDB_LEN,
    )
});

/// Basic class block, decoded standalone from its subrecord slot.
pub static BASIC_CLASS: LazyLock<Schema> =
    LazyLock::new(|| Schema::new("basic", basic_class_fields(), CLASS_LEN));

pub static EXT1_CLASS: LazyLock<Schema> =
    LazyLock::new(|| Schema::new("ext1", ext1_class_fields(), CLASS_LEN));

pub static EXT2_CLASS: LazyLock<Schema> =
    LazyLock::new(|| Schema::new("ext2", ext2_class_fields(), CLASS_LEN));

pub static EXT3_CLASS: LazyLock<Schema> =
    LazyLock::new(|| Schema::new("ext3", ext3_class_fields(), CLASS_LEN));

fn header_fields() -> Vec<Field> {
    let mut fields = vec![
        leaf("r_len", 2),
        leaf("r_nbr", 1),
        leaf("r_dri_level", 1),
        leaf("plug_id", 2),
        leaf("r_time", 4),
        leaf("reserved1", 1),
        leaf("reserved2", 1),
        leaf("reserved3", 2),
        leaf("r_maintype", 2),
    ];
    // Eight subrecord descriptors: data-area offset plus type code.
    for (offset, ty) in [
        ("sr_offset1", "sr_type1"),
        ("sr_offset2", "sr_type2"),
        ("sr_offset3", "sr_type3"),
        ("sr_offset4", "sr_type4"),
        ("sr_offset5", "sr_type5"),
        ("sr_offset6", "sr_type6"),
        ("sr_offset7", "sr_type7"),
        ("sr_offset8", "sr_type8"),
    ] {
        fields.push(leaf(offset, 2));
        fields.push(leaf(ty, 1));
    }
    fields
}

/// Shared 6-byte measurement group header: 32-bit status, 16-bit label.
fn hdr() -> Field {
    group("hdr", vec![leaf("status", 4), leaf("label", 2)])
}

/// Invasive pressure channel, 14 bytes. Instantiated six times (p1..p6).
fn p_group(name: &'static str) -> Field {
    group(
        name,
        vec![hdr(), leaf("sys", 2), leaf("dia", 2), leaf("mean", 2), leaf("hr", 2)],
    )
}

/// Temperature channel, 8 bytes. Instantiated four times (t1..t4).
fn t_group(name: &'static str) -> Field {
    group(name, vec![hdr(), leaf("temp", 2)])
}

fn eeg_channel(name: &'static str) -> Field {
    group(
        name,
        vec![
            leaf("ampl", 2),
            leaf("sef", 2),
            leaf("mf", 2),
            leaf("delta_proc", 2),
            leaf("theta_proc", 2),
            leaf("alpha_proc", 2),
            leaf("beta_proc", 2),
            leaf("bsr", 2),
        ],
    )
}

fn basic_class_fields() -> Vec<Field> {
    vec![
        group(
            "ecg",
            vec![
                hdr(),
                leaf("hr", 2),
                leaf("st1", 2),
                leaf("st2", 2),
                leaf("st3", 2),
                leaf("imp_rr", 2),
            ],
        ),
        p_group("p1"),
        p_group("p2"),
        p_group("p3"),
        p_group("p4"),
        group(
            "nibp",
            vec![hdr(), leaf("sys", 2), leaf("dia", 2), leaf("mean", 2), leaf("hr", 2)],
        ),
        t_group("t1"),
        t_group("t2"),
        t_group("t3"),
        t_group("t4"),
        group(
            "SpO2",
            vec![
                hdr(),
                leaf("SpO2", 2),
                leaf("pr", 2),
                leaf("ir_amp", 2),
                leaf("SO2", 2),
            ],
        ),
        group(
            "co2",
            vec![hdr(), leaf("et", 2), leaf("fi", 2), leaf("rr", 2), leaf("amb_press", 2)],
        ),
        group("o2", vec![hdr(), leaf("et", 2), leaf("fi", 2)]),
        group("n2o", vec![hdr(), leaf("et", 2), leaf("fi", 2)]),
        group(
            "aa",
            vec![hdr(), leaf("et", 2), leaf("fi", 2), leaf("mac_sum", 2)],
        ),
        group(
            "flow_vol",
            vec![
                hdr(),
                leaf("rr", 2),
                leaf("ppeak", 2),
                leaf("peep", 2),
                leaf("pplat", 2),
                leaf("tv_insp", 2),
                leaf("tv_exp", 2),
                leaf("compliance", 2),
                leaf("mv_exp", 2),
            ],
        ),
        group(
            "co_wedge",
            vec![
                hdr(),
                leaf("co", 2),
                leaf("blood_temp", 2),
                leaf("ref", 2),
                leaf("pcwp", 2),
            ],
        ),
        group(
            "nmt",
            vec![hdr(), leaf("t1", 2), leaf("tratio", 2), leaf("ptc", 2)],
        ),
        group(
            "ecg_extra",
            vec![leaf("hr_ecg", 2), leaf("hr_max", 2), leaf("hr_min", 2)],
        ),
        group("svo2", vec![hdr(), leaf("svo2", 2)]),
        p_group("p5"),
        p_group("p6"),
        leaf("reserved", 2),
    ]
}

fn ext1_class_fields() -> Vec<Field> {
    vec![
        group(
            "ecg_arrh",
            vec![
                hdr(),
                leaf("hr", 2),
                leaf("rr_time", 2),
                leaf("pvc", 2),
                leaf("arrh_reserved", 4),
                leaf("reserved", 32),
            ],
        ),
        group(
            "ecg_12",
            vec![
                hdr(),
                leaf("stI", 2),
                leaf("stII", 2),
                leaf("stIII", 2),
                leaf("stAVL", 2),
                leaf("stAVR", 2),
                leaf("stAVF", 2),
                leaf("stV1", 2),
                leaf("stV2", 2),
                leaf("stV3", 2),
                leaf("stV4", 2),
                leaf("stV5", 2),
                leaf("stV6", 2),
            ],
        ),
        leaf("reserved", 192),
    ]
}

fn ext2_class_fields() -> Vec<Field> {
    vec![
        group(
            "nmt2",
            vec![
                hdr(),
                leaf("reserved", 2),
                leaf("nmt_t1", 2),
                leaf("nmt_t2", 2),
                leaf("nmt_t3", 2),
                leaf("nmt_t4", 2),
                leaf("nmt_resv1", 2),
                leaf("nmt_resv2", 2),
                leaf("nmt_resv3", 2),
                leaf("nmt_resv4", 2),
            ],
        ),
        group(
            "eeg",
            vec![
                hdr(),
                leaf("femg", 2),
                eeg_channel("eeg1"),
                eeg_channel("eeg2"),
                eeg_channel("eeg3"),
                eeg_channel("eeg4"),
            ],
        ),
        group(
            "eeg_bis",
            vec![
                hdr(),
                leaf("bis", 2),
                leaf("sqi_val", 2),
                leaf("emg_val", 2),
                leaf("sr_val", 2),
                leaf("reserved", 2),
            ],
        ),
        group(
            "ent",
            vec![
                hdr(),
                leaf("eeg_ent", 2),
                leaf("emg_ent", 2),
                leaf("bsr_ent", 2),
                leaf("reserved", 16),
            ],
        ),
        leaf("reserved1", 58),
        group(
            "eeg2",
            vec![
                hdr(),
                leaf("common_reference", 1),
                leaf("montage_label_ch_1_m", 1),
                leaf("montage_label_ch_1_p", 1),
                leaf("montage_label_ch_2_m", 1),
                leaf("montage_label_ch_2_p", 1),
                leaf("montage_label_ch_3_m", 1),
                leaf("montage_label_ch_3_p", 1),
                leaf("montage_label_ch_4_m", 1),
                leaf("montage_label_ch_4_p", 1),
                leaf("reserved", 16),
            ],
        ),
        leaf("reserved", 41),
    ]
}

fn ext3_class_fields() -> Vec<Field> {
    vec![
        group(
            "gasex",
            vec![hdr(), leaf("vo2", 2), leaf("vco2", 2), leaf("ee", 2), leaf("rq", 2)],
        ),
        group(
            "flow_vol2",
            vec![
                hdr(),
                leaf("ipeep", 2),
                leaf("pmean", 2),
                leaf("raw", 2),
                leaf("mv_insp", 2),
                leaf("epeep", 2),
                leaf("mv_spont", 2),
                leaf("ie_ratio", 2),
                leaf("insp_time", 2),
                leaf("exp_time", 2),
                leaf("static_compliance", 2),
                leaf("static_pplat", 2),
                leaf("static_peepe", 2),
                leaf("static_peepi", 2),
                leaf("reserved", 14),
            ],
        ),
        group("bal", vec![hdr(), leaf("et", 2), leaf("fi", 2)]),
        group(
            "tono",
            vec![
                hdr(),
                leaf("prco2", 2),
                leaf("pr_et", 2),
                leaf("pr_pa", 2),
                leaf("pa_delay", 2),
                leaf("phi", 2),
                leaf("phi_delay", 2),
                leaf("amb_press", 2),
                leaf("cpma", 2),
            ],
        ),
        group("aa2", vec![hdr(), leaf("mac_age_sum", 2), leaf("reserved", 16)]),
        leaf("reserved", 154),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldPath, FieldValue};

    #[test]
    fn declared_lengths_hold() {
        assert_eq!(COMMON_HEADER.byte_len(), HEADER_LEN);
        assert_eq!(PHDB_REQUEST.byte_len(), PHDB_REQUEST_LEN);
        assert_eq!(WAVE_REQUEST.byte_len(), WAVE_REQUEST_LEN);
        assert_eq!(FRAME_RESPONSE.byte_len(), RESPONSE_LEN);
        assert_eq!(PHYS_DATA.byte_len(), PHDB_LEN);
        for class in [&*BASIC_CLASS, &*EXT1_CLASS, &*EXT2_CLASS, &*EXT3_CLASS] {
            assert_eq!(class.byte_len(), CLASS_LEN);
        }
    }

    #[test]
    fn ecg_heart_rate_sits_at_its_documented_offset() {
        // basic class: ecg group header is 6 bytes, hr is the next word.
        let mut raw = vec![0u8; CLASS_LEN];
        raw[6] = 0x48; // 72 bpm, little-endian
        raw[7] = 0x00;
        let record = BASIC_CLASS.decode(&raw).unwrap();
        let hr = FieldPath::parse("ecg:hr").unwrap();
        assert_eq!(record.get(&hr).unwrap(), FieldValue::Scalar(72));
    }

    #[test]
    fn sixth_pressure_channel_sits_before_the_trailer() {
        // p6 occupies the last 14 data bytes of the basic class.
        let mut raw = vec![0u8; CLASS_LEN];
        let p6_sys = CLASS_LEN - 2 - 14 + 6;
        raw[p6_sys] = 0x2C;
        raw[p6_sys + 1] = 0x01;
        let record = BASIC_CLASS.decode(&raw).unwrap();
        let sys = FieldPath::parse("p6:sys").unwrap();
        assert_eq!(record.get(&sys).unwrap(), FieldValue::Scalar(300));
    }
}
