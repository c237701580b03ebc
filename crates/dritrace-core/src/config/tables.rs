//! Static monitor configuration tables.
//!
//! One entry per measurement module, listing the measurements the module
//! carries and where they live inside the class records. Bit ranges
//! index the 32-character binary rendering of a field, so ranges on
//! two-byte fields start at position 16.

use super::{PhdbClass, WaveChannel};

pub(super) struct RawModule {
    pub group: &'static str,
    pub class: PhdbClass,
    /// Status field carrying the existence (bit 0) and activity (bit 1)
    /// flags for this module.
    pub status_key: &'static str,
    /// Instance substitutions applied to every key; empty for modules
    /// that occur once.
    pub instances: &'static [(&'static str, &'static str)],
    pub measurements: &'static [RawMeasurement],
}

pub(super) struct RawMeasurement {
    pub label: &'static str,
    pub key: &'static str,
    pub scale: f64,
    pub choices: Option<&'static [(u32, &'static str)]>,
    /// Dynamic display label: a template and the label of the sibling
    /// measurement whose choice text fills it in.
    pub label_from: Option<(&'static str, &'static str)>,
}

const fn m(label: &'static str, key: &'static str, scale: f64) -> RawMeasurement {
    RawMeasurement {
        label,
        key,
        scale,
        choices: None,
        label_from: None,
    }
}

const fn mc(
    label: &'static str,
    key: &'static str,
    choices: &'static [(u32, &'static str)],
) -> RawMeasurement {
    RawMeasurement {
        label,
        key,
        scale: 1.0,
        choices: Some(choices),
        label_from: None,
    }
}

const fn mf(
    label: &'static str,
    key: &'static str,
    scale: f64,
    template: &'static str,
    source: &'static str,
) -> RawMeasurement {
    RawMeasurement {
        label,
        key,
        scale,
        choices: None,
        label_from: Some((template, source)),
    }
}

const HR_SOURCES: &[(u32, &str)] = &[
    (0, "Not selected"),
    (1, "ECG"),
    (2, "Invasive pressure channel 1"),
    (3, "Invasive pressure channel 2"),
    (4, "Invasive pressure channel 3"),
    (5, "Invasive pressure channel 4"),
    (6, "SpO2"),
    (7, "Invasive pressure channel 5"),
    (8, "Invasive pressure channel 6"),
];

const ECG_LEADS: &[(u32, &str)] = &[
    (0, "Not selected"),
    (1, "ECG I"),
    (2, "ECG II"),
    (3, "ECG III"),
    (4, "ECG AVR"),
    (5, "ECG AVL"),
    (6, "ECG AVF"),
    (7, "ECG V"),
];

const BP_LABELS: &[(u32, &str)] = &[
    (0, "Not defined"),
    (1, "ART"),
    (2, "CVP"),
    (3, "PA"),
    (4, "RAP"),
    (5, "RVP"),
    (6, "LAP"),
    (7, "ICP"),
    (8, "ABP"),
    (9, "P1"),
    (10, "P2"),
    (11, "P3"),
    (12, "P4"),
    (13, "P5"),
    (14, "P6"),
];

const NIBP_CUFF: &[(u32, &str)] = &[
    (0, "Not defined"),
    (1, "Infant"),
    (2, "Reserved"),
    (3, "Adult"),
];

const TEMP_LABELS: &[(u32, &str)] = &[
    (0, "Not used"),
    (1, "ESO"),
    (2, "NASO"),
    (3, "TYMP"),
    (4, "RECT"),
    (5, "BLAD"),
    (6, "AXIL"),
    (7, "SKIN"),
    (8, "AIRW"),
    (9, "ROOM"),
    (10, "MYO"),
    (11, "T1"),
    (12, "T2"),
    (13, "T3"),
    (14, "T4"),
    (15, "CORE"),
    (16, "SURF"),
];

const SPO2_LABELS: &[(u32, &str)] = &[
    (0, "SO2"),
    (1, "SaO2"),
    (2, "SvO2"),
    (3, "Not used"),
];

const CO2_SOURCES: &[(u32, &str)] = &[
    (0, "Not selected"),
    (1, "CO2"),
    (2, "ECG, Impedance respiratory"),
];

const AGENTS: &[(u32, &str)] = &[
    (0, "Unknown"),
    (1, "None"),
    (2, "HAL"),
    (3, "ENF"),
    (4, "ISO"),
    (5, "DES"),
    (6, "SEV"),
];

const NMT_MODES: &[(u32, &str)] = &[
    (0, "Train Of Four (TOF mode)"),
    (1, "Double Burst (DB mode)"),
    (2, "Single Twitch (ST mode)"),
    (3, "Post-tetanic count"),
    (4, "Tetanic"),
    (5, "Regional block"),
];

const NMT_PULSE_WIDTHS: &[(u32, &str)] = &[
    (0, "Not used"),
    (1, "100 us"),
    (2, "200 us"),
    (3, "300 us"),
];

const EEG_EP_MODES: &[(u32, &str)] = &[(0, "AEP"), (1, "SSEP")];

const EEG_MEASUREMENT_TYPES: &[(u32, &str)] = &[(0, "referential"), (1, "bipolar")];

const ECG: &[RawMeasurement] = &[
    m("ECG HR", "ecg:hr", 1.0),
    m("ECG ST1", "ecg:st1", 0.01),
    m("ECG ST2", "ecg:st2", 0.01),
    m("ECG ST3", "ecg:st3", 0.01),
    m("ECG IMP-RR", "ecg:imp_rr", 1.0),
    m("ECG: ASY", "ecg:hdr:status:2", 1.0),
    mc("ECG HR-SRC", "ecg:hdr:status:3-6", HR_SOURCES),
    m("ECG: NS", "ecg:hdr:status:7", 1.0),
    m("ECG: AR", "ecg:hdr:status:8", 1.0),
    m("ECG: LRN", "ecg:hdr:status:9", 1.0),
    m("ECG: PCR", "ecg:hdr:status:10", 1.0),
    m("ECG: CH1", "ecg:hdr:status:11", 1.0),
    m("ECG: CH2", "ecg:hdr:status:12", 1.0),
    m("ECG: CH3", "ecg:hdr:status:13", 1.0),
    mc("ECG LEAD-CH1", "ecg:hdr:label:16-19", ECG_LEADS),
    mc("ECG LEAD-CH2", "ecg:hdr:label:20-23", ECG_LEADS),
    mc("ECG LEAD-CH3", "ecg:hdr:label:24-27", ECG_LEADS),
];

const INV_BP: &[RawMeasurement] = &[
    m("INV-BP SYS", "p_group:sys", 0.01),
    m("INV-BP DIA", "p_group:dia", 0.01),
    m("INV-BP MEAN", "p_group:mean", 0.01),
    m("INV-BP HR", "p_group:hr", 1.0),
    m("INV-BP: ZR", "p_group:hdr:status:2", 1.0),
    mc("INV-BP LBL", "p_group:hdr:label", BP_LABELS),
];

const NIBP: &[RawMeasurement] = &[
    m("NIBP SYS", "nibp:sys", 0.01),
    m("NIBP DIA", "nibp:dia", 0.01),
    m("NIBP MEAN", "nibp:mean", 0.01),
    m("NIBP HR", "nibp:hr", 1.0),
    mc("NIBP CUFF", "nibp:hdr:label:16-18", NIBP_CUFF),
    m("NIBP: AUTO", "nibp:hdr:label:3", 1.0),
    m("NIBP: STAT", "nibp:hdr:label:4", 1.0),
    m("NIBP: MSR", "nibp:hdr:label:5", 1.0),
    m("NIBP: STASIS", "nibp:hdr:label:6", 1.0),
    m("NIBP: CLBR", "nibp:hdr:label:7", 1.0),
    m("NIBP: OLD", "nibp:hdr:label:8", 1.0),
];

const TEMP: &[RawMeasurement] = &[
    m("TEMP", "t_group:temp", 0.01),
    mc("TEMP LBL", "t_group:hdr:label", TEMP_LABELS),
];

const SPO2: &[RawMeasurement] = &[
    m("SpO2", "SpO2:SpO2", 0.01),
    m("SpO2 PR", "SpO2:pr", 1.0),
    m("SpO2 IR-AMP", "SpO2:ir_amp", 1.0),
    mf("SpO2 [SO2|SaO2|SvO2]", "SpO2:SO2", 0.01, "SpO2 {}", "SpO2 LBL"),
    mc("SpO2 LBL", "SpO2:hdr:label:16-17", SPO2_LABELS),
];

const CO2: &[RawMeasurement] = &[
    m("CO2 ET", "co2:et", 0.01),
    m("CO2 FI", "co2:fi", 0.01),
    m("CO2 RR", "co2:rr", 1.0),
    m("CO2 PAMB", "co2:amb_press", 0.1),
    m("CO2: AP", "co2:hdr:status:2", 1.0),
    m("CO2: CS", "co2:hdr:status:3", 1.0),
    m("CO2: ZS", "co2:hdr:status:4", 1.0),
    m("CO2: OC", "co2:hdr:status:5", 1.0),
    m("CO2: ALK", "co2:hdr:status:6", 1.0),
    mc("CO2 LBL", "co2:hdr:label:16-18", CO2_SOURCES),
];

const O2: &[RawMeasurement] = &[
    m("O2 ET", "o2:et", 0.01),
    m("O2 FI", "o2:fi", 0.01),
    m("O2: CLBR", "o2:hdr:status:2", 1.0),
    m("O2: MNS", "o2:hdr:status:3", 1.0),
];

const N2O: &[RawMeasurement] = &[
    m("N2O ET", "n2o:et", 0.01),
    m("N2O FI", "n2o:fi", 0.01),
    m("N2O: CLBR", "n2o:hdr:status:2", 1.0),
    m("N2O: MNS", "n2o:hdr:status:3", 1.0),
];

const AA: &[RawMeasurement] = &[
    m("AA ET", "aa:et", 0.01),
    m("AA FI", "aa:fi", 0.01),
    m("AA MAC-SUM", "aa:mac_sum", 0.01),
    m("AA: CLBR", "aa:hdr:status:2", 1.0),
    m("AA: MNS", "aa:hdr:status:3", 1.0),
    mc("AA", "aa:hdr:label", AGENTS),
];

const FLOW_VOL: &[RawMeasurement] = &[
    m("FLOW-VOL RR", "flow_vol:rr", 1.0),
    m("FLOW-VOL PPEAK", "flow_vol:ppeak", 0.01),
    m("FLOW-VOL PEEP", "flow_vol:peep", 0.01),
    m("FLOW-VOL PPLAT", "flow_vol:pplat", 0.01),
    m("FLOW-VOL TV-INSP", "flow_vol:tv_insp", 0.1),
    m("FLOW-VOL TV-EXP", "flow_vol:tv_exp", 0.1),
    m("FLOW-VOL COMP", "flow_vol:compliance", 0.01),
    m("FLOW-VOL MV-EXP", "flow_vol:mv_exp", 0.01),
    m("FLOW-VOL: DIS", "flow_vol:hdr:status:2", 1.0),
    m("FLOW-VOL: CLBR", "flow_vol:hdr:status:3", 1.0),
    m("FLOW-VOL: ZR", "flow_vol:hdr:status:4", 1.0),
    m("FLOW-VOL: OBS", "flow_vol:hdr:status:5", 1.0),
    m("FLOW-VOL: LK", "flow_vol:hdr:status:6", 1.0),
    m("FLOW-VOL: MSR", "flow_vol:hdr:status:7", 1.0),
];

const CO_WEDGE: &[RawMeasurement] = &[
    m("CO-WEDGE CO", "co_wedge:co", 1.0),
    m("CO-WEDGE TEMP", "co_wedge:blood_temp", 1.0),
    m("CO-WEDGE REF", "co_wedge:ref", 1.0),
    m("CO-WEDGE PCWP", "co_wedge:pcwp", 0.01),
    m("CO-WEDGE CO-AGE", "co_wedge:hdr:label:0", 1.0),
    m("CO-WEDGE PCWP-AGE", "co_wedge:hdr:label:1", 1.0),
];

const NMT: &[RawMeasurement] = &[
    m("NMT T1", "nmt:t1", 0.1),
    m("NMT TRATIO", "nmt:tratio", 0.1),
    m("NMT PTC-COUNT", "nmt:ptc:16-20", 1.0),
    m("NMT PTC-TOF-COUNT", "nmt:ptc:21-24", 1.0),
    m("NMT PTC-DB-COUNT", "nmt:ptc:21-23", 1.0),
    m("NMT PTC-ST-COUNT", "nmt:ptc:21-22", 1.0),
    m("NMT PTC-STIM", "nmt:ptc:25-31", 1.0),
    mc("NMT STM", "nmt:hdr:status:2-3", NMT_MODES),
    mc("NMT TIME", "nmt:hdr:label:20-21", NMT_PULSE_WIDTHS),
    m("NMT: SUP", "nmt:hdr:label:6", 1.0),
    m("NMT: CLBR", "nmt:hdr:label:7", 1.0),
];

const ECG_EXTRA: &[RawMeasurement] = &[
    m("ECG-EXTRA: HR", "ecg_extra:hr_ecg", 1.0),
    m("ECG-EXTRA: HR-MAX", "ecg_extra:hr_max", 1.0),
    m("ECG-EXTRA: HR-MIN", "ecg_extra:hr_min", 1.0),
];

const SVO2: &[RawMeasurement] = &[m("SvO2", "svo2:svo2", 0.01)];

const ECG_ARRH: &[RawMeasurement] = &[
    m("ECG-ARRH HR", "ecg_arrh:hr", 1.0),
    m("ECG-ARRH RR", "ecg_arrh:rr_time", 1.0),
    m("ECG-ARRH PVC", "ecg_arrh:pvc", 1.0),
];

const ECG_12: &[RawMeasurement] = &[
    m("ECG-12 STI", "ecg_12:stI", 0.01),
    m("ECG-12 STII", "ecg_12:stII", 0.01),
    m("ECG-12 STIII", "ecg_12:stIII", 0.01),
    m("ECG-12 STAVL", "ecg_12:stAVL", 0.01),
    m("ECG-12 STAVR", "ecg_12:stAVR", 0.01),
    m("ECG-12 STAVF", "ecg_12:stAVF", 0.01),
    m("ECG-12 STV1", "ecg_12:stV1", 0.01),
    m("ECG-12 STV2", "ecg_12:stV2", 0.01),
    m("ECG-12 STV3", "ecg_12:stV3", 0.01),
    m("ECG-12 STV4", "ecg_12:stV4", 0.01),
    m("ECG-12 STV5", "ecg_12:stV5", 0.01),
    m("ECG-12 STV6", "ecg_12:stV6", 0.01),
    mc("ECG-12 LEAD-CH1", "ecg_12:hdr:label:16-19", ECG_LEADS),
    mc("ECG-12 LEAD-CH2", "ecg_12:hdr:label:20-23", ECG_LEADS),
    mc("ECG-12 LEAD-CH3", "ecg_12:hdr:label:24-27", ECG_LEADS),
];

const NMT2: &[RawMeasurement] = &[
    m("NMT2 T1", "nmt2:nmt_t1", 1.0),
    m("NMT2 T2", "nmt2:nmt_t2", 1.0),
    m("NMT2 T3", "nmt2:nmt_t3", 1.0),
    m("NMT2 T4", "nmt2:nmt_t4", 1.0),
];

const EEG: &[RawMeasurement] = &[
    m("EEG FEMG", "eeg:femg", 0.1),
    m("EEG EEG1-AMPL", "eeg:eeg1:ampl", 0.1),
    m("EEG EEG1-SEF", "eeg:eeg1:sef", 0.1),
    m("EEG EEG1-MF", "eeg:eeg1:mf", 0.1),
    m("EEG EEG1-DELTA", "eeg:eeg1:delta_proc", 1.0),
    m("EEG EEG1-THETA", "eeg:eeg1:theta_proc", 1.0),
    m("EEG EEG1-ALPHA", "eeg:eeg1:alpha_proc", 1.0),
    m("EEG EEG1-BETA", "eeg:eeg1:beta_proc", 1.0),
    m("EEG EEG1-BSR", "eeg:eeg1:bsr", 1.0),
    m("EEG EEG2-AMPL", "eeg:eeg2:ampl", 0.1),
    m("EEG EEG2-SEF", "eeg:eeg2:sef", 0.1),
    m("EEG EEG2-MF", "eeg:eeg2:mf", 0.1),
    m("EEG EEG2-DELTA", "eeg:eeg2:delta_proc", 1.0),
    m("EEG EEG2-THETA", "eeg:eeg2:theta_proc", 1.0),
    m("EEG EEG2-ALPHA", "eeg:eeg2:alpha_proc", 1.0),
    m("EEG EEG2-BETA", "eeg:eeg2:beta_proc", 1.0),
    m("EEG EEG2-BSR", "eeg:eeg2:bsr", 1.0),
    m("EEG EEG3-AMPL", "eeg:eeg3:ampl", 0.1),
    m("EEG EEG3-SEF", "eeg:eeg3:sef", 0.1),
    m("EEG EEG3-MF", "eeg:eeg3:mf", 0.1),
    m("EEG EEG3-DELTA", "eeg:eeg3:delta_proc", 1.0),
    m("EEG EEG3-THETA", "eeg:eeg3:theta_proc", 1.0),
    m("EEG EEG3-ALPHA", "eeg:eeg3:alpha_proc", 1.0),
    m("EEG EEG3-BETA", "eeg:eeg3:beta_proc", 1.0),
    m("EEG EEG3-BSR", "eeg:eeg3:bsr", 1.0),
    m("EEG EEG4-AMPL", "eeg:eeg4:ampl", 0.1),
    m("EEG EEG4-SEF", "eeg:eeg4:sef", 0.1),
    m("EEG EEG4-MF", "eeg:eeg4:mf", 0.1),
    m("EEG EEG4-DELTA", "eeg:eeg4:delta_proc", 1.0),
    m("EEG EEG4-THETA", "eeg:eeg4:theta_proc", 1.0),
    m("EEG EEG4-ALPHA", "eeg:eeg4:alpha_proc", 1.0),
    m("EEG EEG4-BETA", "eeg:eeg4:beta_proc", 1.0),
    m("EEG EEG4-BSR", "eeg:eeg4:bsr", 1.0),
    m("EEG: MSN", "eeg:hdr:status:2", 1.0),
    m("EEG: MONTAGE", "eeg:hdr:status:3-6", 1.0),
    m("EEG: HEAD", "eeg:hdr:status:7", 1.0),
    m("EEG: SSEP", "eeg:hdr:status:8", 1.0),
    m("EEG: CH1-LEADS", "eeg:hdr:status:9", 1.0),
    m("EEG: CH2-LEADS", "eeg:hdr:status:10", 1.0),
    m("EEG: CH3-LEADS", "eeg:hdr:status:11", 1.0),
    m("EEG: CH4-LEADS", "eeg:hdr:status:12", 1.0),
    m("EEG: CH1-ARTF", "eeg:hdr:status:13", 1.0),
    m("EEG: CH2-ARTF", "eeg:hdr:status:14", 1.0),
    m("EEG: CH3-ARTF", "eeg:hdr:status:15", 1.0),
    m("EEG: CH4-ARTF", "eeg:hdr:status:16", 1.0),
    m("EEG: CH1-NS", "eeg:hdr:status:17", 1.0),
    m("EEG: CH2-NS", "eeg:hdr:status:18", 1.0),
    m("EEG: CH3-NS", "eeg:hdr:status:19", 1.0),
    m("EEG: CH4-NS", "eeg:hdr:status:20", 1.0),
    mc("EEG: EP", "eeg:hdr:status:21", EEG_EP_MODES),
    mc("EEG: TYPE", "eeg:hdr:status:22", EEG_MEASUREMENT_TYPES),
];

const EEG_BIS: &[RawMeasurement] = &[
    m("EEG-BIS", "eeg_bis:bis", 1.0),
    m("EEG-BIS SQI", "eeg_bis:sqi_val", 1.0),
    m("EEG-BIS EMG", "eeg_bis:emg_val", 1.0),
    m("EEG-BIS SR", "eeg_bis:sr_val", 1.0),
];

const ENTROPY: &[RawMeasurement] = &[
    m("ENTROPY SE", "ent:eeg_ent", 1.0),
    m("ENTROPY RE", "ent:emg_ent", 1.0),
    m("ENTROPY BSR", "ent:bsr_ent", 1.0),
];

const EEG2: &[RawMeasurement] = &[
    m("EEG2 COMMON", "eeg2:common_reference", 1.0),
    m("EEG2 CH1M", "eeg2:montage_label_ch_1_m", 1.0),
    m("EEG2 CH1P", "eeg2:montage_label_ch_1_p", 1.0),
    m("EEG2 CH2M", "eeg2:montage_label_ch_2_m", 1.0),
    m("EEG2 CH2P", "eeg2:montage_label_ch_2_p", 1.0),
    m("EEG2 CH3M", "eeg2:montage_label_ch_3_m", 1.0),
    m("EEG2 CH3P", "eeg2:montage_label_ch_3_p", 1.0),
    m("EEG2 CH4M", "eeg2:montage_label_ch_4_m", 1.0),
    m("EEG2 CH4P", "eeg2:montage_label_ch_4_p", 1.0),
];

const GASEX: &[RawMeasurement] = &[
    m("GASEX VO2", "gasex:vo2", 0.1),
    m("GASEX VCO2", "gasex:vco2", 0.1),
    m("GASEX EE", "gasex:ee", 1.0),
    m("GASEX RQ", "gasex:rq", 1.0),
];

const FLOW_VOL2: &[RawMeasurement] = &[
    m("FLOW-VOL2 IPEEP", "flow_vol2:ipeep", 0.01),
    m("FLOW-VOL2 Pmean", "flow_vol2:pmean", 0.01),
    m("FLOW-VOL2 RAW", "flow_vol2:raw", 0.01),
    m("FLOW-VOL2 MVINSP", "flow_vol2:mv_insp", 0.01),
    m("FLOW-VOL2 EPEEP", "flow_vol2:epeep", 0.01),
    m("FLOW-VOL2 MVESEX", "flow_vol2:mv_spont", 0.01),
    m("FLOW-VOL2 IERATIO", "flow_vol2:ie_ratio", 1.0),
    m("FLOW-VOL2 ISPTIME", "flow_vol2:insp_time", 1.0),
    m("FLOW-VOL2 EXPTIME", "flow_vol2:exp_time", 1.0),
    m("FLOW-VOL2 STCCOMP", "flow_vol2:static_compliance", 1.0),
    m("FLOW-VOL2 STCPPLAT", "flow_vol2:static_pplat", 1.0),
    m("FLOW-VOL2 STCPEEPE", "flow_vol2:static_peepe", 1.0),
    m("FLOW-VOL2 STCPEEPI", "flow_vol2:static_peepi", 1.0),
];

const BAL_GAS: &[RawMeasurement] = &[
    m("BAL-GAS ET", "bal:et", 0.01),
    m("BAL-GAS FI", "bal:fi", 0.01),
];

const TONO: &[RawMeasurement] = &[
    m("TONO PrCO2", "tono:prco2", 0.01),
    m("TONO P(r-Et)CO2", "tono:pr_et", 0.01),
    m("TONO P(r-a)CO2", "tono:pr_pa", 0.01),
    m("TONO PADELAY", "tono:pa_delay", 1.0),
    m("TONO PHI", "tono:phi", 0.01),
    m("TONO PHIDELAY", "tono:phi_delay", 1.0),
    m("TONO PAMB", "tono:amb_press", 0.1),
    m("TONO CMPA", "tono:cpma", 1.0),
    m("TONO: LEAK", "tono:hdr:status:2", 1.0),
    m("TONO: VOLDR", "tono:hdr:status:3", 1.0),
    m("TONO: TECHFAIL", "tono:hdr:status:4", 1.0),
    m("TONO: UNFILL", "tono:hdr:status:5", 1.0),
    m("TONO: OVER", "tono:hdr:status:6", 1.0),
];

const AA2: &[RawMeasurement] = &[m("AA2 MAC-AGE-SUM", "aa2:mac_age_sum", 1.0)];

const PRESSURE_INSTANCES: &[(&str, &str)] = &[
    ("p_group", "p1"),
    ("p_group", "p2"),
    ("p_group", "p3"),
    ("p_group", "p4"),
    ("p_group", "p5"),
    ("p_group", "p6"),
];

const TEMP_INSTANCES: &[(&str, &str)] = &[
    ("t_group", "t1"),
    ("t_group", "t2"),
    ("t_group", "t3"),
    ("t_group", "t4"),
];

const fn module(
    group: &'static str,
    class: PhdbClass,
    status_key: &'static str,
    instances: &'static [(&'static str, &'static str)],
    measurements: &'static [RawMeasurement],
) -> RawModule {
    RawModule {
        group,
        class,
        status_key,
        instances,
        measurements,
    }
}

/// Every module the monitor reports, in output order.
pub(super) const MODULES: &[RawModule] = &[
    module(
        "INV-BP",
        PhdbClass::Basic,
        "p_group:hdr:status",
        PRESSURE_INSTANCES,
        INV_BP,
    ),
    module(
        "TEMP",
        PhdbClass::Basic,
        "t_group:hdr:status",
        TEMP_INSTANCES,
        TEMP,
    ),
    module("ECG", PhdbClass::Basic, "ecg:hdr:status", &[], ECG),
    module("NIBP", PhdbClass::Basic, "nibp:hdr:status", &[], NIBP),
    module("SpO2", PhdbClass::Basic, "SpO2:hdr:status", &[], SPO2),
    module("CO2", PhdbClass::Basic, "co2:hdr:status", &[], CO2),
    module("O2", PhdbClass::Basic, "o2:hdr:status", &[], O2),
    module("N2O", PhdbClass::Basic, "n2o:hdr:status", &[], N2O),
    module("AA", PhdbClass::Basic, "aa:hdr:status", &[], AA),
    module(
        "FLOW-VOL",
        PhdbClass::Basic,
        "flow_vol:hdr:status",
        &[],
        FLOW_VOL,
    ),
    module(
        "CO-WEDGE",
        PhdbClass::Basic,
        "co_wedge:hdr:status",
        &[],
        CO_WEDGE,
    ),
    module("NMT", PhdbClass::Basic, "nmt:hdr:status", &[], NMT),
    // The extra ECG block shares the primary ECG module's status field.
    module("ECG-EXTRA", PhdbClass::Basic, "ecg:hdr:status", &[], ECG_EXTRA),
    module("SvO2", PhdbClass::Basic, "svo2:hdr:status", &[], SVO2),
    module("ECG-ARRH", PhdbClass::Ext1, "ecg_arrh:hdr:status", &[], ECG_ARRH),
    module("ECG-12", PhdbClass::Ext1, "ecg_12:hdr:status", &[], ECG_12),
    module("NMT2", PhdbClass::Ext2, "nmt2:hdr:status", &[], NMT2),
    module("EEG", PhdbClass::Ext2, "eeg:hdr:status", &[], EEG),
    module("EEG-BIS", PhdbClass::Ext2, "eeg_bis:hdr:status", &[], EEG_BIS),
    module("ENTROPY", PhdbClass::Ext2, "ent:hdr:status", &[], ENTROPY),
    module("EEG2", PhdbClass::Ext2, "eeg2:hdr:status", &[], EEG2),
    module("GASEX", PhdbClass::Ext3, "gasex:hdr:status", &[], GASEX),
    module(
        "FLOW-VOL2",
        PhdbClass::Ext3,
        "flow_vol2:hdr:status",
        &[],
        FLOW_VOL2,
    ),
    module("BAL-GAS", PhdbClass::Ext3, "bal:hdr:status", &[], BAL_GAS),
    module("TONO", PhdbClass::Ext3, "tono:hdr:status", &[], TONO),
    module("AA2", PhdbClass::Ext3, "aa2:hdr:status", &[], AA2),
];

const fn channel(
    label: &'static str,
    code: u8,
    samples_per_second: Option<u16>,
    scale: f64,
) -> WaveChannel {
    WaveChannel {
        label,
        code,
        samples_per_second,
        scale,
    }
}

/// Waveform channels by request code. Channels without a documented
/// sample rate can still be decoded, but a request cannot budget them.
pub(super) const WAVE_CHANNELS: &[WaveChannel] = &[
    channel("ECG1", 1, Some(300), 1.0),
    channel("ECG2", 2, Some(300), 1.0),
    channel("ECG3", 3, Some(300), 1.0),
    channel("INVP1", 4, Some(100), 0.01),
    channel("INVP2", 5, Some(100), 0.01),
    channel("INVP3", 6, Some(100), 0.01),
    channel("INVP4", 7, Some(100), 0.01),
    channel("PLETH", 8, Some(100), 0.01),
    channel("CO2", 9, Some(25), 0.01),
    channel("O2", 10, None, 1.0),
    channel("N2O", 11, Some(25), 0.01),
    channel("AA_WAVE", 12, Some(25), 0.01),
    channel("AWP", 13, Some(25), 0.1),
    channel("FLOW", 14, Some(25), 0.1),
    channel("RESP", 15, Some(25), 0.01),
    channel("INVP5", 16, Some(100), 0.01),
    channel("INVP6", 17, Some(100), 0.01),
    channel("EEG1", 18, Some(100), 0.1),
    channel("EEG2", 19, Some(100), 0.1),
    channel("EEG3", 20, Some(100), 0.1),
    channel("EEG4", 21, Some(100), 0.1),
    channel("VOL", 23, Some(25), 1.0),
    channel("TONO_PRESS", 24, None, 1.0),
    channel("SPI_LOOP_STATUS", 29, None, 1.0),
    channel("ENT_100", 32, Some(100), 0.1),
    channel("EEG_BIS", 35, None, 1.0),
];
