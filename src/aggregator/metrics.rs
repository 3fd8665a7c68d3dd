//! Summary statistics over scheduler allocation traces.
//!
//! The busiest UEs (by scheduled data symbols) are usually what one looks
//! at first when checking a scheduler's fairness.

use crate::sched::{SchedAllocRecord, SfnSf, TddMode, TtiType};
use crate::utils::config::SUMMARY_SCHEMA_VERSION;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the summary was computed from
    pub source: String,

    /// Number of allocation lines
    pub total_records: u64,

    /// Number of distinct frame/subframe/slot timestamps
    pub slot_count: u64,

    /// Earliest and latest timestamps in the trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_sfn_sf: Option<SfnSf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sfn_sf: Option<SfnSf>,

    /// Allocation counts by TTI type
    pub by_type: TypeCounts,

    /// Per-UE statistics, sorted by scheduled data symbols (descending)
    pub ues: Vec<UeSummary>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// Allocation counts by TTI type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub ctrl_data: u64,
    pub data: u64,
    pub ctrl: u64,
}

/// Allocation statistics for one RNTI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UeSummary {
    pub rnti: u16,

    /// DATA allocations traced on the downlink slot, including those with
    /// no TDD direction (NA)
    pub dl_data_allocs: u64,
    pub ul_data_allocs: u64,

    /// CTRL and CTRL_DATA allocations in either direction
    pub ctrl_allocs: u64,
    pub dl_data_symbols: u64,
    pub ul_data_symbols: u64,
}

impl UeSummary {
    pub fn data_symbols(&self) -> u64 {
        self.dl_data_symbols + self.ul_data_symbols
    }
}

/// Compute summary statistics for a set of trace records
///
/// **Public** - main entry point for trace aggregation
///
/// # Arguments
/// * `records` - Records as read from the trace file
/// * `source` - Name of the trace, stored in the summary
pub fn summarize(records: &[SchedAllocRecord], source: &str) -> TraceSummary {
    debug!("Summarizing {} records from {}", records.len(), source);

    let mut by_type = TypeCounts::default();
    let mut per_ue: BTreeMap<u16, UeSummary> = BTreeMap::new();
    let mut slots: BTreeSet<SfnSf> = BTreeSet::new();

    for record in records {
        slots.insert(record.sfn_sf);

        match record.tti_type {
            TtiType::CtrlData => by_type.ctrl_data += 1,
            TtiType::Data => by_type.data += 1,
            TtiType::Ctrl => by_type.ctrl += 1,
        }

        let ue = per_ue.entry(record.rnti).or_insert_with(|| UeSummary {
            rnti: record.rnti,
            ..Default::default()
        });
        let symbols = u64::from(record.num_sym);

        match (record.tti_type, record.tdd_mode) {
            (TtiType::Data, TddMode::Ul) => {
                ue.ul_data_allocs += 1;
                ue.ul_data_symbols += symbols;
            }
            (TtiType::Data, TddMode::Dl | TddMode::Na) => {
                ue.dl_data_allocs += 1;
                ue.dl_data_symbols += symbols;
            }
            (TtiType::Ctrl | TtiType::CtrlData, _) => ue.ctrl_allocs += 1,
        }
    }

    let mut ues: Vec<UeSummary> = per_ue.into_values().collect();
    // Stable sort keeps ascending RNTI order among ties
    ues.sort_by(|a, b| b.data_symbols().cmp(&a.data_symbols()));

    TraceSummary {
        version: SUMMARY_SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        total_records: records.len() as u64,
        slot_count: slots.len() as u64,
        first_sfn_sf: slots.first().copied(),
        last_sfn_sf: slots.last().copied(),
        by_type,
        ues,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// The `top_n` UEs with the most scheduled data symbols
pub fn top_ues(summary: &TraceSummary, top_n: usize) -> &[UeSummary] {
    &summary.ues[..top_n.min(summary.ues.len())]
}
