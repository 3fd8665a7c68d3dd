//! Scheduling report data model.
//!
//! These types are produced by the eNB MAC scheduler and consumed read-only
//! by the trace writer:
//! - Frame/subframe/slot timestamps
//! - Per-TTI allocation entries and their DCI
//! - The per-cycle scheduling report

pub mod types;

// Re-export main types
pub use types::{
    DciInfo, SchedAllocRecord, SchedTraceInfo, SfnSf, SlotAllocInfo, TddMode, TtiAllocInfo,
    TtiType,
};
