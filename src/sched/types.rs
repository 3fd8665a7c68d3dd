//! Scheduler allocation types and the timestamp selection rule.
//!
//! Enum integer values match the simulator's encoding and are what the
//! trace file stores in its `type` and `tddMode` columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame, subframe and slot numbers identifying one slot of simulated time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SfnSf {
    pub frame_num: u16,
    pub sf_num: u8,
    pub slot_num: u8,
}

impl SfnSf {
    pub fn new(frame_num: u16, sf_num: u8, slot_num: u8) -> Self {
        Self { frame_num, sf_num, slot_num }
    }
}

impl fmt::Display for SfnSf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.frame_num, self.sf_num, self.slot_num)
    }
}

/// Kind of a TTI allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TtiType {
    CtrlData = 0,
    Data = 1,
    Ctrl = 2,
}

impl TtiType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_data(self) -> bool {
        self == TtiType::Data
    }
}

impl TryFrom<i32> for TtiType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TtiType::CtrlData),
            1 => Ok(TtiType::Data),
            2 => Ok(TtiType::Ctrl),
            other => Err(other),
        }
    }
}

/// Direction of a TTI allocation within the TDD frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TddMode {
    Na = 0,
    Dl = 1,
    Ul = 2,
}

impl TddMode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for TddMode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TddMode::Na),
            1 => Ok(TddMode::Dl),
            2 => Ok(TddMode::Ul),
            other => Err(other),
        }
    }
}

/// Downlink control information for one grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DciInfo {
    pub rnti: u16,
    pub sym_start: u8,
    pub num_sym: u8,
}

/// One scheduled TTI allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtiAllocInfo {
    pub tti_type: TtiType,
    pub tdd_mode: TddMode,
    pub dci: DciInfo,
}

impl TtiAllocInfo {
    pub fn new(tti_type: TtiType, tdd_mode: TddMode, rnti: u16, sym_start: u8, num_sym: u8) -> Self {
        Self {
            tti_type,
            tdd_mode,
            dci: DciInfo { rnti, sym_start, num_sym },
        }
    }

    /// True for uplink data grants, the only allocations that are traced
    /// with the uplink-intended timestamp.
    pub fn is_ul_data(&self) -> bool {
        self.tti_type.is_data() && self.tdd_mode == TddMode::Ul
    }
}

/// Allocations decided for one slot, with the slot they are intended for on the downlink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAllocInfo {
    pub sfn_sf: SfnSf,
    #[serde(default)]
    pub tti_alloc_info: Vec<TtiAllocInfo>,
}

/// Scheduling report delivered by the MAC once per scheduling cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedTraceInfo {
    pub slot_alloc_info: SlotAllocInfo,

    /// Slot that uplink data grants are intended for (shifted by the UL scheduling delay)
    pub ul_sfn_sf: SfnSf,
}

impl SchedTraceInfo {
    pub fn new(dl_sfn_sf: SfnSf, ul_sfn_sf: SfnSf, tti_alloc_info: Vec<TtiAllocInfo>) -> Self {
        Self {
            slot_alloc_info: SlotAllocInfo {
                sfn_sf: dl_sfn_sf,
                tti_alloc_info,
            },
            ul_sfn_sf,
        }
    }

    pub fn dl_sfn_sf(&self) -> SfnSf {
        self.slot_alloc_info.sfn_sf
    }

    /// Timestamp an allocation is traced with
    pub fn trace_sfn_sf(&self, tti: &TtiAllocInfo) -> SfnSf {
        if tti.is_ul_data() {
            self.ul_sfn_sf
        } else {
            self.dl_sfn_sf()
        }
    }

    /// Trace records for every allocation, in scheduling order
    pub fn records(&self) -> impl Iterator<Item = SchedAllocRecord> + '_ {
        self.slot_alloc_info
            .tti_alloc_info
            .iter()
            .map(move |tti| SchedAllocRecord {
                sfn_sf: self.trace_sfn_sf(tti),
                rnti: tti.dci.rnti,
                sym_start: tti.dci.sym_start,
                num_sym: tti.dci.num_sym,
                tti_type: tti.tti_type,
                tdd_mode: tti.tdd_mode,
            })
    }
}

/// One line of the allocation trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedAllocRecord {
    pub sfn_sf: SfnSf,
    pub rnti: u16,
    pub sym_start: u8,
    pub num_sym: u8,
    pub tti_type: TtiType,
    pub tdd_mode: TddMode,
}

impl fmt::Display for SchedAllocRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.sfn_sf.frame_num,
            self.sfn_sf.sf_num,
            self.sfn_sf.slot_num,
            self.rnti,
            self.sym_start,
            self.num_sym,
            self.tti_type.as_i32(),
            self.tdd_mode.as_i32(),
        )
    }
}
