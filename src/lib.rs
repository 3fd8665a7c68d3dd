//! mmWave Sched Trace
//!
//! Scheduler allocation tracing for mmWave eNB MAC simulations.
//!
//! The MAC scheduler hands a [`sched::SchedTraceInfo`] to a
//! [`trace::MacTrace`] once per scheduling cycle. The trace opens its file on
//! the first report, writes a header, then appends one tab-separated line per
//! allocation:
//!
//! ```text
//! frame	subF	slot	rnti	firstSym	numSym	type	tddMode
//! ```
//!
//! Uplink data allocations are stamped with the uplink-intended slot; every
//! other allocation uses the downlink-intended slot.
//!
//! ```ignore
//! let mut trace = MacTrace::default();
//! trace.set_output_filename("sched.txt");
//! trace.report_sched_info(&info)?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod sched;
pub mod trace;
pub mod utils;
