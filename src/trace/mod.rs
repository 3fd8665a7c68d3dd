//! Scheduler allocation trace file.
//!
//! This module handles:
//! - Opening the trace file and writing its header
//! - Appending one line per allocation for each scheduling report
//! - Reading trace files back for validation and summaries

pub mod reader;
pub mod writer;

// Re-export main types and functions
pub use reader::{parse_header, parse_trace_line, read_trace, read_trace_from};
pub use writer::{MacTrace, SchedAllocTraceFile, SchedTraceSink};
