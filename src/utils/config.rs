//! Configuration and constants for the trace writer and CLI.

/// Default name of the scheduler allocation trace file
pub const DEFAULT_SCHED_TRACE_FILENAME: &str = "EnbSchedAllocTraces.txt";

/// Environment variable that overrides the trace filename in the CLI
pub const SCHED_TRACE_OUTPUT_ENV: &str = "SCHED_TRACE_OUTPUT";

/// Column names, in file order
pub const TRACE_COLUMNS: [&str; 8] = [
    "frame", "subF", "slot", "rnti", "firstSym", "numSym", "type", "tddMode",
];

/// Header line written once after the trace file is opened
pub const TRACE_HEADER: &str = "frame\tsubF\tslot\trnti\tfirstSym\tnumSym\ttype\ttddMode";

/// Current summary JSON schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_matches_columns() {
        assert_eq!(TRACE_HEADER, TRACE_COLUMNS.join("\t"));
    }
}
