//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod record;
pub mod utils;

// Re-export main command functions
pub use record::{execute_record, replay_reports, validate_args, RecordArgs, RecordStats};
pub use utils::{display_schema, display_version, summarize_trace_file, validate_trace_file};
