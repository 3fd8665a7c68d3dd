//! Output writers for trace summaries.
//!
//! The trace file itself is written by `crate::trace`; this module writes
//! the derived JSON summaries.

pub mod json;

// Re-export main functions
pub use json::{read_summary, validate_path, write_summary};
