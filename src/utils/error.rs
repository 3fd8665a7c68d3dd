//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the scheduler allocation trace writer
#[derive(Error, Debug)]
pub enum TraceError {
    /// The trace file could not be opened. Tracing is mandatory once enabled,
    /// so callers normally treat this as fatal.
    #[error("Could not open tracefile {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write trace line: {0}")]
    Write(#[from] std::io::Error),

    /// An earlier open attempt failed; the writer does not retry.
    #[error("Trace writer unavailable after failed open of {0}")]
    Unavailable(PathBuf),
}

/// Errors that can occur while parsing scheduling reports or trace files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing or invalid header: {0:?}")]
    InvalidHeader(String),

    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid value {value:?} for column {column}")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// Errors that can occur during summary output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
