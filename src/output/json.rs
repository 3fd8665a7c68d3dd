//! JSON summary output writer.
//!
//! Writes TraceSummary structs to JSON files with proper formatting.

use crate::aggregator::TraceSummary;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a summary to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `summary` - Summary data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(summary: &TraceSummary, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                )))?;
        }
    }

    let file = File::create(output_path)
        .map_err(OutputError::WriteFailed)?;

    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, summary)
        .map_err(OutputError::SerializationFailed)?;

    writer.flush()
        .map_err(OutputError::WriteFailed)?;

    info!("Summary written successfully ({} UEs)", summary.ues.len());

    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - shared by the CLI for early argument checks
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Read a summary from a JSON file
///
/// **Public** - useful for tests and comparing runs
///
/// # Errors
/// * `OutputError::ReadFailed` - file could not be opened
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<TraceSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path)
        .map_err(OutputError::ReadFailed)?;

    let summary: TraceSummary = serde_json::from_reader(file)
        .map_err(OutputError::SerializationFailed)?;

    debug!("Summary loaded: version {}, {} records",
           summary.version,
           summary.total_records);

    Ok(summary)
}
