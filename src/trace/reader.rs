//! Trace file reader.
//!
//! Parses a scheduler allocation trace back into records. Used by the
//! `validate` and `summary` commands.

use crate::sched::{SchedAllocRecord, SfnSf, TddMode, TtiType};
use crate::utils::config::{TRACE_COLUMNS, TRACE_HEADER};
use crate::utils::error::ParseError;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Read every record from a trace file
///
/// **Public** - main entry point for reading traces
///
/// # Errors
/// * `ParseError::Io` - file could not be read
/// * `ParseError::InvalidHeader` - first line is not the trace header
/// * `ParseError::ColumnCount` / `ParseError::InvalidField` - malformed data line
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<Vec<SchedAllocRecord>, ParseError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path)?;
    let records = read_trace_from(BufReader::new(file))?;

    debug!("Trace loaded: {} records", records.len());

    Ok(records)
}

/// Read records from any buffered reader
pub fn read_trace_from(reader: impl BufRead) -> Result<Vec<SchedAllocRecord>, ParseError> {
    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => parse_header(&header?)?,
        None => return Err(ParseError::InvalidHeader(String::new())),
    }

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1
        records.push(parse_trace_line(&line, idx + 2)?);
    }

    Ok(records)
}

/// Check that a line is the trace header
pub fn parse_header(line: &str) -> Result<(), ParseError> {
    if strip_cr(line) == TRACE_HEADER {
        Ok(())
    } else {
        Err(ParseError::InvalidHeader(line.to_string()))
    }
}

/// Parse one tab-separated data line
///
/// `line_no` is only used in error messages.
pub fn parse_trace_line(line: &str, line_no: usize) -> Result<SchedAllocRecord, ParseError> {
    let fields: Vec<&str> = strip_cr(line).split('\t').collect();

    if fields.len() != TRACE_COLUMNS.len() {
        return Err(ParseError::ColumnCount {
            line: line_no,
            expected: TRACE_COLUMNS.len(),
            found: fields.len(),
        });
    }

    let tti_type = parse_field::<i32>(&fields, 6, line_no)?;
    let tti_type = TtiType::try_from(tti_type).map_err(|_| invalid(&fields, 6, line_no))?;

    let tdd_mode = parse_field::<i32>(&fields, 7, line_no)?;
    let tdd_mode = TddMode::try_from(tdd_mode).map_err(|_| invalid(&fields, 7, line_no))?;

    Ok(SchedAllocRecord {
        sfn_sf: SfnSf::new(
            parse_field(&fields, 0, line_no)?,
            parse_field(&fields, 1, line_no)?,
            parse_field(&fields, 2, line_no)?,
        ),
        rnti: parse_field(&fields, 3, line_no)?,
        sym_start: parse_field(&fields, 4, line_no)?,
        num_sym: parse_field(&fields, 5, line_no)?,
        tti_type,
        tdd_mode,
    })
}

/// Drop a CRLF line ending's `\r`; tabs are significant
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse column `idx` as `T`
///
/// **Private** - internal helper
fn parse_field<T: FromStr>(fields: &[&str], idx: usize, line_no: usize) -> Result<T, ParseError> {
    fields[idx]
        .parse()
        .map_err(|_| invalid(fields, idx, line_no))
}

fn invalid(fields: &[&str], idx: usize, line_no: usize) -> ParseError {
    ParseError::InvalidField {
        line: line_no,
        column: TRACE_COLUMNS[idx],
        value: fields[idx].to_string(),
    }
}
