//! Record command implementation.
//!
//! The record command replays scheduling reports exported by the MAC
//! (one JSON `SchedTraceInfo` per line) through the trace writer:
//! 1. Opens the report stream (file or stdin)
//! 2. Configures the trace filename
//! 3. Feeds every report to the writer
//! 4. Closes the trace

use crate::sched::SchedTraceInfo;
use crate::trace::{MacTrace, SchedTraceSink};
use crate::utils::config::DEFAULT_SCHED_TRACE_FILENAME;
use crate::utils::error::ParseError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the record command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RecordArgs {
    /// JSON-lines file of scheduling reports, `-` for stdin
    pub input: PathBuf,

    /// Trace output filename
    pub output: PathBuf,
}

impl Default for RecordArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: PathBuf::from(DEFAULT_SCHED_TRACE_FILENAME),
        }
    }
}

/// Counters reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStats {
    pub reports: usize,
    pub allocations: usize,
}

/// Execute the record command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input cannot be opened or contains malformed reports
/// * Trace file cannot be opened (fatal: tracing was requested)
pub fn execute_record(args: RecordArgs) -> Result<RecordStats> {
    let start_time = Instant::now();

    info!("Recording scheduler allocations to: {}", args.output.display());

    let mut trace = MacTrace::default();
    trace.set_output_filename(&args.output);

    let stats = if args.input.as_os_str() == "-" {
        info!("Reading scheduling reports from stdin");
        replay_reports(io::stdin().lock(), &mut trace)?
    } else {
        info!("Reading scheduling reports from: {}", args.input.display());
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open input {}", args.input.display()))?;
        replay_reports(BufReader::new(file), &mut trace)?
    };

    // Drop flushes and closes the trace file
    drop(trace);

    info!(
        "✓ Traced {} allocations from {} reports in {:.2}s",
        stats.allocations,
        stats.reports,
        start_time.elapsed().as_secs_f64()
    );

    Ok(stats)
}

/// Feed every JSON-lines scheduling report to `sink`
///
/// **Public** - lets callers replay into any trace sink
pub fn replay_reports(reader: impl BufRead, sink: &mut dyn SchedTraceSink) -> Result<RecordStats> {
    let mut stats = RecordStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read scheduling report")?;
        if line.trim().is_empty() {
            continue;
        }

        let info: SchedTraceInfo = serde_json::from_str(&line)
            .map_err(|source| ParseError::Json { line: idx + 1, source })?;

        sink.report_sched_info(&info)
            .context("Failed to trace scheduling report")?;

        stats.reports += 1;
        stats.allocations += info.slot_alloc_info.tti_alloc_info.len();
    }

    debug!("Replayed {} reports", stats.reports);

    Ok(stats)
}

/// Validate record arguments
///
/// **Public** - can be called before execute_record for early validation
pub fn validate_args(args: &RecordArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output filename cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Input and output must be different files");
    }

    Ok(())
}
