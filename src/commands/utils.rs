use crate::aggregator::{summarize, top_ues, TraceSummary};
use crate::output::write_summary;
use crate::sched::{TddMode, TtiType};
use crate::trace::read_trace;
use crate::utils::config::{DEFAULT_SCHED_TRACE_FILENAME, SUMMARY_SCHEMA_VERSION, TRACE_HEADER};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Validate a trace file
pub fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    println!("Validating trace: {}", file_path.display());

    let records = read_trace(&file_path)
        .with_context(|| format!("Invalid trace {}", file_path.display()))?;

    let ul_data = records
        .iter()
        .filter(|r| r.tti_type == TtiType::Data && r.tdd_mode == TddMode::Ul)
        .count();

    println!("✓ Valid scheduler allocation trace");
    println!("  Allocations: {}", records.len());
    println!("  UL data allocations: {}", ul_data);

    Ok(())
}

/// Summarize a trace file, printing the busiest UEs and optionally writing JSON
pub fn summarize_trace_file(
    file_path: &Path,
    json_output: Option<&Path>,
    top_n: usize,
) -> Result<TraceSummary> {
    let records = read_trace(file_path)
        .with_context(|| format!("Invalid trace {}", file_path.display()))?;

    let summary = summarize(&records, &file_path.display().to_string());

    println!("\n{}", "=".repeat(60));
    println!("SCHEDULER ALLOCATION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Trace:        {}", summary.source);
    println!("Allocations:  {}", summary.total_records);
    println!("Slots:        {}", summary.slot_count);
    if let (Some(first), Some(last)) = (summary.first_sfn_sf, summary.last_sfn_sf) {
        println!("Range:        {} .. {}", first, last);
    }
    println!(
        "By type:      data={} ctrl={} ctrl_data={}",
        summary.by_type.data, summary.by_type.ctrl, summary.by_type.ctrl_data
    );
    println!();
    println!("{:>6}  {:>8}  {:>8}  {:>8}  {:>8}", "rnti", "dlAlloc", "dlSym", "ulAlloc", "ulSym");
    for ue in top_ues(&summary, top_n) {
        println!(
            "{:>6}  {:>8}  {:>8}  {:>8}  {:>8}",
            ue.rnti, ue.dl_data_allocs, ue.dl_data_symbols, ue.ul_data_allocs, ue.ul_data_symbols
        );
    }
    println!("{}", "=".repeat(60));

    if let Some(path) = json_output {
        write_summary(&summary, path).context("Failed to write summary JSON")?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(summary)
}

/// Display trace file layout
pub fn display_schema(show_details: bool) {
    println!("eNB Scheduler Allocation Trace");
    println!("Default file: {}", DEFAULT_SCHED_TRACE_FILENAME);
    println!("Header: {}", TRACE_HEADER.replace('\t', "  "));
    println!();

    if show_details {
        println!("Columns (tab separated):");
        println!("  frame     - frame number");
        println!("  subF      - subframe number");
        println!("  slot      - slot number");
        println!("  rnti      - recipient UE identifier");
        println!("  firstSym  - first OFDM symbol of the allocation");
        println!("  numSym    - number of symbols");
        println!("  type      - 0 = CTRL_DATA, 1 = DATA, 2 = CTRL");
        println!("  tddMode   - 0 = NA, 1 = DL, 2 = UL");
        println!();
        println!("UL DATA allocations carry the uplink-intended slot;");
        println!("all other allocations carry the downlink-intended slot.");
        println!();
        println!("Summary JSON schema: v{}", SUMMARY_SCHEMA_VERSION);
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("mmWave Sched Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SUMMARY_SCHEMA_VERSION);
    println!();
    println!("Scheduler allocation tracing for mmWave eNB MAC simulations.");
}
