//! mmWave Sched Trace CLI
//!
//! Records scheduler allocation reports to a trace file and inspects
//! existing traces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use mmwave_sched_trace::commands::{
    display_schema, display_version, execute_record, summarize_trace_file, validate_args,
    validate_trace_file, RecordArgs,
};
use mmwave_sched_trace::output::validate_path;
use mmwave_sched_trace::utils::config::{DEFAULT_SCHED_TRACE_FILENAME, SCHED_TRACE_OUTPUT_ENV};

/// mmWave Sched Trace - scheduler allocation tracing
#[derive(Parser, Debug)]
#[command(name = "sched-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay scheduling reports (JSON lines) into a trace file
    Record {
        /// Scheduling reports, one JSON object per line (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Trace output filename
        #[arg(short, long, env = SCHED_TRACE_OUTPUT_ENV, default_value = DEFAULT_SCHED_TRACE_FILENAME)]
        output: PathBuf,
    },

    /// Validate a trace file
    Validate {
        /// Path to trace file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Summarize allocations per UE
    Summary {
        /// Path to trace file
        #[arg(short, long)]
        file: PathBuf,

        /// Also write the summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Number of UEs to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Display trace file layout
    Schema {
        /// Show full column details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Record { input, output } => {
            let args = RecordArgs { input, output };

            validate_args(&args)?;

            // A trace that cannot be opened ends the run with an error
            execute_record(args)?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Summary { file, json, top } => {
            if let Some(path) = &json {
                validate_path(path)?;
            }
            summarize_trace_file(&file, json.as_deref(), top)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
