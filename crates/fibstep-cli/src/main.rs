//! CLI for fibstep.
//!
//! With no arguments, prints `F(0)` through `F(11)`, one per line.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fibstep_core::{Overflow, StepState, Term};
use fibstep_runtime::DriverConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fibstep")]
#[command(about = "Print the leading terms of a Fibonacci-style sequence", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of terms to print
    #[arg(long, default_value_t = 12)]
    count: u32,

    /// Write a JSON step trace to this file
    #[arg(long)]
    trace_file: Option<PathBuf>,

    /// First value of the seed pair
    #[arg(long = "x", global = true, default_value_t = 0, allow_negative_numbers = true)]
    x: Term,

    /// Second value of the seed pair
    #[arg(long = "y", global = true, default_value_t = 1, allow_negative_numbers = true)]
    y: Term,

    /// Behavior when a sum does not fit in 64 bits
    #[arg(long, global = true, value_enum, default_value = "checked")]
    overflow: OverflowPolicy,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the single value N steps ahead of the seed
    Term {
        /// Number of steps; zero or negative prints the seed's first value
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Summarize a recorded step trace
    Analyze {
        /// Path to a file written with --trace-file
        trace_path: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overflow policies selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OverflowPolicy {
    /// Fail with an error (default)
    Checked,
    /// Wrap around in two's complement
    Wrapping,
    /// Clamp to the 64-bit range
    Saturating,
}

impl From<OverflowPolicy> for Overflow {
    fn from(policy: OverflowPolicy) -> Self {
        match policy {
            OverflowPolicy::Checked => Overflow::Checked,
            OverflowPolicy::Wrapping => Overflow::Wrapping,
            OverflowPolicy::Saturating => Overflow::Saturating,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let start = StepState::new(cli.x, cli.y);
    let overflow = Overflow::from(cli.overflow);

    match cli.command {
        None => commands::run(
            DriverConfig {
                start,
                count: cli.count,
                overflow,
            },
            cli.trace_file.as_deref(),
        ),
        Some(Commands::Term { n }) => commands::term(start, n, overflow),
        Some(Commands::Analyze { trace_path, json }) => commands::analyze(&trace_path, json),
    }
}
