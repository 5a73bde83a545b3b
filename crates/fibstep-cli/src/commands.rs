//! Command implementations for the fibstep CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fibstep_analysis::{Analyzer, Report};
use fibstep_core::{fib_with, Overflow, StepState};
use fibstep_runtime::{Driver, DriverConfig, JsonSubscriber};

/// Default command: print `count` terms, optionally tracing every step.
pub fn run(config: DriverConfig, trace_file: Option<&Path>) -> Result<()> {
    let mut driver = Driver::new(config);

    if let Some(path) = trace_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create trace file {}", path.display()))?;
        driver = driver.with_subscriber(Box::new(JsonSubscriber::new(BufWriter::new(file))));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver
        .run(&mut out)
        .with_context(|| format!("Failed to print {} term(s)", config.count))?;

    Ok(())
}

/// Term command: print the single value `n` steps ahead of `start`.
pub fn term(start: StepState, n: i64, overflow: Overflow) -> Result<()> {
    let value = fib_with(start.x, start.y, n, overflow)
        .with_context(|| format!("Failed to compute term {}", n))?;
    tracing::debug!(n, value, "term computed");

    let mut out = io::stdout().lock();
    writeln!(out, "{}", value)?;
    Ok(())
}

/// Analyze command: summarize a recorded step trace.
pub fn analyze(trace_path: &Path, json: bool) -> Result<()> {
    let file = File::open(trace_path)
        .with_context(|| format!("Failed to open trace file {}", trace_path.display()))?;
    let metrics = Analyzer::new()
        .analyze_lines(BufReader::new(file))
        .context("Failed to read trace")?;

    let report = Report::new(metrics);
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        write!(out, "{}", report.to_text())?;
    }
    Ok(())
}
