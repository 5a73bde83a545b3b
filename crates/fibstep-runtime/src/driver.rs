use std::io::Write;

use fibstep_core::trace::{StepRecord, TraceEvent};
use fibstep_core::{fib_traced, Overflow, Result, StepState, Term};

use crate::subscriber::{NoOpSubscriber, Subscriber};

/// What the driver prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Seed pair passed to the stepper for every term.
    pub start: StepState,
    /// Number of terms; term `i` is the stepper run for `i` steps.
    pub count: u32,
    pub overflow: Overflow,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            start: StepState::fibonacci(),
            count: 12,
            overflow: Overflow::Checked,
        }
    }
}

/// Totals for one driver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub terms: u32,
    pub steps: u64,
}

/// Prints one stepper result per line for `i` in `0..count`.
pub struct Driver {
    config: DriverConfig,
    subscriber: Box<dyn Subscriber>,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            subscriber: Box::new(NoOpSubscriber),
        }
    }

    pub fn with_subscriber(mut self, subscriber: Box<dyn Subscriber>) -> Self {
        self.subscriber = subscriber;
        self
    }

    /// Write every term followed by a newline.
    ///
    /// Terms already written stay written if a later term fails. The
    /// subscriber is completed either way.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        tracing::info!(
            count = self.config.count,
            x = self.config.start.x,
            y = self.config.start.y,
            overflow = self.config.overflow.name(),
            "running driver"
        );

        let result = self.write_terms(out);
        self.subscriber.on_complete();

        let summary = result?;
        tracing::info!(terms = summary.terms, steps = summary.steps, "driver finished");
        Ok(summary)
    }

    /// Compute every term without writing it anywhere.
    pub fn values(&self) -> Result<Vec<Term>> {
        let mut summary = RunSummary::default();
        let values = (0..self.config.count)
            .map(|i| self.term(i, &mut summary))
            .collect::<Result<Vec<_>>>();
        self.subscriber.on_complete();
        values
    }

    fn write_terms<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for i in 0..self.config.count {
            let value = self.term(i, &mut summary)?;
            writeln!(out, "{}", value)?;
        }
        out.flush()?;
        Ok(summary)
    }

    fn term(&self, term_index: u32, summary: &mut RunSummary) -> Result<Term> {
        let n = i64::from(term_index);
        let DriverConfig { start, overflow, .. } = self.config;

        self.subscriber.on_trace(TraceEvent::TermStart { term_index, n });

        let value = fib_traced(start.x, start.y, n, overflow, |state, remaining| {
            summary.steps += 1;
            self.subscriber.on_trace(TraceEvent::Step(StepRecord {
                exec_index: summary.steps,
                term_index,
                remaining,
                x: state.x,
                y: state.y,
            }));
        })?;

        self.subscriber.on_trace(TraceEvent::TermEnd { term_index, value });
        summary.terms += 1;
        tracing::debug!(term_index, value, "term computed");

        Ok(value)
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}
