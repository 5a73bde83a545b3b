use std::fmt::Write;

use crate::metrics::Metrics;
use fibstep_core::Result;

/// Generates human-readable and machine-readable reports.
pub struct Report {
    metrics: Metrics,
}

impl Report {
    pub fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let m = &self.metrics;
        let mut out = String::new();

        let _ = writeln!(out, "Terms: {}", m.terms);
        let _ = writeln!(out, "Total steps: {}", m.total_steps);
        match m.max_value {
            Some(max) => {
                let _ = writeln!(out, "Max value: {}", max);
            }
            None => {
                let _ = writeln!(out, "Max value: -");
            }
        }

        for (term_index, term) in &m.per_term {
            let value = term
                .value
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unfinished".to_string());
            let _ = writeln!(out, "  [{}] steps={} value={}", term_index, term.steps, value);
        }

        out
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.metrics)?)
    }
}
