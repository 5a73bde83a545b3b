//! Analysis tools for fibstep step traces.
//!
//! This crate provides:
//! - Metrics extraction from recorded trace events
//! - Text and JSON reports over those metrics

pub mod analyzer;
pub mod metrics;
pub mod report;

pub use analyzer::Analyzer;
pub use metrics::{Metrics, TermMetrics};
pub use report::Report;
