//! Line protocol for step traces.
//!
//! Trace events travel as single text lines: a fixed prefix followed by the
//! JSON encoding of a [`TraceEvent`]. Lines without the prefix are ordinary
//! program output and are passed through untouched.

use crate::trace::TraceEvent;

/// Prefix for JSON-encoded trace events.
pub const TRACE_PREFIX: &str = "FIBSTEP_TRACE:";

/// Encode an event as a trace line, without the trailing newline.
pub fn format_trace(event: &TraceEvent) -> Result<String, serde_json::Error> {
    Ok(format!("{}{}", TRACE_PREFIX, serde_json::to_string(event)?))
}

/// Parse a trace line, returning the deserialized event if the line matches.
///
/// Returns `None` if the line doesn't have the trace prefix.
/// Returns `Some(Err(...))` if the line has the prefix but JSON parsing fails.
pub fn parse_trace(line: &str) -> Option<Result<TraceEvent, serde_json::Error>> {
    line.strip_prefix(TRACE_PREFIX).map(serde_json::from_str)
}

/// A classified line of output.
#[derive(Debug)]
pub enum TraceLine<'a> {
    /// Parsed trace event.
    Trace(TraceEvent),
    /// Regular output, or a prefixed line whose payload didn't parse.
    Unknown(&'a str),
}

/// Classify a line of output.
///
/// # Example
/// ```
/// use fibstep_core::ipc::{parse_line, TraceLine};
///
/// match parse_line("55") {
///     TraceLine::Unknown(s) => assert_eq!(s, "55"),
///     _ => panic!("Expected Unknown"),
/// }
/// ```
pub fn parse_line(line: &str) -> TraceLine<'_> {
    match parse_trace(line) {
        Some(Ok(event)) => TraceLine::Trace(event),
        _ => TraceLine::Unknown(line),
    }
}
