use std::io::BufRead;

use fibstep_core::ipc::{parse_line, TraceLine};
use fibstep_core::trace::TraceEvent;
use fibstep_core::Result;

use crate::metrics::Metrics;

/// Analyzes step traces to extract metrics.
pub struct Analyzer {}

impl Analyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// Analyze a sequence of trace events.
    pub fn analyze(&self, events: &[TraceEvent]) -> Metrics {
        let mut metrics = Metrics::default();

        for event in events {
            match event {
                TraceEvent::TermStart { term_index, .. } => {
                    metrics.per_term.entry(*term_index).or_default();
                }
                TraceEvent::Step(record) => {
                    metrics.total_steps += 1;
                    metrics.per_term.entry(record.term_index).or_default().steps += 1;
                }
                TraceEvent::TermEnd { term_index, value } => {
                    metrics.terms += 1;
                    metrics.per_term.entry(*term_index).or_default().value = Some(*value);
                    metrics.max_value = Some(metrics.max_value.map_or(*value, |m| m.max(*value)));
                }
            }
        }

        metrics
    }

    /// Analyze trace lines read from `reader`. Lines that are not trace
    /// lines, including lines that are not UTF-8, are skipped.
    pub fn analyze_lines<R: BufRead>(&self, reader: R) -> Result<Metrics> {
        let mut events = Vec::new();
        let mut skipped = 0usize;

        for raw in reader.split(b'\n') {
            let bytes = raw?;
            let raw = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
            let Ok(line) = std::str::from_utf8(raw) else {
                skipped += 1;
                continue;
            };
            match parse_line(line) {
                TraceLine::Trace(event) => events.push(event),
                TraceLine::Unknown(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped non-trace lines");
        }

        Ok(self.analyze(&events))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibstep_core::trace::StepRecord;

    fn step(exec_index: u64, term_index: u32, remaining: i64) -> TraceEvent {
        TraceEvent::Step(StepRecord {
            exec_index,
            term_index,
            remaining,
            x: 0,
            y: 1,
        })
    }

    #[test]
    fn test_analyze_events() {
        let events = vec![
            TraceEvent::TermStart { term_index: 0, n: 0 },
            TraceEvent::TermEnd { term_index: 0, value: 0 },
            TraceEvent::TermStart { term_index: 2, n: 2 },
            step(1, 2, 2),
            step(2, 2, 1),
            TraceEvent::TermEnd { term_index: 2, value: 1 },
        ];
        let metrics = Analyzer::new().analyze(&events);

        assert_eq!(metrics.terms, 2);
        assert_eq!(metrics.total_steps, 2);
        assert_eq!(metrics.max_value, Some(1));
        assert_eq!(metrics.per_term[&2].steps, 2);
        assert_eq!(metrics.per_term[&0].value, Some(0));
    }

    #[test]
    fn test_unfinished_term_has_no_value() {
        let events = vec![TraceEvent::TermStart { term_index: 93, n: 93 }, step(1, 93, 93)];
        let metrics = Analyzer::new().analyze(&events);

        assert_eq!(metrics.terms, 0);
        assert_eq!(metrics.max_value, None);
        assert_eq!(metrics.per_term[&93].value, None);
        assert_eq!(metrics.per_term[&93].steps, 1);
    }

    #[test]
    fn test_analyze_lines_skips_plain_output() {
        let input = "0\nFIBSTEP_TRACE:{\"type\":\"TermEnd\",\"term_index\":0,\"value\":0}\nhello\n";
        let metrics = Analyzer::new().analyze_lines(input.as_bytes()).unwrap();
        assert_eq!(metrics.terms, 1);
        assert_eq!(metrics.per_term.len(), 1);
    }

    #[test]
    fn test_analyze_lines_skips_invalid_utf8() {
        let mut input = b"FIBSTEP_TRACE:{\"type\":\"TermEnd\",\"term_index\":4,\"value\":3}\r\n".to_vec();
        input.extend_from_slice(b"\xff\xfe junk\n");
        input.extend_from_slice(b"FIBSTEP_TRACE:{\"type\":\"TermEnd\",\"term_index\":5,\"value\":5}");

        let metrics = Analyzer::new().analyze_lines(input.as_slice()).unwrap();
        assert_eq!(metrics.terms, 2);
        assert_eq!(metrics.max_value, Some(5));
    }

    #[test]
    fn test_analyze_lines_propagates_read_errors() {
        struct FailingReader;

        impl std::io::Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
            }
        }

        let reader = std::io::BufReader::new(FailingReader);
        let err = Analyzer::new().analyze_lines(reader).unwrap_err();
        assert!(matches!(err, fibstep_core::Error::Io(_)));
    }

    #[test]
    fn test_empty_trace() {
        let metrics = Analyzer::default().analyze(&[]);
        assert_eq!(metrics, Default::default());
    }
}
