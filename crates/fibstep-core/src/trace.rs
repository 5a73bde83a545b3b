//! Step-trace types.

use serde::{Deserialize, Serialize};

use crate::stepper::Term;

/// A single stepper advance recorded during a driver run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Position of this step across the whole run, starting at 1
    pub exec_index: u64,
    /// Index of the driver term being computed
    pub term_index: u32,
    /// Steps left before this one is taken
    pub remaining: i64,
    pub x: Term,
    pub y: Term,
}

/// A single event in a step trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TraceEvent {
    TermStart { term_index: u32, n: i64 },
    Step(StepRecord),
    TermEnd { term_index: u32, value: Term },
}

impl TraceEvent {
    pub fn term_index(&self) -> u32 {
        match self {
            TraceEvent::TermStart { term_index, .. } => *term_index,
            TraceEvent::Step(record) => record.term_index,
            TraceEvent::TermEnd { term_index, .. } => *term_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged() {
        let event = TraceEvent::Step(StepRecord {
            exec_index: 3,
            term_index: 2,
            remaining: 1,
            x: 1,
            y: 1,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Step");
        assert_eq!(json["exec_index"], 3);
        assert_eq!(event.term_index(), 2);

        let end = TraceEvent::TermEnd { term_index: 5, value: 5 };
        let json = serde_json::to_string(&end).unwrap();
        assert_eq!(json, r#"{"type":"TermEnd","term_index":5,"value":5}"#);
    }
}
