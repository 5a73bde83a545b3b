use fibstep_core::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metrics extracted from a step trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Terms that reached `TermEnd`
    pub terms: u32,
    pub total_steps: u64,
    pub max_value: Option<Term>,
    pub per_term: BTreeMap<u32, TermMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMetrics {
    pub steps: u64,
    /// `None` if the term never finished, e.g. it overflowed
    pub value: Option<Term>,
}
