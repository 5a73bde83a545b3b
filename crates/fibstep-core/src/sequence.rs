use std::iter::FusedIterator;

use crate::stepper::{Overflow, StepState, Term};

/// Iterator over the values a stepper visits, starting with `x`.
///
/// Under [`Overflow::Checked`] the iterator ends after the last value that
/// fits in a [`Term`]. The other policies never end on their own.
#[derive(Debug, Clone)]
pub struct Sequence {
    state: Option<StepState>,
    // Set once the next advance has overflowed; `y` is still a valid value.
    tail: Option<Term>,
    policy: Overflow,
}

impl Sequence {
    pub fn new(start: StepState) -> Self {
        Self::with_policy(start, Overflow::Checked)
    }

    pub fn with_policy(start: StepState, policy: Overflow) -> Self {
        Self {
            state: Some(start),
            tail: None,
            policy,
        }
    }

    /// `F(0), F(1), F(2), ...`
    pub fn fibonacci() -> Self {
        Self::new(StepState::fibonacci())
    }
}

impl Iterator for Sequence {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        let Some(state) = self.state.take() else {
            return self.tail.take();
        };

        match state.advance(self.policy) {
            Some(next) => self.state = Some(next),
            None => self.tail = Some(state.y),
        }

        Some(state.x)
    }
}

impl FusedIterator for Sequence {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::fib;

    #[test]
    fn test_first_twelve() {
        let terms: Vec<Term> = Sequence::fibonacci().take(12).collect();
        assert_eq!(terms, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89]);
    }

    #[test]
    fn test_matches_stepper() {
        let start = StepState::new(2, 7);
        for (i, value) in Sequence::new(start).take(40).enumerate() {
            assert_eq!(value, fib(start.x, start.y, i as i64).unwrap());
        }
    }

    #[test]
    fn test_checked_ends_at_last_representable_term() {
        let terms: Vec<Term> = Sequence::fibonacci().collect();
        assert_eq!(terms.len(), 93);
        assert_eq!(terms.last().copied(), Some(7_540_113_804_746_346_429));
    }

    #[test]
    fn test_fused_after_end() {
        let mut seq = Sequence::new(StepState::new(1, Term::MAX));
        assert_eq!(seq.next(), Some(1));
        assert_eq!(seq.next(), Some(Term::MAX));
        assert_eq!(seq.next(), None);
        assert_eq!(seq.next(), None);
    }

    #[test]
    fn test_saturating_keeps_going() {
        let mut seq = Sequence::with_policy(StepState::fibonacci(), Overflow::Saturating).skip(200);
        assert_eq!(seq.next(), Some(Term::MAX));
        assert_eq!(seq.next(), Some(Term::MAX));
    }
}
