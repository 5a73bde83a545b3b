//! The Fibonacci stepper.
//!
//! A stepper advances a pair of consecutive values `(x, y)` to `(y, x + y)`
//! a given number of times and returns the first element of the final pair.
//! Starting from `(0, 1)` and stepping `n` times yields `F(n)`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer type of every value the stepper produces.
pub type Term = i64;

/// What to do when `x + y` does not fit in a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Report the overflow as [`Error::Overflow`].
    #[default]
    Checked,
    /// Two's-complement wraparound.
    Wrapping,
    /// Clamp to `Term::MIN` / `Term::MAX`.
    Saturating,
}

impl Overflow {
    /// Add two terms under this policy. Returns `None` only for `Checked`.
    pub fn add(self, a: Term, b: Term) -> Option<Term> {
        match self {
            Overflow::Checked => a.checked_add(b),
            Overflow::Wrapping => Some(a.wrapping_add(b)),
            Overflow::Saturating => Some(a.saturating_add(b)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Overflow::Checked => "checked",
            Overflow::Wrapping => "wrapping",
            Overflow::Saturating => "saturating",
        }
    }
}

/// Two consecutive values of the sequence: `x` is current, `y` is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub x: Term,
    pub y: Term,
}

impl StepState {
    pub const fn new(x: Term, y: Term) -> Self {
        Self { x, y }
    }

    /// The standard seed `(0, 1)`.
    pub const fn fibonacci() -> Self {
        Self::new(0, 1)
    }

    /// Move one step forward: `(x, y) -> (y, x + y)`.
    pub fn advance(self, policy: Overflow) -> Option<Self> {
        policy.add(self.x, self.y).map(|z| Self::new(self.y, z))
    }
}

impl Default for StepState {
    fn default() -> Self {
        Self::fibonacci()
    }
}

/// Value `n` steps ahead of `x`, with checked arithmetic.
///
/// Any `n <= 0` returns `x` unchanged.
///
/// # Example
/// ```
/// use fibstep_core::fib;
///
/// assert_eq!(fib(0, 1, 10).unwrap(), 55);
/// assert_eq!(fib(7, 9, 0).unwrap(), 7);
/// ```
pub fn fib(x: Term, y: Term, n: i64) -> Result<Term> {
    fib_with(x, y, n, Overflow::Checked)
}

/// Value `n` steps ahead of `x`, under the given overflow policy.
pub fn fib_with(x: Term, y: Term, n: i64, policy: Overflow) -> Result<Term> {
    fib_traced(x, y, n, policy, |_, _| {})
}

pub fn fib_wrapping(x: Term, y: Term, n: i64) -> Term {
    fib_infallible(x, y, n, Term::wrapping_add)
}

pub fn fib_saturating(x: Term, y: Term, n: i64) -> Term {
    fib_infallible(x, y, n, Term::saturating_add)
}

fn fib_infallible(x: Term, y: Term, n: i64, add: fn(Term, Term) -> Term) -> Term {
    if n <= 0 {
        return x;
    }
    let mut state = StepState::new(x, y);
    for _ in 1..n {
        state = StepState::new(state.y, add(state.x, state.y));
    }
    state.y
}

/// Stepper that reports every advance to `observe` before taking it.
///
/// `observe` receives the state and the number of steps still remaining,
/// including the one about to be taken. The final step only promotes `y`,
/// so no sum is computed whose result would be thrown away. Under
/// [`Overflow::Checked`] an error is therefore raised only when the result,
/// or a sum needed to reach it, does not fit in a [`Term`].
pub fn fib_traced<F>(x: Term, y: Term, n: i64, policy: Overflow, mut observe: F) -> Result<Term>
where
    F: FnMut(StepState, i64),
{
    let mut state = StepState::new(x, y);
    let mut remaining = n;

    if remaining <= 0 {
        return Ok(state.x);
    }

    loop {
        observe(state, remaining);
        if remaining == 1 {
            return Ok(state.y);
        }
        state = state.advance(policy).ok_or(Error::Overflow {
            x: state.x,
            y: state.y,
            remaining,
        })?;
        remaining -= 1;
    }
}
