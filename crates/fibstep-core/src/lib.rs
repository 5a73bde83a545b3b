//! Core types for fibstep.
//!
//! This crate holds the pure parts of the system: the Fibonacci stepper and
//! its overflow policies, the sequence iterator, the step-trace records, and
//! the line protocol used to carry those records through text output.

pub mod error;
pub mod ipc;
pub mod sequence;
pub mod stepper;
pub mod trace;

pub use error::{Error, Result};
pub use sequence::Sequence;
pub use stepper::{
    fib, fib_saturating, fib_traced, fib_with, fib_wrapping, Overflow, StepState, Term,
};
