//! Driver and step-trace runtime for fibstep.
//!
//! This crate provides:
//! - The driver that prints the leading terms of a sequence
//! - Pluggable subscribers that receive every stepper advance

pub mod driver;
pub mod subscriber;

pub use driver::{Driver, DriverConfig, RunSummary};
pub use subscriber::{CollectingSubscriber, JsonSubscriber, NoOpSubscriber, Subscriber};
