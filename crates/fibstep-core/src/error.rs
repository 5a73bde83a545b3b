use thiserror::Error;

use crate::stepper::Term;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Overflow: {x} + {y} does not fit in i64 with {remaining} step(s) remaining")]
    Overflow { x: Term, y: Term, remaining: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
