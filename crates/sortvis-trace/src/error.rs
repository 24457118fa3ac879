//! Error types for sortvis-trace.

use thiserror::Error;

/// Result type for sortvis-trace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the input boundary. Generators themselves never fail.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A value cannot be ordered (NaN or infinite).
    #[error("value at index {index} is not a finite number: {value}")]
    InvalidValue { index: usize, value: f64 },

    /// More values than a trace is generated for.
    #[error("input has {len} values, at most {max} are accepted")]
    TooLong { len: usize, max: usize },

    /// A token in a textual value list is not a number.
    #[error("cannot parse {token:?} as a number")]
    Parse { token: String },

    /// No generator is registered under this name.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}
