//! Error types for quill

use thiserror::Error;

/// quill error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid construction input: mismatched sample arrays, unsupported
    /// kind/method name, degenerate fit data. Raised synchronously at
    /// construction; never recoverable by retry.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query point outside the fitted interval, raised at evaluation time.
    #[error("Domain error: x must be in [{lo}, {hi}], got {point}")]
    Domain {
        /// The offending query point.
        point: f64,
        /// Lower bound of the fitted interval.
        lo: f64,
        /// Upper bound of the fitted interval.
        hi: f64,
    },

    /// Broken tape invariant (absent or forward operand reference). Can only
    /// arise from an engine bug, never from user input.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
