//! Error types for the Hashi solver core

use thiserror::Error;

/// Failures that can occur while encoding or solving a puzzle.
///
/// An unsatisfiable puzzle is not an error; solving reports it as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashiError {
    /// The caller handed over a puzzle that breaks the input contract
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),

    /// The encoder broke one of its own invariants
    #[error("internal encoding error: {0}")]
    Encoding(String),

    /// The SAT engine failed or was interrupted before reaching a verdict
    #[error("SAT engine failure: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, HashiError>;

/// Shorthand for `return Err(HashiError::Encoding(format!(...)))`
macro_rules! encoding_bail {
    ($($arg:tt)*) => {
        return Err($crate::error::HashiError::Encoding(format!($($arg)*)))
    };
}

pub(crate) use encoding_bail;
