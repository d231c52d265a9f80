//! Format Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A formatting/export error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for formatting and export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A CSV row could not be written.
    #[display("could not write CSV row {_0}")]
    Csv(#[error(not(source))] u64),
    /// The output could not be flushed.
    #[display("could not flush output")]
    Io,
    /// A record could not be resolved; the export stops at the first one.
    #[display("could not resolve metadata for {_0}")]
    Resolve(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
