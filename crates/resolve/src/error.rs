//! Resolution Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A resolution error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The genre table could not be opened or read.
    #[display("could not read genre file: {}", _0.display())]
    GenreFile(#[error(not(source))] PathBuf),
    /// A genre table row does not have the three required columns.
    #[display("genre file row {_0} needs three columns")]
    GenreRow(#[error(not(source))] u64),
    /// The filename does not carry an identifier in the expected place.
    #[display("cannot derive an identifier from filename: {_0}")]
    IdExtraction(#[error(not(source))] String),
    /// A configured filename pattern is not a valid regular expression, or
    /// lacks the capture groups resolution depends on.
    #[display("invalid {_0} pattern")]
    Pattern(#[error(not(source))] &'static str),
    /// The bibliography store failed underneath the resolver.
    #[display("bibliography store error")]
    Store,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Resolution is deterministic over a read-only store.
        false
    }
}
