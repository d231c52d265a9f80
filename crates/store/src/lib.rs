//! Read-only access to the bibliography database.
//!
//! The database is the source of truth for editions, books, authors and
//! pseudonyms; this crate never writes to it. Connections are opened in
//! read-only mode and must be released explicitly with [`Database::close`].
//!
//! # Tables
//! - **editions**: one row per printing, linking a corpus `filename` to a book.
//! - **books**: the work a printing belongs to, grouped by `uuid`.
//! - **text_author**: associates a work `uuid` with authors, optionally
//!   through a pseudonym.
//! - **authors** / **pseudonyms**: name parts, plus biographical data for
//!   real authors.

mod db;
pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
pub mod models;
mod repo;

pub use crate::db::Database;
pub use crate::repo::Repository;
