//! Metadata resolution for corpus text files.
//!
//! A corpus file is identified by its path (e.g. `1890s/vol1.txt`). The
//! [`Resolver`] joins the file's edition with its book, resolves the work's
//! authors through any pseudonyms, and tags the file with a genre from the
//! [`Genres`] table. Files the store doesn't know about still get a record,
//! with years recovered from the filename where possible.

mod authors;
mod consts;
pub mod error;
mod genres;
mod patterns;
mod record;
mod resolver;

pub use crate::authors::AuthorResolver;
pub use crate::consts::{FALLBACK_YEAR_PATTERN, ID_PATTERN};
pub use crate::genres::Genres;
pub use crate::patterns::{FallbackYears, Patterns};
pub use crate::record::{Authors, FIELDS, Field, Record};
pub use crate::resolver::Resolver;
