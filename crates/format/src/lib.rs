//! Renderings of resolved metadata.
//!
//! - [`format_header`]: a single `<doc ...>` tag, for prefixing a text.
//! - [`export`]: a CSV table of every file in the store.

pub mod error;
mod export;
mod header;

pub use crate::export::{COLUMNS, CSV_LIST_SEPARATOR, CsvExporter, csv_row, export};
pub use crate::header::{HEADER_LIST_SEPARATOR, escape, format_header};
