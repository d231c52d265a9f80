//! Row types returned by [`Repository`](crate::Repository).
//!
//! Numeric columns (years, sex codes) are cast to text in the queries, so
//! every value surfaces as an optional string exactly as stored.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// An edition joined with the book it prints.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct EditionRow {
    pub author_name: Option<String>,
    pub title: Option<String>,
    pub booktitle: Option<String>,
    pub year: Option<String>,
    pub city: Option<String>,
    pub publisher: Option<String>,
    /// Work identifier shared by every printing of the same text.
    pub uuid: Option<String>,
    pub colophon: Option<String>,
    pub sourcetitle: Option<String>,
}

/// One author association of a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct TextAuthorRow {
    pub author_id: Option<i64>,
    pub pseudo_id: Option<i64>,
}
impl TextAuthorRow {
    /// The pseudonym the author published this work under, if any.
    ///
    /// A zero identifier means "no pseudonym".
    pub fn pseudonym(&self) -> Option<i64> {
        self.pseudo_id.filter(|id| *id != 0)
    }
}

/// Which table a name is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Author,
    Pseudonym,
}
impl NameSource {
    pub(crate) fn query(&self) -> &'static str {
        match self {
            Self::Author => include_str!("../queries/author_name.sql"),
            Self::Pseudonym => include_str!("../queries/pseudonym_name.sql"),
        }
    }
}

/// Name parts shared by the `authors` and `pseudonyms` tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct NameRow {
    pub last: Option<String>,
    pub first: Option<String>,
    pub middle: Option<String>,
}

/// Formats as `Last, First Middle`; missing parts are left blank.
impl Display for NameRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let last = self.last.as_deref().unwrap_or_default();
        let first = self.first.as_deref().unwrap_or_default();
        let middle = self.middle.as_deref().unwrap_or_default();
        write!(f, "{last}, {first} {middle}")
    }
}

/// Biographical columns of the `authors` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct BiographyRow {
    pub sex: Option<String>,
    pub birth_year: Option<String>,
    pub death_year: Option<String>,
}
