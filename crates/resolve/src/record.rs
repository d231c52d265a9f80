//! The resolved metadata record of a single corpus file.

use bibmeta_store::models::EditionRow;
use std::borrow::Cow;

/// Every field a [`Record`] can carry, in rendering order.
///
/// The order is fixed whichever way a record was resolved, so a record built
/// from filename years renders `year` before `text_year`.
pub const FIELDS: [&str; 17] = [
    "id",
    "author_name",
    "title",
    "booktitle",
    "year",
    "city",
    "publisher",
    "uuid",
    "colophon",
    "sourcetitle",
    "text_year",
    "author",
    "realname",
    "author_sex",
    "author_birth_year",
    "author_death_year",
    "genre",
];

/// A borrowed field value: either a single string or one entry per author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Scalar(&'a str),
    List(&'a [String]),
}
impl<'a> Field<'a> {
    /// Flatten the value, joining list entries with `separator`.
    pub fn join(&self, separator: &str) -> Cow<'a, str> {
        match self {
            Self::Scalar(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(items.join(separator)),
        }
    }
}

/// Per-author lists assembled from a work's author associations.
///
/// `author` has one entry per association. `realname` only gains an entry
/// for associations made through a pseudonym, and the biographical lists
/// only for authors that have an `authors` row, so positions can drift
/// apart; see [`is_aligned`](Self::is_aligned).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authors {
    pub author: Vec<String>,
    pub realname: Vec<String>,
    pub author_sex: Vec<String>,
    pub author_birth_year: Vec<String>,
    pub author_death_year: Vec<String>,
}
impl Authors {
    /// Whether every biographical list lines up with `author`.
    pub fn is_aligned(&self) -> bool {
        let n = self.author.len();
        self.author_sex.len() == n && self.author_birth_year.len() == n && self.author_death_year.len() == n
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_empty()
    }
}

/// Metadata resolved for one corpus file.
///
/// Scalar fields are `None` when nothing supplied them; author lists are
/// empty when the work has no associations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub author_name: Option<String>,
    pub title: Option<String>,
    pub booktitle: Option<String>,
    pub year: Option<String>,
    pub city: Option<String>,
    pub publisher: Option<String>,
    pub uuid: Option<String>,
    pub colophon: Option<String>,
    pub sourcetitle: Option<String>,
    pub text_year: Option<String>,
    pub authors: Authors,
    pub genre: String,
}
impl Record {
    /// Start a record from the edition/book join.
    pub fn from_edition(id: impl Into<String>, edition: EditionRow) -> Self {
        Self {
            id: id.into(),
            author_name: edition.author_name,
            title: edition.title,
            booktitle: edition.booktitle,
            year: edition.year,
            city: edition.city,
            publisher: edition.publisher,
            uuid: edition.uuid,
            colophon: edition.colophon,
            sourcetitle: edition.sourcetitle,
            ..Self::default()
        }
    }

    /// Look up a field by name.
    ///
    /// Returns `None` for unknown names, unset scalars and empty lists.
    pub fn get(&self, name: &str) -> Option<Field<'_>> {
        fn scalar(s: &Option<String>) -> Option<Field<'_>> {
            s.as_deref().map(Field::Scalar)
        }
        fn list(l: &[String]) -> Option<Field<'_>> {
            (!l.is_empty()).then_some(Field::List(l))
        }
        match name {
            "id" => Some(Field::Scalar(&self.id)),
            "author_name" => scalar(&self.author_name),
            "title" => scalar(&self.title),
            "booktitle" => scalar(&self.booktitle),
            "year" => scalar(&self.year),
            "city" => scalar(&self.city),
            "publisher" => scalar(&self.publisher),
            "uuid" => scalar(&self.uuid),
            "colophon" => scalar(&self.colophon),
            "sourcetitle" => scalar(&self.sourcetitle),
            "text_year" => scalar(&self.text_year),
            "author" => list(&self.authors.author),
            "realname" => list(&self.authors.realname),
            "author_sex" => list(&self.authors.author_sex),
            "author_birth_year" => list(&self.authors.author_birth_year),
            "author_death_year" => list(&self.authors.author_death_year),
            "genre" => Some(Field::Scalar(&self.genre)),
            _ => None,
        }
    }

    /// Every populated field, in [`FIELDS`] order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Field<'_>)> {
        FIELDS.into_iter().filter_map(move |name| self.get(name).map(|field| (name, field)))
    }
}
