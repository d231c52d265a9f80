//! In-memory bibliography databases for tests.
//!
//! Enabled by the `fixture` feature so that downstream crates can seed a
//! store in their own tests.

use exn::ResultExt;

use crate::Database;
use crate::error::{ErrorKind, Result};

/// Schema of the tables the repository reads from.
pub const SCHEMA: &str = include_str!("../fixtures/schema.sql");

/// A small library covering the interesting resolution paths:
///
/// - `1890s/vol1.txt`: single author, work printed in 1923, 1899 and 1950.
/// - `1900s/tales.txt`: a pseudonym, a zero pseudonym id, and an author
///   with no `authors` row.
/// - `1900s/orphan.txt`: a book without a work identifier.
/// - `1910s/duo.txt`: two authors, no pseudonyms.
///
/// One edition has a NULL filename and another an empty one.
pub const SAMPLE: &str = r#"
INSERT INTO books (book_id, author_name, title, booktitle, uuid, colophon, sourcetitle) VALUES
    (1, 'Doe, Jane', 'Vol One', 'Collected Works', 'uuid-a', 'Colophon A', 'Source A'),
    (2, 'Doe, Jane', 'Vol One', 'Collected Works', 'uuid-a', NULL, NULL),
    (3, 'Roe & Co', 'Shared <Tales>', 'Tales', 'uuid-b', NULL, 'Source "B"'),
    (4, NULL, 'Orphan', NULL, NULL, NULL, NULL),
    (5, 'Roe, Richard; Doe, Jane', 'Duet', 'Duets', 'uuid-c', NULL, NULL);

INSERT INTO editions (filename, book_id, year, city, publisher) VALUES
    ('1890s/vol1.txt', 1, 1923, 'Leipzig', 'Insel'),
    (NULL, 2, 1899, 'Berlin', 'Fischer'),
    ('', 2, 1950, 'Wien', 'Zsolnay'),
    ('1900s/tales.txt', 3, 1905, 'Bern', 'Francke'),
    ('1900s/orphan.txt', 4, NULL, NULL, NULL),
    ('1910s/duo.txt', 5, 1912, 'Zürich', 'Rascher');

INSERT INTO authors (author_id, last, first, middle, sex, birth_year, death_year) VALUES
    (1, 'Doe', 'Jane', '', 'F', 1850, 1920),
    (2, 'Roe', 'Richard', '', 'M', 1840, 1910);

INSERT INTO pseudonyms (pseudo_id, last, first, middle) VALUES
    (1, 'Smith', 'John', '');

INSERT INTO text_author (uuid, author_id, pseudo_id) VALUES
    ('uuid-a', 1, NULL),
    ('uuid-b', 2, 1),
    ('uuid-b', 1, 0),
    ('uuid-b', 9, NULL),
    ('uuid-c', 2, NULL),
    ('uuid-c', 1, NULL);
"#;

/// Create an in-memory database with [`SCHEMA`] applied, then run `statements`.
pub async fn seeded(statements: &str) -> Result<Database> {
    let db = Database::connect_in_memory().await?;
    sqlx::raw_sql(SCHEMA).execute(db.pool()).await.or_raise(|| ErrorKind::Query("schema"))?;
    sqlx::raw_sql(statements).execute(db.pool()).await.or_raise(|| ErrorKind::Query("seed"))?;
    Ok(db)
}

/// An in-memory database loaded with [`SAMPLE`].
pub async fn sample() -> Result<Database> {
    seeded(SAMPLE).await
}
