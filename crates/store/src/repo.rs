//! Queries against the bibliography tables.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{BiographyRow, EditionRow, NameRow, NameSource, TextAuthorRow};
use exn::ResultExt;
use sqlx::SqlitePool;
use tracing::instrument;

/// Read-only repository over editions, books, authors and pseudonyms.
///
/// Every method runs a single parameterised statement. Failures are never
/// retried; a failed query is a fatal [`ErrorKind::Query`].
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Filenames of every edition that has one (neither NULL nor empty), in
    /// table order.
    pub async fn filenames(&self) -> Result<Vec<String>> {
        sqlx::query_scalar(include_str!("../queries/filenames.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query("filenames"))
    }

    /// The edition stored under `filename`, joined with its book.
    ///
    /// Should the join produce several rows, the last one wins.
    #[instrument(skip(self))]
    pub async fn edition_for_file(&self, filename: &str) -> Result<Option<EditionRow>> {
        let mut rows: Vec<EditionRow> = sqlx::query_as(include_str!("../queries/edition_for_file.sql"))
            .bind(filename)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query("edition for file"))?;
        if rows.len() > 1 {
            tracing::debug!(rows = rows.len(), "filename matches several editions, keeping the last");
        }
        Ok(rows.pop())
    }

    /// Earliest edition year recorded for the work, if any edition has a year.
    #[instrument(skip(self))]
    pub async fn first_print_year(&self, uuid: &str) -> Result<Option<String>> {
        sqlx::query_scalar(include_str!("../queries/first_print_year.sql"))
            .bind(uuid)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query("first print year"))
    }

    /// Author associations of the work, in table order.
    #[instrument(skip(self))]
    pub async fn text_authors(&self, uuid: &str) -> Result<Vec<TextAuthorRow>> {
        sqlx::query_as(include_str!("../queries/text_authors.sql"))
            .bind(uuid)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query("text authors"))
    }

    /// Name parts of an author or pseudonym.
    pub async fn name(&self, source: NameSource, id: i64) -> Result<Option<NameRow>> {
        sqlx::query_as(source.query())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query("name"))
    }

    /// Sex, birth year and death year of an author.
    pub async fn biography(&self, author_id: i64) -> Result<Option<BiographyRow>> {
        sqlx::query_as(include_str!("../queries/biography.sql"))
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query("biography"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use rstest::rstest;

    async fn sample() -> (Database, Repository) {
        let db = fixture::sample().await.unwrap();
        let repo = Repository::from(&db);
        (db, repo)
    }

    #[tokio::test]
    async fn test_filenames_skip_null_and_empty() {
        let (db, repo) = sample().await;
        let filenames = repo.filenames().await.unwrap();
        assert_eq!(filenames, vec!["1890s/vol1.txt", "1900s/tales.txt", "1900s/orphan.txt", "1910s/duo.txt"]);
        db.close().await;
    }

    #[tokio::test]
    async fn test_edition_for_file() {
        let (db, repo) = sample().await;
        let edition = repo.edition_for_file("1890s/vol1.txt").await.unwrap().unwrap();
        assert_eq!(edition.title.as_deref(), Some("Vol One"));
        assert_eq!(edition.year.as_deref(), Some("1923"));
        assert_eq!(edition.city.as_deref(), Some("Leipzig"));
        assert_eq!(edition.uuid.as_deref(), Some("uuid-a"));
        assert_eq!(edition.colophon.as_deref(), Some("Colophon A"));
        db.close().await;
    }

    #[tokio::test]
    async fn test_edition_for_unknown_file() {
        let (db, repo) = sample().await;
        assert_eq!(repo.edition_for_file("1890s/missing.txt").await.unwrap(), None);
        db.close().await;
    }

    #[tokio::test]
    async fn test_edition_last_row_wins() {
        let db = fixture::seeded(
            r#"
            INSERT INTO books (book_id, title, uuid) VALUES (1, 'First', 'u1'), (2, 'Second', 'u2');
            INSERT INTO editions (filename, book_id, year) VALUES ('1900s/dup.txt', 1, 1900), ('1900s/dup.txt', 2, 1901);
            "#,
        )
        .await
        .unwrap();
        let repo = Repository::from(&db);
        let edition = repo.edition_for_file("1900s/dup.txt").await.unwrap().unwrap();
        assert_eq!(edition.title.as_deref(), Some("Second"));
        db.close().await;
    }

    #[rstest]
    #[case("uuid-a", Some("1899"))]
    #[case("uuid-b", Some("1905"))]
    #[case("uuid-unknown", None)]
    #[tokio::test]
    async fn test_first_print_year(#[case] uuid: &str, #[case] expected: Option<&str>) {
        let (db, repo) = sample().await;
        let year = repo.first_print_year(uuid).await.unwrap();
        assert_eq!(year.as_deref(), expected);
        db.close().await;
    }

    #[tokio::test]
    async fn test_text_authors_in_table_order() {
        let (db, repo) = sample().await;
        let rows = repo.text_authors("uuid-b").await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| (r.author_id, r.pseudonym())).collect();
        assert_eq!(ids, vec![(Some(2), Some(1)), (Some(1), None), (Some(9), None)]);
        db.close().await;
    }

    #[tokio::test]
    async fn test_text_authors_treat_empty_ids_as_null() {
        let db = fixture::seeded(
            r#"
            INSERT INTO text_author (uuid, author_id, pseudo_id) VALUES ('u', 1, ''), ('u', '', 1);
            "#,
        )
        .await
        .unwrap();
        let repo = Repository::from(&db);
        let rows = repo.text_authors("u").await.unwrap();
        assert_eq!(rows[0], TextAuthorRow { author_id: Some(1), pseudo_id: None });
        assert_eq!(rows[1], TextAuthorRow { author_id: None, pseudo_id: Some(1) });
        db.close().await;
    }

    #[rstest]
    #[case(NameSource::Author, 2, Some("Roe, Richard "))]
    #[case(NameSource::Pseudonym, 1, Some("Smith, John "))]
    #[case(NameSource::Author, 9, None)]
    #[case(NameSource::Pseudonym, 2, None)]
    #[tokio::test]
    async fn test_name(#[case] source: NameSource, #[case] id: i64, #[case] expected: Option<&str>) {
        let (db, repo) = sample().await;
        let name = repo.name(source, id).await.unwrap().map(|n| n.to_string());
        assert_eq!(name.as_deref(), expected);
        db.close().await;
    }

    #[tokio::test]
    async fn test_biography() {
        let (db, repo) = sample().await;
        let bio = repo.biography(1).await.unwrap().unwrap();
        assert_eq!(bio.sex.as_deref(), Some("F"));
        assert_eq!(bio.birth_year.as_deref(), Some("1850"));
        assert_eq!(bio.death_year.as_deref(), Some("1920"));
        assert_eq!(repo.biography(9).await.unwrap(), None);
        db.close().await;
    }

    #[tokio::test]
    async fn test_query_on_closed_database_fails() {
        let (db, repo) = sample().await;
        db.close().await;
        let err = repo.filenames().await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Query("filenames")));
    }
}
