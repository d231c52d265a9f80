//! Author resolution, including pseudonyms.

use crate::error::{ErrorKind, Result};
use crate::record::Authors;
use bibmeta_store::Repository;
use bibmeta_store::models::NameSource;
use exn::ResultExt;
use tracing::instrument;

/// Builds the per-author lists of a work from its author associations.
#[derive(Debug, Clone)]
pub struct AuthorResolver {
    repository: Repository,
}
impl AuthorResolver {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve every author associated with the work `uuid`.
    ///
    /// For each association, in store order:
    /// - through a pseudonym, `author` gets the pseudonym's name and
    ///   `realname` the real author's name;
    /// - otherwise `author` gets the real author's name and `realname` is
    ///   left alone;
    /// - if the real author has an `authors` row, their sex, birth year and
    ///   death year are appended (empty strings for NULLs).
    ///
    /// Missing rows are never padded, so lists can end up misaligned. That
    /// is reported with a warning and left as is.
    #[instrument(skip(self))]
    pub async fn resolve(&self, uuid: &str) -> Result<Authors> {
        let mut authors = Authors::default();
        let associations = self.repository.text_authors(uuid).await.or_raise(|| ErrorKind::Store)?;
        for association in associations {
            let real = match association.author_id {
                Some(id) => self.name(NameSource::Author, id).await?,
                None => String::new(),
            };
            match association.pseudonym() {
                Some(pseudo_id) => {
                    authors.author.push(self.name(NameSource::Pseudonym, pseudo_id).await?);
                    authors.realname.push(real);
                },
                None => authors.author.push(real),
            }
            let Some(author_id) = association.author_id else {
                continue;
            };
            let biography = self.repository.biography(author_id).await.or_raise(|| ErrorKind::Store)?;
            match biography {
                Some(bio) => {
                    authors.author_sex.push(bio.sex.unwrap_or_default());
                    authors.author_birth_year.push(bio.birth_year.unwrap_or_default());
                    authors.author_death_year.push(bio.death_year.unwrap_or_default());
                },
                None => tracing::debug!(author_id, "author has no biographical row"),
            }
        }
        if !authors.is_aligned() {
            tracing::warn!(
                uuid,
                authors = authors.author.len(),
                biographies = authors.author_sex.len(),
                "author and biography lists are misaligned"
            );
        }
        Ok(authors)
    }

    /// Formatted `Last, First Middle` name of an author or pseudonym, or an
    /// empty string when there is no such row.
    pub async fn name(&self, source: NameSource, id: i64) -> Result<String> {
        let row = self.repository.name(source, id).await.or_raise(|| ErrorKind::Store)?;
        Ok(row.map(|name| name.to_string()).unwrap_or_default())
    }
}
