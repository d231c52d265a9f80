use crate::authors::AuthorResolver;
use crate::error::{ErrorKind, Result};
use crate::genres::Genres;
use crate::patterns::Patterns;
use crate::record::Record;
use bibmeta_store::Repository;
use exn::ResultExt;
use tracing::instrument;

/// Resolves the full metadata record of corpus files.
///
/// Holds the repository, the genre table and the filename patterns; all of
/// them are read-only, so one resolver serves any number of files.
#[derive(Debug, Clone)]
pub struct Resolver {
    repository: Repository,
    authors: AuthorResolver,
    genres: Genres,
    patterns: Patterns,
}
impl Resolver {
    pub fn new(repository: Repository, genres: Genres, patterns: Patterns) -> Self {
        let authors = AuthorResolver::new(repository.clone());
        Self { repository, authors, genres, patterns }
    }

    pub fn genres(&self) -> &Genres {
        &self.genres
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// Every filename known to the store, in store order.
    pub async fn filenames(&self) -> Result<Vec<String>> {
        self.repository.filenames().await.or_raise(|| ErrorKind::Store)
    }

    /// Resolve the metadata of one corpus file.
    ///
    /// 1. The identifier is taken from the filename; a filename without one
    ///    fails with [`ErrorKind::IdExtraction`].
    /// 2. When the store links the filename to an edition, its edition and
    ///    book columns are copied over. If the book has a work identifier,
    ///    `text_year` becomes the work's first-print year and the author
    ///    lists are resolved.
    /// 3. When no edition is linked, `text_year` and `year` are recovered
    ///    from the filename, if it carries them.
    /// 4. The genre is looked up by the filename as given.
    #[instrument(skip(self))]
    pub async fn resolve(&self, filename: &str) -> Result<Record> {
        let id = self.patterns.id(filename)?;
        let edition = self.repository.edition_for_file(filename).await.or_raise(|| ErrorKind::Store)?;
        let mut record = match edition {
            Some(edition) => {
                let mut record = Record::from_edition(id, edition);
                if let Some(uuid) = record.uuid.clone() {
                    record.text_year =
                        self.repository.first_print_year(&uuid).await.or_raise(|| ErrorKind::Store)?;
                    record.authors = self.authors.resolve(&uuid).await?;
                }
                record
            },
            None => {
                tracing::debug!("no edition linked to filename, using filename years");
                let mut record = Record { id, ..Record::default() };
                if let Some(years) = self.patterns.fallback_years(filename) {
                    record.text_year = Some(years.text_year);
                    record.year = Some(years.year);
                }
                record
            },
        };
        record.genre = self.genres.lookup(filename).to_string();
        Ok(record)
    }
}
