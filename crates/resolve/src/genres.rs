//! Genre lookup table.
//!
//! The genre file is a headerless, three-column CSV: `category`,
//! `subcategory` and a human-readable genre label. Entries are keyed by
//! `category/subcategory`, which is matched against corpus filenames as-is.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Genre labels keyed by `category/subcategory`.
///
/// Blank lines in the file are skipped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genres {
    map: HashMap<String, String>,
}
impl Genres {
    /// Load the genre table from a file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = Self::builder().from_path(path).or_raise(|| ErrorKind::GenreFile(path.to_path_buf()))?;
        let genres = Self::from_csv(reader, path)?;
        tracing::debug!(entries = genres.len(), "genre table loaded");
        Ok(genres)
    }

    /// Load the genre table from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_csv(Self::builder().from_reader(reader), Path::new("<reader>"))
    }

    fn builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(false).flexible(true);
        builder
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Self> {
        let mut map = HashMap::new();
        for record in reader.records() {
            let record = record.or_raise(|| ErrorKind::GenreFile(PathBuf::from(origin)))?;
            let (Some(category), Some(subcategory), Some(genre)) = (record.get(0), record.get(1), record.get(2))
            else {
                let line = record.position().map_or(0, |p| p.line());
                exn::bail!(ErrorKind::GenreRow(line));
            };
            // Later rows replace earlier ones with the same key.
            map.insert(format!("{category}/{subcategory}"), genre.to_string());
        }
        Ok(Self { map })
    }

    /// The genre label for `filename`, or an empty string when it has none.
    pub fn lookup(&self, filename: &str) -> &str {
        self.map.get(filename).map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Genres {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
