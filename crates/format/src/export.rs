//! Bulk CSV export.

use crate::error::{ErrorKind, Result};
use bibmeta_resolve::{Record, Resolver};
use exn::ResultExt;
use std::borrow::Cow;
use std::io::Write;
use tracing::instrument;

/// Header row of the export, in column order.
pub const COLUMNS: [&str; 17] = [
    "id",
    "year",
    "text_year",
    "genre",
    "publisher",
    "author_name",
    "booktitle",
    "city",
    "author_sex",
    "author_death_year",
    "uuid",
    "title",
    "author",
    "author_birth_year",
    "realname",
    "colophon",
    "sourcetitle",
];

/// Separator between list entries in a CSV cell.
pub const CSV_LIST_SEPARATOR: &str = ";";

/// Flatten a record into [`COLUMNS`] order.
///
/// List entries are joined with `;` without escaping; fields the record
/// doesn't have are left blank.
pub fn csv_row(record: &Record) -> Vec<Cow<'_, str>> {
    COLUMNS
        .into_iter()
        .map(|column| record.get(column).map(|field| field.join(CSV_LIST_SEPARATOR)).unwrap_or_default())
        .collect()
}

/// Writes records as CSV rows under the fixed [`COLUMNS`] header.
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}
impl<W: Write> CsvExporter<W> {
    /// Wrap `writer` and emit the header row.
    pub fn new(writer: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().terminator(csv::Terminator::CRLF).from_writer(writer);
        writer.write_record(COLUMNS).or_raise(|| ErrorKind::Csv(0))?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, record: &Record) -> Result<()> {
        let row = csv_row(record);
        self.writer.write_record(row.iter().map(|cell| cell.as_bytes())).or_raise(|| ErrorKind::Csv(self.rows + 1))?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush everything and return the inner writer.
    pub fn finish(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error()).or_raise(|| ErrorKind::Io)
    }
}

/// Resolve every filename in the store and write one CSV row per file.
///
/// Returns the number of rows written. The first file that fails to resolve
/// aborts the export; rows already written stay in `writer`.
#[instrument(skip_all)]
pub async fn export<W: Write>(resolver: &Resolver, writer: W) -> Result<u64> {
    let filenames = resolver.filenames().await.or_raise(|| ErrorKind::Resolve("filename list".to_string()))?;
    tracing::info!(files = filenames.len(), "exporting metadata");
    let mut exporter = CsvExporter::new(writer)?;
    for filename in &filenames {
        let record = resolver.resolve(filename).await.or_raise(|| ErrorKind::Resolve(filename.clone()))?;
        exporter.write(&record)?;
    }
    let rows = exporter.rows();
    exporter.finish()?;
    tracing::info!(rows, "export finished");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibmeta_resolve::{Authors, Genres, Patterns};
    use bibmeta_store::{Repository, fixture};

    const HEADER: &str = "id,year,text_year,genre,publisher,author_name,booktitle,city,author_sex,author_death_year,uuid,title,author,author_birth_year,realname,colophon,sourcetitle\r\n";

    #[test]
    fn test_csv_row_blanks_missing_fields() {
        let record = Record {
            id: "vol1.txt".into(),
            text_year: Some("1887".into()),
            year: Some("1901".into()),
            ..Record::default()
        };
        let row = csv_row(&record);
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "vol1.txt");
        assert_eq!(row[1], "1901");
        assert_eq!(row[2], "1887");
        assert!(row[3..].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_csv_row_joins_lists_with_semicolon() {
        let record = Record {
            id: "duo.txt".into(),
            authors: Authors {
                author: vec!["Roe, Richard ".into(), "Doe, Jane ".into()],
                author_sex: vec!["M".into(), "F".into()],
                ..Authors::default()
            },
            ..Record::default()
        };
        let row = csv_row(&record);
        assert_eq!(row[12], "Roe, Richard ;Doe, Jane ");
        assert_eq!(row[8], "M;F");
        assert_eq!(row[14], "");
    }

    #[test]
    fn test_exporter_writes_header_and_quotes() {
        let mut exporter = CsvExporter::new(Vec::new()).unwrap();
        let record = Record { id: "a.txt".into(), title: Some("Hello, \"World\"".into()), ..Record::default() };
        exporter.write(&record).unwrap();
        assert_eq!(exporter.rows(), 1);
        let output = String::from_utf8(exporter.finish().unwrap()).unwrap();
        assert!(output.starts_with(HEADER));
        assert_eq!(&output[HEADER.len()..], "a.txt,,,,,,,,,,,\"Hello, \"\"World\"\"\",,,,,\r\n");
    }

    #[test]
    fn test_rows_end_with_crlf() {
        let mut exporter = CsvExporter::new(Vec::new()).unwrap();
        exporter.write(&Record { id: "a.txt".into(), ..Record::default() }).unwrap();
        exporter.write(&Record { id: "b.txt".into(), ..Record::default() }).unwrap();
        let output = String::from_utf8(exporter.finish().unwrap()).unwrap();
        assert_eq!(output.matches("\r\n").count(), 3);
        assert_eq!(output.matches('\n').count(), 3);
    }

    #[tokio::test]
    async fn test_export_writes_one_row_per_filename() {
        let db = fixture::sample().await.unwrap();
        let genres: Genres = [("1890s/vol1.txt", "Poetry")].into_iter().collect();
        let resolver = Resolver::new(Repository::from(&db), genres, Patterns::default());
        let mut output = Vec::new();
        let rows = export(&resolver, &mut output).await.unwrap();
        assert_eq!(rows, 4);

        let mut reader = csv::Reader::from_reader(output.as_slice());
        assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), COLUMNS);
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>().unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.len() == COLUMNS.len()));
        let ids = records.iter().map(|r| r[0].to_string()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["vol1.txt", "tales.txt", "orphan.txt", "duo.txt"]);
        // vol1: year, first print, genre.
        assert_eq!(&records[0][1], "1923");
        assert_eq!(&records[0][2], "1899");
        assert_eq!(&records[0][3], "Poetry");
        // tales: pseudonym and real name.
        assert_eq!(&records[1][12], "Smith, John ;Doe, Jane ;");
        assert_eq!(&records[1][14], "Roe, Richard ");
        db.close().await;
    }

    #[tokio::test]
    async fn test_export_aborts_on_unresolvable_filename() {
        let db = fixture::seeded(
            r#"
            INSERT INTO books (book_id, title, uuid) VALUES (1, 'Fine', 'u1'), (2, 'Broken', 'u2');
            INSERT INTO editions (filename, book_id, year) VALUES ('1900s/fine.txt', 1, 1900), ('no-decade.txt', 2, 1901);
            "#,
        )
        .await
        .unwrap();
        let resolver = Resolver::new(Repository::from(&db), Genres::default(), Patterns::default());
        let err = export(&resolver, Vec::new()).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Resolve("no-decade.txt".to_string()));
        db.close().await;
    }
}
