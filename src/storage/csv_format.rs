//! CSV flat-file format: one record per line, fields in declaration order,
//! no header and no quoting. A field that itself contains a comma corrupts
//! its line, which the next load then skips; this is an accepted limitation
//! of the format, not something the writer tries to repair.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use log::warn;

use crate::error::Result;
use crate::storage::file::{FileFormat, FileRecord};

pub struct CsvFormat;

impl<E: FileRecord> FileFormat<E> for CsvFormat {
    fn load(&self, path: &Path) -> Result<Vec<E>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut entities = Vec::new();
        for record in reader.records() {
            let fields: Vec<String> = match record {
                Ok(record) => record.iter().map(str::to_string).collect(),
                Err(err) => {
                    warn!("skipping unreadable line in {}: {}", path.display(), err);
                    continue;
                }
            };
            match E::from_fields(&fields) {
                Ok(entity) => entities.push(entity),
                Err(err) => {
                    warn!("skipping malformed record in {}: {}", path.display(), err);
                }
            }
        }
        Ok(entities)
    }

    fn store(&self, path: &Path, entities: &[E]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_path(path)?;

        for entity in entities {
            writer.write_record(entity.to_fields())?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::models::Book;

    #[test]
    fn writes_bare_lines_in_field_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let books = vec![Book::new(4, "Dune", "Frank Herbert", "Chilton", 1965, 31.99)];
        FileFormat::store(&CsvFormat, &path, &books).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "4,Dune,Frank Herbert,Chilton,1965,31.99\n");
    }

    #[test]
    fn embedded_commas_are_not_escaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let books = vec![Book::new(1, "Dune, Part Two", "Frank Herbert", "Chilton", 1965, 9.5)];
        FileFormat::store(&CsvFormat, &path, &books).unwrap();

        // The comma lands in the file verbatim, so the reload sees seven
        // fields and drops the record.
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("1,Dune, Part Two,"));
        let reloaded: Vec<Book> = FileFormat::load(&CsvFormat, &path).unwrap();
        assert!(reloaded.is_empty());
    }
}
