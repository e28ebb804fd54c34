//! Append-only result writer for the output table.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::years::YearRange;

use super::TableError;

/// One journal's complete result: one count per year, in increasing year order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRow {
    pub journal: String,
    pub counts: Vec<u64>,
}

impl JournalRow {
    #[must_use]
    pub fn new(journal: impl Into<String>, counts: Vec<u64>) -> Self {
        Self {
            journal: journal.into(),
            counts,
        }
    }

    fn fields(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.journal.clone()).chain(self.counts.iter().map(u64::to_string))
    }
}

/// Appends [`JournalRow`]s to the output table.
///
/// The file is reopened in append mode for every row and each row (plus the
/// header, when the file is new) goes out in a single write, so an interrupted
/// run leaves only complete rows behind.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    path: PathBuf,
    years: YearRange,
}

impl ResultWriter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, years: YearRange) -> Self {
        Self {
            path: path.into(),
            years,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, writing the `journal,<year>...` header first if the
    /// table does not exist yet or is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowLength`] when the row does not hold exactly one
    /// count per year, or an IO/CSV error when the append fails.
    pub fn append(&self, row: &JournalRow) -> Result<(), TableError> {
        if row.counts.len() != self.years.len() {
            return Err(TableError::RowLength {
                journal: row.journal.clone(),
                expected: self.years.len(),
                actual: row.counts.len(),
            });
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == ErrorKind::NotFound => true,
            Err(err) => return Err(TableError::io(&self.path, &err)),
        };

        let bytes = self.encode(row, needs_header)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| TableError::io(&self.path, &err))?;
        file.write_all(&bytes)
            .map_err(|err| TableError::io(&self.path, &err))?;

        if needs_header {
            debug!(path = %self.path.display(), years = %self.years, "Wrote output header");
        }
        info!(journal = %row.journal, path = %self.path.display(), "Appended journal row");
        Ok(())
    }

    fn encode(&self, row: &JournalRow, with_header: bool) -> Result<Vec<u8>, TableError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        if with_header {
            wtr.write_record(self.years.header())
                .map_err(|err| TableError::csv(&self.path, &err))?;
        }
        wtr.write_record(row.fields())
            .map_err(|err| TableError::csv(&self.path, &err))?;

        wtr.into_inner().map_err(|err| TableError::Io {
            path: self.path.display().to_string(),
            message: err.error().to_string(),
        })
    }
}

/// Deletes the output table if it exists. Returns whether a file was removed.
///
/// # Errors
///
/// Returns [`TableError::Io`] when an existing file cannot be removed.
pub fn remove_output(path: &Path) -> Result<bool, TableError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Removed existing output table");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(TableError::io(path, &err)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn range(start: u16, end: u16) -> YearRange {
        YearRange::new(start, end).unwrap()
    }

    #[test]
    fn test_first_append_writes_header_then_row() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal_counts.csv");
        let writer = ResultWriter::new(&path, range(2020, 2021));

        writer.append(&JournalRow::new("Nature", vec![5, 7])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "journal,2020,2021\r\nNature,5,7\r\n");
    }

    #[test]
    fn test_header_written_once_across_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal_counts.csv");
        let writer = ResultWriter::new(&path, range(2020, 2021));

        writer.append(&JournalRow::new("Cell", vec![1, 2])).unwrap();
        writer.append(&JournalRow::new("Lancet", vec![3, 4])).unwrap();
        ResultWriter::new(&path, range(2020, 2021))
            .append(&JournalRow::new("Nature", vec![5, 6]))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("journal,").count(), 1);
        assert_eq!(
            text,
            "journal,2020,2021\r\nCell,1,2\r\nLancet,3,4\r\nNature,5,6\r\n"
        );
    }

    #[test]
    fn test_empty_existing_file_gets_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal_counts.csv");
        fs::write(&path, "").unwrap();

        ResultWriter::new(&path, range(2021, 2021))
            .append(&JournalRow::new("BMJ", vec![9]))
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "journal,2021\r\nBMJ,9\r\n");
    }

    #[test]
    fn test_journal_names_with_commas_are_quoted() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal_counts.csv");
        ResultWriter::new(&path, range(2021, 2021))
            .append(&JournalRow::new("Acta, Series B", vec![0]))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("\"Acta, Series B\",0\r\n"), "got: {text:?}");
    }

    #[test]
    fn test_row_with_wrong_count_length_is_rejected_without_writing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal_counts.csv");
        let writer = ResultWriter::new(&path, range(2019, 2021));

        let err = writer.append(&JournalRow::new("Cell", vec![1, 2])).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowLength {
                expected: 3,
                actual: 2,
                ..
            }
        ));
        assert!(!path.exists(), "rejected row must not create the table");
    }

    #[test]
    fn test_remove_output_reports_whether_file_existed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal_counts.csv");
        assert!(!remove_output(&path).unwrap());
        fs::write(&path, "journal\r\n").unwrap();
        assert!(remove_output(&path).unwrap());
        assert!(!path.exists());
    }
}
