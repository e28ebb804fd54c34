//! Input table loader: distinct journal names in sorted order.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::TableError;

/// Column of the input table holding journal names.
pub const JOURNAL_COLUMN: &str = "TA";

/// Reads the input table and returns its distinct, non-empty journal names
/// in lexicographic order.
///
/// Other columns are ignored. Identical file contents always yield the
/// same sequence.
///
/// # Errors
///
/// Returns [`TableError`] when the file cannot be opened or parsed, or has
/// no `TA` column.
pub fn load_journals(path: &Path) -> Result<Vec<String>, TableError> {
    let file = File::open(path).map_err(|err| TableError::io(path, &err))?;
    let journals = read_journals(file, path)?;
    info!(path = %path.display(), journals = journals.len(), "Loaded input journals");
    Ok(journals)
}

fn read_journals<R: Read>(reader: R, path: &Path) -> Result<Vec<String>, TableError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().map_err(|err| TableError::csv(path, &err))?;
    let Some(column) = headers.iter().position(|name| name == JOURNAL_COLUMN) else {
        return Err(TableError::missing_column(path, JOURNAL_COLUMN));
    };

    let mut journals = BTreeSet::new();
    let mut rows = 0usize;
    for record in rdr.records() {
        let record = record.map_err(|err| TableError::csv(path, &err))?;
        rows += 1;
        match record.get(column) {
            Some(name) if !name.is_empty() => {
                journals.insert(name.to_string());
            }
            _ => {}
        }
    }
    debug!(rows, distinct = journals.len(), "Scanned input rows");

    Ok(journals.into_iter().collect())
}
