//! Progress loader and work filter for resuming interrupted runs.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::TableError;

/// Column of the output table holding journal names.
pub const OUTPUT_JOURNAL_COLUMN: &str = "journal";

/// Returns the journal names already present in the output table.
///
/// A missing (or zero-length) file means nothing is finished yet. Rows are
/// not checked for the expected number of year columns: a truncated row still
/// marks its journal finished.
///
/// # Errors
///
/// Returns [`TableError`] when an existing file cannot be read or parsed, or
/// has no `journal` column.
pub fn load_finished(path: &Path) -> Result<HashSet<String>, TableError> {
    if !path.exists() {
        info!(path = %path.display(), "No output table found. Starting fresh.");
        return Ok(HashSet::new());
    }

    let file = File::open(path).map_err(|err| TableError::io(path, &err))?;
    let finished = read_finished(file, path)?;
    info!(
        path = %path.display(),
        finished = finished.len(),
        "Resumed previous session"
    );
    Ok(finished)
}

fn read_finished<R: Read>(reader: R, path: &Path) -> Result<HashSet<String>, TableError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().map_err(|err| TableError::csv(path, &err))?;
    if headers.is_empty() {
        return Ok(HashSet::new());
    }
    let Some(column) = headers
        .iter()
        .position(|name| name == OUTPUT_JOURNAL_COLUMN)
    else {
        return Err(TableError::missing_column(path, OUTPUT_JOURNAL_COLUMN));
    };

    let mut finished = HashSet::new();
    for record in rdr.records() {
        let record = record.map_err(|err| TableError::csv(path, &err))?;
        if let Some(name) = record.get(column) {
            finished.insert(name.to_string());
        }
    }
    Ok(finished)
}

/// Input journals that are not yet finished, in their original order.
#[must_use]
pub fn pending_journals(journals: &[String], finished: &HashSet<String>) -> Vec<String> {
    journals
        .iter()
        .filter(|journal| !finished.contains(journal.as_str()))
        .cloned()
        .collect()
}
