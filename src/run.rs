//! Sequential orchestration: one search per journal and year, one appended
//! row per completed journal.
//!
//! The first failure stops the run. Journals already appended stay finished,
//! so rerunning picks up at the next journal; a journal interrupted mid-way
//! is retried from the first year of the range.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::search::{JournalSearch, SearchError, SearchQuery};
use crate::table::{
    JournalRow, ResultWriter, TableError, load_finished, load_journals, pending_journals,
    remove_output,
};
use crate::years::YearRange;

/// Errors that stop a run.
#[derive(Debug, Clone, Error)]
pub enum RunError {
    /// Reading the input/progress tables or appending a row failed
    #[error(transparent)]
    Table(#[from] TableError),

    /// A remote search failed; no row is written for this journal
    #[error("search for journal '{journal}' year {year} failed: {source}")]
    Search {
        /// Journal being processed
        journal: String,
        /// Year being queried
        year: u16,
        /// Underlying search error
        #[source]
        source: SearchError,
    },
}

/// Paths and year range for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Input table with a `TA` column.
    pub input_path: PathBuf,
    /// Append-only output/progress table.
    pub output_path: PathBuf,
    /// Years queried for every journal.
    pub years: YearRange,
    /// Delete the output table before starting.
    pub fresh: bool,
    /// Record 0 instead of the reported count when the journal phrase was
    /// not recognised. Off by default, which keeps output compatible with
    /// tables written by earlier runs.
    pub zero_unmatched_phrases: bool,
}

impl RunSettings {
    #[must_use]
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        years: YearRange,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            years,
            fresh: false,
            zero_unmatched_phrases: false,
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct journals in the input table.
    pub total: usize,
    /// Input journals already present in the output table at start.
    pub already_finished: usize,
    /// Journals appended by this run.
    pub processed: usize,
}

/// Processes every unfinished journal, appending one row per journal.
///
/// # Errors
///
/// Returns [`RunError`] on the first table or search failure. Rows written
/// before the failure are kept.
pub async fn run_journal_counts(
    settings: &RunSettings,
    search: &dyn JournalSearch,
) -> Result<RunSummary, RunError> {
    if settings.fresh {
        remove_output(&settings.output_path)?;
    }

    let journals = load_journals(&settings.input_path)?;
    let finished = load_finished(&settings.output_path)?;
    let pending = pending_journals(&journals, &finished);

    let mut summary = RunSummary {
        total: journals.len(),
        already_finished: journals.len() - pending.len(),
        processed: 0,
    };
    info!(
        total = summary.total,
        finished = summary.already_finished,
        pending = pending.len(),
        years = %settings.years,
        "Starting journal counts"
    );

    let writer = ResultWriter::new(&settings.output_path, settings.years);
    for (index, journal) in pending.iter().enumerate() {
        info!(journal = %journal, "[{}/{}] {}", index + 1, pending.len(), journal);
        let counts = count_journal(journal, settings, search).await?;
        writer.append(&JournalRow::new(journal.clone(), counts))?;
        summary.processed += 1;
    }

    info!(
        processed = summary.processed,
        total = summary.total,
        "Journal counts complete"
    );
    Ok(summary)
}

async fn count_journal(
    journal: &str,
    settings: &RunSettings,
    search: &dyn JournalSearch,
) -> Result<Vec<u64>, RunError> {
    let mut counts = Vec::with_capacity(settings.years.len());
    for year in settings.years.years() {
        let query = SearchQuery::new(journal, year);
        info!("  {year} : {query}");

        let result = search
            .search(&query)
            .await
            .map_err(|source| RunError::Search {
                journal: journal.to_string(),
                year,
                source,
            })?;

        let count = if !result.quoted_phrase_found && settings.zero_unmatched_phrases {
            warn!(journal, year, reported = result.count, "Phrase not recognised; recording 0");
            0
        } else {
            result.count
        };
        info!("    Found {count} publications.");
        counts.push(count);
    }
    Ok(counts)
}
