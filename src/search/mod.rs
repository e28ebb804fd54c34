//! Remote literature search: one query per (journal, year) pair.
//!
//! - [`JournalSearch`] - Async trait the orchestration loop calls through
//! - [`SearchQuery`] - A journal/year pair and its query term
//! - [`SearchResult`] - Normalized response of one search
//! - [`EntrezClient`] - `PubMed` implementation over E-utilities `esearch`

mod entrez;
mod error;
mod http_client;

pub use entrez::{DEFAULT_EUTILS_BASE_URL, EntrezClient, MAX_IDS_PER_PAGE};
pub use error::SearchError;

use std::fmt;

use async_trait::async_trait;

/// A single journal/year search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub journal: String,
    pub year: u16,
}

impl SearchQuery {
    #[must_use]
    pub fn new(journal: impl Into<String>, year: u16) -> Self {
        Self {
            journal: journal.into(),
            year,
        }
    }

    /// Query term: exact journal phrase restricted to one publication year.
    ///
    /// ```
    /// use journal_counts::SearchQuery;
    ///
    /// let query = SearchQuery::new("Nature", 2020);
    /// assert_eq!(query.term(), r#""Nature" [Journal] AND "2020"[PPDAT]"#);
    /// ```
    #[must_use]
    pub fn term(&self) -> String {
        format!("\"{}\" [Journal] AND \"{}\"[PPDAT]", self.journal, self.year)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.term())
    }
}

/// Normalized result of one search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    /// Term that was sent.
    pub term: String,
    /// Total matches reported by the service, kept even when the quoted
    /// phrase was not recognised.
    pub count: u64,
    /// Matching record identifiers; always empty when `quoted_phrase_found`
    /// is false.
    pub ids: Vec<String>,
    /// False when the service did not recognise the quoted journal phrase.
    pub quoted_phrase_found: bool,
    /// The service's rewritten form of the term.
    pub query_translation: Option<String>,
}

impl SearchResult {
    /// Builds a result, discarding identifiers when the phrase was not found.
    #[must_use]
    pub fn new(
        term: impl Into<String>,
        count: u64,
        ids: Vec<String>,
        quoted_phrase_found: bool,
        query_translation: Option<String>,
    ) -> Self {
        Self {
            term: term.into(),
            count,
            ids: if quoted_phrase_found { ids } else { Vec::new() },
            quoted_phrase_found,
            query_translation,
        }
    }
}

/// Remote search operation used by the orchestration loop.
///
/// A zero count is a normal result, never an error.
#[async_trait]
pub trait JournalSearch: Send + Sync {
    /// Runs one search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport, HTTP, service or decoding failure.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError>;
}
