//! Journal Counts Core Library
//!
//! This library counts `PubMed` publications per journal and per year and
//! appends the results to a progress table, resuming where a previous run
//! stopped.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Entrez contact/auth settings loaded from an INI file
//! - [`years`] - Inclusive publication year range
//! - [`table`] - Input journal list, progress table and result writer
//! - [`search`] - Remote search seam and the E-utilities client
//! - [`run`] - Sequential orchestration loop

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod run;
pub mod search;
pub mod table;
mod user_agent;
pub mod years;

// Re-export commonly used types
pub use config::{ConfigError, EntrezConfig, load_entrez_config};
pub use run::{RunError, RunSettings, RunSummary, run_journal_counts};
pub use search::{EntrezClient, JournalSearch, SearchError, SearchQuery, SearchResult};
pub use table::{JournalRow, ResultWriter, TableError, load_finished, load_journals, pending_journals};
pub use years::{DEFAULT_END_YEAR, DEFAULT_START_YEAR, YearRange};
