//! Comma-separated tables: the journal input list and the append-only
//! progress/output table.
//!
//! # Architecture
//!
//! - [`load_journals`] - Distinct, sorted journal names from the input table
//! - [`load_finished`] - Journal names already present in the output table
//! - [`pending_journals`] - Input journals minus finished ones, order preserved
//! - [`ResultWriter`] - Appends one [`JournalRow`] per call, header on first write

mod error;
mod input;
mod progress;
mod writer;

pub use error::TableError;
pub use input::{JOURNAL_COLUMN, load_journals};
pub use progress::{OUTPUT_JOURNAL_COLUMN, load_finished, pending_journals};
pub use writer::{JournalRow, ResultWriter, remove_output};
