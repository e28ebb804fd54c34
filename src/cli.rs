//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use journal_counts::search::DEFAULT_EUTILS_BASE_URL;
use journal_counts::{DEFAULT_END_YEAR, DEFAULT_START_YEAR};

/// Count PubMed publications per journal and per year.
///
/// Reads journal names from the `TA` column of the input table, queries
/// PubMed once per journal and year, and appends one row per journal to the
/// output table. Journals already in the output table are skipped, so an
/// interrupted run can simply be restarted.
#[derive(Parser, Debug)]
#[command(name = "journal-counts")]
#[command(author, version, about)]
pub struct Args {
    /// INI file with an [Entrez] section (email, api_key, use_api_key)
    #[arg(long, default_value = "config.ini")]
    pub config: PathBuf,

    /// Input table with a `TA` column of journal names
    #[arg(short, long, default_value = "pmid_results.csv")]
    pub input: PathBuf,

    /// Output table; rows are appended and used to resume
    #[arg(short, long, default_value = "journal_counts.csv")]
    pub output: PathBuf,

    /// First publication year queried
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start_year: u16,

    /// Last publication year queried (inclusive)
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end_year: u16,

    /// Delete the output table first and count every journal again
    #[arg(long)]
    pub fresh: bool,

    /// Record 0 when PubMed does not recognise the quoted journal name
    #[arg(long)]
    pub zero_unmatched_phrases: bool,

    /// E-utilities base URL
    #[arg(long, default_value = DEFAULT_EUTILS_BASE_URL, hide = true)]
    pub eutils_url: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
