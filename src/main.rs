//! CLI entry point for the journal-counts tool.

use anyhow::{Context, Result, bail};
use clap::Parser;
use journal_counts::{EntrezClient, RunSettings, YearRange, load_entrez_config, run_journal_counts};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let Some(years) = YearRange::new(args.start_year, args.end_year) else {
        bail!(
            "Invalid year range: start year {} is after end year {}",
            args.start_year,
            args.end_year
        );
    };

    let config = load_entrez_config(&args.config).with_context(|| {
        format!(
            "An error occurred reading the config file '{}'",
            args.config.display()
        )
    })?;
    info!(?config, "Loaded Entrez configuration");

    let client = EntrezClient::with_base_url(&config, &args.eutils_url)
        .context("Failed to initialize the PubMed search client")?;

    let mut settings = RunSettings::new(&args.input, &args.output, years);
    settings.fresh = args.fresh;
    settings.zero_unmatched_phrases = args.zero_unmatched_phrases;

    let summary = run_journal_counts(&settings, &client).await?;

    info!(
        total = summary.total,
        already_finished = summary.already_finished,
        processed = summary.processed,
        output = %settings.output_path.display(),
        "Done"
    );

    Ok(())
}
