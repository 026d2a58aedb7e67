//! pmfetch - find PubMed papers with pharmaceutical or biotech authors
//!
//! Searches PubMed, keeps papers with at least one company-affiliated author
//! and prints them as a table or saves them as CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pmfetch")]
#[command(about = "Fetch research papers with pharmaceutical or biotech company authors")]
#[command(version)]
struct Cli {
    /// PubMed search query (full PubMed syntax)
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    query: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Save results to this CSV file instead of printing them
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file path (default: ./pmfetch.toml or ~/.config/pmfetch/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of PubMed results to fetch
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Contact email sent to NCBI
    #[arg(long)]
    email: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = pmfetch_core::ProgressContext::new();

    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    pmfetch_core::init_logging(cli.debug, multi).context("Failed to initialize logging")?;

    let config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Config file defaults, CLI overrides
    let mut client_config = config.client_config();
    if let Some(max_results) = cli.max_results {
        client_config.max_results = max_results;
    }
    if let Some(email) = cli.email {
        client_config.email = Some(email);
    }
    if client_config.email.is_none() {
        log::debug!("No contact email configured; NCBI asks clients to send one");
    }

    let client = pmfetch_pubmed::PubmedClient::new(client_config);
    let summary = pmfetch_pubmed::run(&client, &cli.query, &progress);

    pmfetch_pubmed::write_results(&summary.rows, cli.file.as_deref())
}
