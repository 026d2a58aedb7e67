//! pmfetch PubMed - find papers with pharmaceutical or biotech authors
//!
//! Searches PubMed through NCBI E-utilities, normalizes each article into a
//! flat row and keeps only papers with at least one company-affiliated author.
//!
//! # Pipeline
//!
//! - `client`: esearch for PMIDs, efetch for article XML
//! - `xml`: efetch XML to loosely-typed nested records
//! - `record` / `authors` / `classify`: records to rows, with diagnostics
//! - `filter`: keep rows with non-academic authors
//! - `report`: console table or CSV
//!
//! # Example
//!
//! ```ignore
//! use pmfetch_pubmed::{Config, PubmedClient, run};
//! use pmfetch_core::ProgressContext;
//!
//! let client = PubmedClient::new(Config {
//!     email: Some("me@example.org".into()),
//!     ..Default::default()
//! });
//! let summary = run(&client, "cancer immunotherapy", &ProgressContext::new());
//! println!("{} papers with company authors", summary.kept());
//! ```

pub mod authors;
pub mod classify;
pub mod client;
pub mod config;
pub mod filter;
pub mod record;
pub mod report;
pub mod row;
pub mod runner;
pub mod xml;

// Re-exports
pub use authors::{AuthorSummary, extract_authors};
pub use classify::is_company_affiliation;
pub use client::PubmedClient;
pub use config::Config;
pub use filter::filter_non_academic;
pub use record::{Diagnostic, DiagnosticKind, ParseOutcome, RawRecord, parse_records};
pub use report::{render_table, write_csv, write_results};
pub use row::{COLUMNS, PaperRow};
pub use runner::{Summary, process_records, run};
pub use xml::parse_article_set;
