//! Main runner: search, parse, filter

use std::time::{Duration, Instant};

use pmfetch_core::{ProgressContext, fmt_num};

use crate::client::PubmedClient;
use crate::filter::filter_non_academic;
use crate::record::{DiagnosticKind, RawRecord, parse_records};
use crate::row::PaperRow;

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    /// Records returned by efetch
    pub fetched: usize,
    /// Rows produced by the parser
    pub parsed: usize,
    /// Records dropped for a missing PMID or title
    pub skipped_records: usize,
    /// Individual authors skipped as malformed
    pub skipped_authors: usize,
    /// Rows kept after the non-academic filter
    pub rows: Vec<PaperRow>,
    pub elapsed: Duration,
}

impl Summary {
    pub fn kept(&self) -> usize {
        self.rows.len()
    }

    fn log(&self) {
        log::info!("=== PubMed Summary ===");
        log::info!(
            "Records: {} fetched, {} parsed ({} skipped)",
            fmt_num(self.fetched),
            fmt_num(self.parsed),
            fmt_num(self.skipped_records)
        );
        if self.skipped_authors > 0 {
            log::info!("Malformed authors skipped: {}", fmt_num(self.skipped_authors));
        }
        log::info!("Non-academic papers: {}", fmt_num(self.kept()));
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}

/// Parse and filter an already fetched batch.
///
/// Diagnostics are logged here: dropped records at warn, skipped authors at
/// debug.
pub fn process_records(records: &[RawRecord]) -> Summary {
    let start = Instant::now();
    let outcome = parse_records(records);

    let mut skipped_authors = 0;
    for diagnostic in &outcome.diagnostics {
        match diagnostic.kind {
            DiagnosticKind::MissingField { .. } => log::warn!("Skipping record: {diagnostic}"),
            DiagnosticKind::MalformedAuthorList => log::debug!("{diagnostic}"),
            DiagnosticKind::MalformedAuthor(_) => {
                skipped_authors += 1;
                log::debug!("{diagnostic}");
            }
        }
    }

    let rows = filter_non_academic(&outcome.rows);
    log::debug!(
        "{} of {} papers have non-academic authors",
        rows.len(),
        outcome.rows.len()
    );

    Summary {
        fetched: records.len(),
        parsed: outcome.rows.len(),
        skipped_records: outcome.skipped_records(),
        skipped_authors,
        rows,
        elapsed: start.elapsed(),
    }
}

/// Run the full pipeline for `query`.
///
/// A search or fetch failure is logged and treated as an empty batch, so the
/// caller always gets a summary.
pub fn run(client: &PubmedClient, query: &str, progress: &ProgressContext) -> Summary {
    let start = Instant::now();

    let pb = progress.stage_line("pubmed");
    pb.set_message(format!("searching \"{query}\"..."));
    log::info!(
        "Searching PubMed for \"{}\" (max {} results)",
        query,
        client.config().max_results
    );

    let records = match client.search_records(query) {
        Ok(records) => records,
        Err(e) => {
            log::error!("Error fetching papers: {e}");
            Vec::new()
        }
    };
    log::info!("Fetched {} records", fmt_num(records.len()));

    pb.set_message(format!("parsing {} records...", records.len()));
    let mut summary = process_records(&records);
    pb.finish_and_clear();

    summary.elapsed = start.elapsed();
    summary.log();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn record(pmid: &str, affiliation: &str) -> RawRecord {
        RawRecord::new(json!({
            "MedlineCitation": {
                "PMID": pmid,
                "Article": {
                    "ArticleTitle": format!("Paper {pmid}"),
                    "Journal": {"JournalIssue": {"PubDate": {"Year": "2022"}}},
                    "AuthorList": [{
                        "LastName": "Smith",
                        "ForeName": "John",
                        "AffiliationInfo": [{"Affiliation": affiliation}]
                    }]
                }
            }
        }))
    }

    #[test]
    fn process_keeps_company_papers() {
        let records = vec![
            record("1", "Acme Pharma Inc"),
            record("2", "University of Somewhere"),
            record("3", "Pfizer Labs"),
        ];
        let summary = process_records(&records);

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.parsed, 3);
        assert_eq!(summary.skipped_records, 0);
        let pmids: Vec<&str> = summary.rows.iter().map(|r| r.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["1", "3"]);
        assert_eq!(summary.kept(), 2);
    }

    #[test]
    fn process_counts_skipped() {
        let records = vec![
            RawRecord::new(json!({"MedlineCitation": {"Article": {"ArticleTitle": "No PMID"}}})),
            RawRecord::new(json!({
                "MedlineCitation": {
                    "PMID": "9",
                    "Article": {
                        "ArticleTitle": "Mixed",
                        "AuthorList": ["not an author", {"LastName": "Doe"}]
                    }
                }
            })),
        ];
        let summary = process_records(&records);

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.parsed, 1);
        assert_eq!(summary.skipped_records, 1);
        assert_eq!(summary.skipped_authors, 1);
        assert!(summary.rows.is_empty());
    }

    #[test]
    fn malformed_author_list_is_not_a_skipped_author() {
        let records = vec![RawRecord::new(json!({
            "MedlineCitation": {
                "PMID": "10",
                "Article": { "ArticleTitle": "Odd list", "AuthorList": "Smith J" }
            }
        }))];
        let summary = process_records(&records);

        assert_eq!(summary.parsed, 1);
        assert_eq!(summary.skipped_records, 0);
        assert_eq!(summary.skipped_authors, 0);
    }

    #[test]
    fn process_empty_batch() {
        let summary = process_records(&[]);
        assert_eq!(summary.fetched, 0);
        assert_eq!(summary.kept(), 0);
    }

    #[test]
    fn run_degrades_on_transport_failure() {
        let client = PubmedClient::new(Config {
            base_url: "http://127.0.0.1:9".to_string(),
            max_retries: 0,
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        });
        let progress = ProgressContext::with_tty(false);

        let summary = run(&client, "cancer", &progress);
        assert_eq!(summary.fetched, 0);
        assert!(summary.rows.is_empty());
    }
}
