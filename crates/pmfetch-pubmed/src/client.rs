//! NCBI E-utilities client: esearch for PMIDs, efetch for article XML

use std::time::Duration;

use pmfetch_core::{FetchError, RetryPolicy, get_text, retry_with_backoff};
use serde::Deserialize;

use crate::config::Config;
use crate::record::RawRecord;
use crate::xml::parse_article_set;

/// Most ids sent in one efetch GET; NCBI wants POST for larger lists.
pub const EFETCH_BATCH_SIZE: usize = 200;

/// Comma-joined id lists of at most `batch_size` ids each, in input order.
fn id_batches(pmids: &[String], batch_size: usize) -> Vec<String> {
    pmids.chunks(batch_size.max(1)).map(|c| c.join(",")).collect()
}

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
    /// Top-level error, e.g. an invalid API key
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// Extract the PMID list from an esearch JSON body.
pub fn parse_esearch(body: &str) -> Result<Vec<String>, FetchError> {
    let response: ESearchResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("esearch JSON: {e}")))?;

    if let Some(error) = response.error {
        return Err(FetchError::Parse(format!("esearch: {error}")));
    }
    let result = response
        .esearchresult
        .ok_or_else(|| FetchError::Parse("esearch: no esearchresult".to_string()))?;
    if let Some(error) = result.error {
        return Err(FetchError::Parse(format!("esearch: {error}")));
    }
    Ok(result.idlist)
}

/// Blocking PubMed client
#[derive(Debug, Clone)]
pub struct PubmedClient {
    config: Config,
}

impl PubmedClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.max_retries)
    }

    /// Parameters sent with every request
    fn base_params(&self) -> Vec<(&str, &str)> {
        let mut params = vec![("db", "pubmed"), ("tool", self.config.tool.as_str())];
        if let Some(email) = &self.config.email {
            params.push(("email", email.as_str()));
        }
        if let Some(api_key) = &self.config.api_key {
            params.push(("api_key", api_key.as_str()));
        }
        params
    }

    /// PMIDs matching `query`, at most `max_results`.
    pub fn search(&self, query: &str) -> Result<Vec<String>, FetchError> {
        let url = self.config.endpoint("esearch");
        let retmax = self.config.max_results.to_string();
        let mut params = self.base_params();
        params.extend([("term", query), ("retmax", retmax.as_str()), ("retmode", "json")]);

        let body = retry_with_backoff("esearch", self.retry_policy(), || {
            get_text(&url, &params, self.config.request_timeout)
        })?;
        let ids = parse_esearch(&body)?;
        log::debug!("esearch returned {} PMIDs", ids.len());
        Ok(ids)
    }

    /// Pause between consecutive requests: 3 req/s without an API key, 10 with one.
    fn request_interval(&self) -> Duration {
        if self.config.api_key.is_some() {
            Duration::from_millis(110)
        } else {
            Duration::from_millis(350)
        }
    }

    /// Full records for `pmids`, in the order NCBI returns them.
    ///
    /// Large id lists are split into batches of [`EFETCH_BATCH_SIZE`].
    pub fn fetch(&self, pmids: &[String]) -> Result<Vec<RawRecord>, FetchError> {
        let url = self.config.endpoint("efetch");
        let batches = id_batches(pmids, EFETCH_BATCH_SIZE);
        let mut records = Vec::with_capacity(pmids.len());

        for (i, id) in batches.iter().enumerate() {
            if i > 0 {
                std::thread::sleep(self.request_interval());
            }
            let mut params = self.base_params();
            params.extend([("id", id.as_str()), ("retmode", "xml")]);

            let body = retry_with_backoff("efetch", self.retry_policy(), || {
                get_text(&url, &params, self.config.request_timeout)
            })?;
            let batch = parse_article_set(&body).map_err(|e| FetchError::Parse(format!("{e:#}")))?;
            log::debug!(
                "efetch batch {}/{}: {} records",
                i + 1,
                batches.len(),
                batch.len()
            );
            records.extend(batch);
        }
        Ok(records)
    }

    /// Search, then fetch every hit.
    ///
    /// An empty search result is `Ok(vec![])` and skips efetch entirely.
    pub fn search_records(&self, query: &str) -> Result<Vec<RawRecord>, FetchError> {
        let pmids = self.search(query)?;
        if pmids.is_empty() {
            log::info!("No papers found for query.");
            return Ok(Vec::new());
        }
        self.fetch(&pmids)
    }
}
