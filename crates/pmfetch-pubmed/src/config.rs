//! PubMed client configuration

use std::time::Duration;

/// Runtime configuration for E-utilities access
#[derive(Debug, Clone)]
pub struct Config {
    /// E-utilities base URL (esearch.fcgi / efetch.fcgi are appended)
    pub base_url: String,
    /// Contact address NCBI asks every client to send
    pub email: Option<String>,
    /// Raises the rate limit from 3 to 10 requests/second
    pub api_key: Option<String>,
    /// Tool name reported to NCBI
    pub tool: String,
    /// Maximum PMIDs requested from esearch
    pub max_results: usize,
    /// Per-request timeout (send + full body)
    pub request_timeout: Duration,
    /// Retry attempts for 429/5xx/timeouts
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/".to_string(),
            email: None,
            api_key: None,
            tool: "pmfetch".to_string(),
            max_results: 10,
            request_timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }
}

impl Config {
    /// Full URL of an E-utility endpoint, e.g. `endpoint("esearch")`.
    pub fn endpoint(&self, utility: &str) -> String {
        format!("{}/{utility}.fcgi", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_results, 10);
        assert_eq!(config.max_retries, 3);
        assert!(config.email.is_none());
        assert!(config.base_url.starts_with("https://"));
    }

    #[test]
    fn endpoint_joins_cleanly() {
        let mut config = Config::default();
        assert_eq!(
            config.endpoint("esearch"),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
        );

        config.base_url = "http://localhost:8080".to_string();
        assert_eq!(config.endpoint("efetch"), "http://localhost:8080/efetch.fcgi");
    }
}
