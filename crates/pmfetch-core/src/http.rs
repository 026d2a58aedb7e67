//! Blocking HTTP GET over a shared async client.
//!
//! Uses async reqwest internally with tokio::time::timeout for stall detection,
//! but presents a sync interface so callers stay single-threaded.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("pmfetch/", env!("CARGO_PKG_VERSION"));

/// Error types for fetch operations
#[derive(Debug)]
pub enum FetchError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// No complete response within the request timeout
    Timeout(Duration),
    /// Response arrived but could not be decoded
    Parse(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Timeout(d) => write!(f, "request timed out after {}s", d.as_secs()),
            Self::Parse(message) => write!(f, "invalid response: {message}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Create HTTP error from reqwest error.
    ///
    /// The URL is stripped so API keys in query strings never reach the logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            // 429 = rate limited (E-utilities allow 3 req/s without a key)
            Self::Http {
                status: Some(status),
                ..
            } => *status == 429 || *status >= 500,
            // Connection refused / reset, DNS hiccups
            Self::Http { status: None, .. } => true,
            Self::Timeout(_) => true,
            Self::Parse(_) => false,
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET → response body as text.
///
/// `query` pairs are url-encoded by reqwest. The whole exchange (send + body)
/// must finish within `timeout`.
pub fn get_text(url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<String, FetchError> {
    SHARED_RUNTIME.handle().block_on(async {
        let exchange = async {
            let response = SHARED_CLIENT
                .get(url)
                .query(query)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(FetchError::from_reqwest)?;
            response.text().await.map_err(FetchError::from_reqwest)
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_err(status: u16) -> FetchError {
        FetchError::Http {
            status: Some(status),
            message: "test".to_string(),
        }
    }

    #[test]
    fn http_404_not_retryable() {
        assert!(!http_err(404).is_retryable());
    }

    #[test]
    fn http_400_not_retryable() {
        assert!(!http_err(400).is_retryable());
    }

    #[test]
    fn http_429_retryable() {
        assert!(http_err(429).is_retryable());
    }

    #[test]
    fn http_500_retryable() {
        assert!(http_err(500).is_retryable());
        assert!(http_err(503).is_retryable());
    }

    #[test]
    fn http_none_status_retryable() {
        // Network error without status code should be retryable
        let err = FetchError::Http {
            status: None,
            message: "connection refused".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn timeout_retryable() {
        assert!(FetchError::Timeout(Duration::from_secs(30)).is_retryable());
    }

    #[test]
    fn parse_not_retryable() {
        assert!(!FetchError::Parse("bad xml".to_string()).is_retryable());
    }

    #[test]
    fn display_http_with_status() {
        assert_eq!(format!("{}", http_err(404)), "HTTP 404: test");
    }

    #[test]
    fn display_http_without_status() {
        let err = FetchError::Http {
            status: None,
            message: "timeout".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: timeout");
    }

    #[test]
    fn display_timeout() {
        let err = FetchError::Timeout(Duration::from_secs(30));
        assert_eq!(format!("{err}"), "request timed out after 30s");
    }
}
