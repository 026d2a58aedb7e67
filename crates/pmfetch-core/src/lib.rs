//! pmfetch core - shared infrastructure for the PubMed affiliation pipeline
//!
//! Logging, progress display, and a blocking HTTP layer with retry.
//! Nothing here knows about PubMed records.

pub mod http;
pub mod logging;
pub mod progress;
pub mod retry;

// Re-exports for convenience
pub use http::{FetchError, SHARED_RUNTIME, get_text};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num};
pub use retry::{RetryPolicy, backoff_duration, retry_with_backoff};
