use thiserror::Error;

/// Errors returned by the search client and gateway.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The service answered HTTP 429 for a single request. The gateway retries
    /// these and never surfaces them to its callers.
    #[error("rate limited by search service (reset in {reset_after_secs:?}s)")]
    RateLimited { reset_after_secs: Option<u64> },

    /// Every attempt hit the rate limit.
    #[error("search rate limit still exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx, non-429 answer.
    #[error("search API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("query is {len} characters long; the service accepts at most {max}")]
    QueryTooLong { len: usize, max: usize },

    #[error("invalid search configuration: {0}")]
    Config(String),
}

/// Coarse classification of a [`SearchError`] for per-concept reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    RateLimitExceeded,
    SearchFailure,
}

impl SearchError {
    #[must_use]
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::RateLimited { .. } | SearchError::RateLimitExceeded { .. } => {
                SearchErrorKind::RateLimitExceeded
            }
            SearchError::Http(_)
            | SearchError::Api { .. }
            | SearchError::Deserialize { .. }
            | SearchError::QueryTooLong { .. }
            | SearchError::Config(_) => SearchErrorKind::SearchFailure,
        }
    }
}
