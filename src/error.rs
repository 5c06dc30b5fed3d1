use thiserror::Error;

/// Errors that can occur while querying the image search provider
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Transport or connection failure before a response was received
    #[error("failed to make request: {0}")]
    Request(String),

    /// The provider did not answer within the configured timeout
    #[error("upstream timeout after {secs}s")]
    Timeout { secs: u64 },

    /// Provider answered with a non-success status
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected JSON shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Provider returned a well-formed response with no items
    #[error("no images found for query: {query}")]
    NoResults { query: String },
}

impl SearchError {
    /// Whether this error represents an upstream timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SearchError::Timeout { .. })
    }
}

/// Errors raised while validating the startup configuration
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The provider endpoint is not a valid absolute URL
    #[error("invalid search URL '{url}': {reason}")]
    InvalidSearchUrl { url: String, reason: String },

    /// Timeout must be at least one second
    #[error("search timeout must be greater than 0 seconds")]
    ZeroTimeout,

    /// Failed to build the outbound HTTP client
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
