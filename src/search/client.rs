//! Image search client for the Google Custom Search JSON API.
//!
//! One search issues exactly one GET request asking for a single safe-search
//! image result. When the allow-list is non-empty the request also carries a
//! site restriction so the provider only returns images from those domains.
//!
//! The API key is part of the request URL, so URLs are never logged.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::error::{ConfigError, SearchError};

use super::filter::{extract_domain, AllowList};

// =============================================================================
// Constants
// =============================================================================

/// Google Custom Search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default timeout for one provider request, in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Types
// =============================================================================

/// A single image picked from the provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The query term that produced this result
    pub query: String,

    /// Direct link to the image
    pub image_url: String,

    /// Page title reported by the provider (may be empty)
    pub title: String,

    /// Thumbnail link (may be empty)
    pub thumbnail: String,

    /// Display domain with any leading `www.` removed
    pub source: String,
}

/// Trait for image search backends.
///
/// The HTTP layer only depends on this trait so that tests can run without
/// network access.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Search for one image matching `query`.
    async fn search(&self, query: &str) -> Result<SearchResult, SearchError>;
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    // Absent or null when the search has no hits
    #[serde(default)]
    items: Option<Vec<GoogleSearchItem>>,
}

// Every field may be absent or an explicit null
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    display_link: Option<String>,
    #[serde(default)]
    image: Option<GoogleImageInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleImageInfo {
    #[serde(default)]
    thumbnail_link: Option<String>,
}

impl GoogleSearchItem {
    fn thumbnail(&self) -> String {
        self.image
            .as_ref()
            .and_then(|image| image.thumbnail_link.clone())
            .unwrap_or_default()
    }
}

// =============================================================================
// GoogleImageSearch
// =============================================================================

/// Custom Search client restricted to an allow-list of sites.
#[derive(Clone)]
pub struct GoogleImageSearch {
    api_key: String,
    engine_id: String,
    base_url: Url,
    allow_list: AllowList,
    timeout: Duration,
    http: reqwest::Client,
}

impl GoogleImageSearch {
    /// Create a client against the public Google endpoint.
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        allow_list: AllowList,
    ) -> Result<Self, ConfigError> {
        Self::with_options(
            api_key,
            engine_id,
            allow_list,
            DEFAULT_SEARCH_URL,
            Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom endpoint and request timeout.
    pub fn with_options(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        allow_list: AllowList,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidSearchUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url,
            allow_list,
            timeout,
            http,
        })
    }

    /// Build the full request URL for `query`.
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", &self.api_key)
                .append_pair("cx", &self.engine_id)
                .append_pair("q", query)
                .append_pair("searchType", "image")
                .append_pair("num", "1")
                .append_pair("safe", "active");
            if let Some(sites) = self.allow_list.site_filter() {
                pairs
                    .append_pair("siteSearch", &sites)
                    .append_pair("siteSearchFilter", "i");
            }
        }
        url
    }

    fn transport_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            // Strip the URL so the API key cannot leak into messages
            SearchError::Request(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl ImageSearch for GoogleImageSearch {
    async fn search(&self, query: &str) -> Result<SearchResult, SearchError> {
        debug!(query = query, "Searching for image");

        let response = self
            .http
            .get(self.build_url(query))
            .header(http::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            // The status is reported even when the error body cannot be read
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body_len = body.len(),
                "Search provider returned an error"
            );
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let parsed: GoogleSearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        let item = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NoResults {
                query: query.to_string(),
            })?;

        let thumbnail = item.thumbnail();
        let display_link = item.display_link.as_deref().unwrap_or_default();
        let source = extract_domain(display_link).to_string();
        debug!(query = query, source = %source, "Search returned an image");

        Ok(SearchResult {
            query: query.to_string(),
            image_url: item.link.unwrap_or_default(),
            title: item.title.unwrap_or_default(),
            thumbnail,
            source,
        })
    }
}

impl std::fmt::Debug for GoogleImageSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleImageSearch")
            .field("base_url", &self.base_url.as_str())
            .field("allow_list", &self.allow_list)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
