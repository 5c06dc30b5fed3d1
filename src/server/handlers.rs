//! HTTP request handlers for the image API.
//!
//! # Endpoints
//!
//! - `GET /api/image` - One random allow-listed image (protected)
//! - `/` and every other path - Welcome message

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::SearchError;
use crate::search::{AllowList, ImageSearch, QuerySelector};

/// Fixed greeting returned by the root route.
pub const WELCOME_MESSAGE: &str = "Welcome to the Go API";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ImageSearch> {
    /// Search backend; `None` when provider credentials are missing
    pub searcher: Option<Arc<S>>,

    /// Picks the query term for each request
    pub selector: QuerySelector,

    /// Sources a result must come from
    pub allow_list: AllowList,
}

impl<S: ImageSearch> AppState<S> {
    /// Create a new application state with the given search backend.
    pub fn new(searcher: S, selector: QuerySelector, allow_list: AllowList) -> Self {
        Self {
            searcher: Some(Arc::new(searcher)),
            selector,
            allow_list,
        }
    }

    /// Create a state without a search backend.
    ///
    /// The image endpoint will report missing credentials.
    pub fn without_searcher(selector: QuerySelector, allow_list: AllowList) -> Self {
        Self {
            searcher: None,
            selector,
            allow_list,
        }
    }
}

impl<S: ImageSearch> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            searcher: self.searcher.clone(),
            selector: self.selector.clone(),
            allow_list: self.allow_list.clone(),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Root route response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Image endpoint response.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// Query term used for the search
    pub query: String,

    /// Direct image link
    pub image_url: String,

    /// Omitted when the provider gave no title
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Omitted when the provider gave no thumbnail
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors returned by the image endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// Request method other than GET
    MethodNotAllowed,

    /// Provider key or engine id not configured
    CredentialsMissing,

    /// The search itself failed
    Search(SearchError),

    /// Result came from a source outside the allow-list
    DisallowedSource { query: String, source: String },
}

/// Convert ApiError to a plain-text HTTP response.
///
/// - 4xx errors are logged at WARN or DEBUG level
/// - 5xx errors are logged at ERROR level
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            ApiError::CredentialsMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Google API credentials not configured".to_string(),
            ),
            ApiError::Search(err) => {
                let status = if err.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, format!("Error searching for image: {}", err))
            }
            ApiError::DisallowedSource { query, .. } => (
                StatusCode::NOT_FOUND,
                format!("No images found from allowed sources for query: {}", query),
            ),
        };

        // Log errors based on severity
        match &self {
            ApiError::DisallowedSource { source, .. } => {
                warn!(
                    status = status.as_u16(),
                    source = %source,
                    "Image from disallowed source: {}",
                    source
                );
            }
            _ if status.is_server_error() => {
                error!(status = status.as_u16(), "Server error: {}", message);
            }
            _ => {
                debug!(status = status.as_u16(), "Client error: {}", message);
            }
        }

        (status, message).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::Search(err)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle image requests.
///
/// # Endpoint
///
/// `GET /api/image` with `Authorization: Bearer <token>`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "query": "neon glow",
///   "image_url": "https://cdn.cosmos.so/abc.jpg",
///   "title": "Neon glow",
///   "thumbnail": "https://encrypted-tbn0.gstatic.com/images?q=..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing, malformed, or wrong token (auth middleware)
/// - `404 Not Found`: Image came from a source outside the allow-list
/// - `405 Method Not Allowed`: Method other than GET
/// - `500 Internal Server Error`: Missing configuration or search failure
/// - `504 Gateway Timeout`: Search provider did not answer in time
pub async fn image_handler<S: ImageSearch + 'static>(
    State(state): State<AppState<S>>,
    method: Method,
) -> Result<Json<ImageResponse>, ApiError> {
    if method != Method::GET {
        return Err(ApiError::MethodNotAllowed);
    }

    let query = state.selector.pick();

    let searcher = state.searcher.as_ref().ok_or(ApiError::CredentialsMissing)?;

    let result = searcher.search(query).await?;

    if !state.allow_list.is_allowed(&result.source) {
        return Err(ApiError::DisallowedSource {
            query: result.query,
            source: result.source,
        });
    }

    info!(query = query, source = %result.source, "Serving image");

    Ok(Json(ImageResponse {
        query: result.query,
        image_url: result.image_url,
        title: result.title,
        thumbnail: result.thumbnail,
    }))
}

/// Handle root requests.
///
/// Answers every method and every path not claimed by another route.
///
/// `200 OK` with JSON body:
/// ```json
/// { "message": "Welcome to the Go API" }
/// ```
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
