//! # Image Search Proxy
//!
//! A small authenticated HTTP service that returns one random image from an
//! image search provider, restricted to an allow-list of source domains.
//!
//! Each request to `/api/image` picks a query term from a fixed vocabulary,
//! asks the Google Custom Search API for a single safe-search image limited
//! to the allow-listed sites, checks the result's source domain, and returns
//! it as JSON.
//!
//! ## Architecture
//!
//! - [`search`] - Query selection, the provider client, and the source filter
//! - [`server`] - Axum router, bearer authentication, and handlers
//! - [`config`] - CLI and environment configuration
//! - [`error`] - Error types shared by the layers above
//!
//! ## Example
//!
//! ```rust,no_run
//! use image_search_proxy::{
//!     create_router, AllowList, AppState, GoogleImageSearch, QuerySelector, RouterConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let allow_list = AllowList::default();
//!     let searcher = GoogleImageSearch::new("google-key", "engine-id", allow_list.clone())?;
//!     let state = AppState::new(searcher, QuerySelector::from_time(), allow_list);
//!     let router = create_router(state, RouterConfig::new("my-secret"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod search;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, SearchError};
pub use search::{
    extract_domain, is_allowed_source, AllowList, GoogleImageSearch, ImageSearch, QuerySelector,
    RandomSource, SearchResult, SeededRandom, QUERY_TERMS,
};
pub use server::{
    auth_middleware, create_router, image_handler, root_handler, ApiError, AppState, AuthError,
    BearerAuth, ImageResponse, MessageResponse, RouterConfig,
};
