//! Router configuration for the image search proxy.
//!
//! # Route Structure
//!
//! ```text
//! /api/image   - Random allow-listed image (protected, GET only)
//! /* fallback  - Welcome message (public, any method)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use image_search_proxy::search::{AllowList, GoogleImageSearch, QuerySelector};
//! use image_search_proxy::server::{create_router, AppState, RouterConfig};
//!
//! let allow_list = AllowList::default();
//! let searcher = GoogleImageSearch::new("google-key", "engine-id", allow_list.clone())?;
//! let state = AppState::new(searcher, QuerySelector::from_time(), allow_list);
//!
//! let router = create_router(state, RouterConfig::new("my-secret-key"));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{middleware, routing::any, Router};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::{auth_middleware, BearerAuth};
use super::handlers::{image_handler, root_handler, AppState};
use crate::search::ImageSearch;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Bearer secret for the image endpoint (None = endpoint answers 500)
    pub api_key: Option<String>,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given bearer secret.
    ///
    /// By default CORS allows any origin and tracing is enabled.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Create a configuration with no bearer secret.
    ///
    /// The image endpoint is then unreachable and answers 500.
    pub fn without_api_key() -> Self {
        Self {
            api_key: None,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// The image route is wrapped by the bearer auth middleware, so auth is
/// checked before the method and before any outbound search. Everything
/// else falls through to the welcome handler.
pub fn create_router<S>(state: AppState<S>, config: RouterConfig) -> Router
where
    S: ImageSearch + 'static,
{
    let auth = BearerAuth::new(config.api_key.as_deref());
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/api/image", any(image_handler::<S>))
        .route_layer(middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state)
        .fallback(root_handler)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
