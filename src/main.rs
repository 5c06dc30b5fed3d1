//! Image search proxy - serves one random allow-listed image per request.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_search_proxy::{
    config::Config,
    search::{GoogleImageSearch, QuerySelector},
    server::{create_router, AppState, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    log_configuration(&config);

    let allow_list = config.allow_list();
    let selector = QuerySelector::from_time();

    let state = match config.google_credentials() {
        Some((api_key, engine_id)) => {
            match GoogleImageSearch::with_options(
                api_key,
                engine_id,
                allow_list.clone(),
                &config.google_search_url,
                config.search_timeout(),
            ) {
                Ok(searcher) => AppState::new(searcher, selector, allow_list),
                Err(e) => {
                    error!("Failed to create search client: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => AppState::<GoogleImageSearch>::without_searcher(selector, allow_list),
    };

    let router = create_router(state, build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server starting on {}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Log the effective configuration. Secrets are reported as set or unset only.
fn log_configuration(config: &Config) {
    info!("image-search-proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");

    let allow_list = config.allow_list();
    if allow_list.is_empty() {
        warn!("  Allowed sources: none - every image will be rejected");
    } else {
        info!("  Allowed sources: {}", allow_list.entries().join(", "));
    }
    info!("  Search timeout: {}s", config.search_timeout_secs);

    if config.server_secret().is_some() {
        info!("  API_KEY: set");
    } else {
        warn!("  API_KEY: not set - /api/image will answer 500");
    }

    if config.google_credentials().is_some() {
        info!("  Google credentials: set");
    } else {
        warn!("  Google credentials: not set - /api/image will answer 500");
        warn!("        Set GOOGLE_API_KEY and GOOGLE_SEARCH_ENGINE_ID");
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "image_search_proxy=debug,tower_http=debug"
    } else {
        "image_search_proxy=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = match config.server_secret() {
        Some(secret) => RouterConfig::new(secret),
        None => RouterConfig::without_api_key(),
    };

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
