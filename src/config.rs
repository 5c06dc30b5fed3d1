//! Configuration management for the image search proxy.
//!
//! Every option can be given as a command-line flag or through the
//! environment. The variable names match the ones used by existing
//! deployments, so no prefix is applied.
//!
//! # Environment Variables
//!
//! - `BIND_HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 8080)
//! - `API_KEY` - Secret expected in `Authorization: Bearer <token>`
//! - `GOOGLE_API_KEY` - Custom Search API key
//! - `GOOGLE_SEARCH_ENGINE_ID` - Custom Search engine id (`cx`)
//! - `GOOGLE_SEARCH_URL` - Custom Search endpoint override
//! - `ALLOWED_SOURCES` - Comma-separated allow-list (default: cosmos.so)
//! - `SEARCH_TIMEOUT_SECS` - Provider request timeout (default: 10)
//! - `CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//!
//! The three secrets are optional at startup. When one is missing the server
//! still runs and the image endpoint answers with a 500.

use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::error::ConfigError;
use crate::search::{
    AllowList, DEFAULT_ALLOWED_SOURCE, DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_SEARCH_URL,
};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Image search proxy - serves one random allow-listed image per request.
#[derive(Parser, Debug, Clone)]
#[command(name = "image-search-proxy")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "BIND_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Secret that callers must present as a bearer token.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // =========================================================================
    // Search Provider Configuration
    // =========================================================================
    /// Google Custom Search API key.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Google Custom Search engine id.
    #[arg(long, env = "GOOGLE_SEARCH_ENGINE_ID", hide_env_values = true)]
    pub google_search_engine_id: Option<String>,

    /// Custom Search endpoint URL.
    #[arg(long, default_value = DEFAULT_SEARCH_URL, env = "GOOGLE_SEARCH_URL")]
    pub google_search_url: String,

    /// Allowed image source domains (comma-separated).
    ///
    /// Subdomains of each entry are allowed too.
    #[arg(
        long,
        env = "ALLOWED_SOURCES",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_SOURCE
    )]
    pub allowed_sources: Vec<String>,

    /// Timeout in seconds for one search provider request.
    #[arg(long, default_value_t = DEFAULT_SEARCH_TIMEOUT_SECS, env = "SEARCH_TIMEOUT_SECS")]
    pub search_timeout_secs: u64,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Missing secrets are not an error here; they are reported per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Url::parse(&self.google_search_url).map_err(|e| ConfigError::InvalidSearchUrl {
            url: self.google_search_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The bearer secret, treating an empty value as unset.
    pub fn server_secret(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    /// Provider key and engine id, if both are set.
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(&self.google_api_key)?,
            non_empty(&self.google_search_engine_id)?,
        ))
    }

    /// The allow-list built from `allowed_sources`.
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(&self.allowed_sources)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// =============================================================================
// Tests
// =============================================================================
