//! Query selection, image search, and source filtering.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────┐    ┌──────────────┐
//! │  selector    │ ─> │      client       │ ─> │    filter    │
//! │ (random term)│    │ (provider search) │    │ (allow-list) │
//! └──────────────┘    └───────────────────┘    └──────────────┘
//! ```

pub mod client;
pub mod filter;
pub mod selector;
pub mod vocabulary;

pub use client::{
    GoogleImageSearch, ImageSearch, SearchResult, DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_SEARCH_URL,
};
pub use filter::{extract_domain, is_allowed_source, AllowList, DEFAULT_ALLOWED_SOURCE};
pub use selector::{QuerySelector, RandomSource, SeededRandom};
pub use vocabulary::QUERY_TERMS;
