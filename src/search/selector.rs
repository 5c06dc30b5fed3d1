//! Random query selection.
//!
//! The selector draws one term per request from a fixed vocabulary. The
//! randomness comes from a [`RandomSource`] so that tests can swap in a
//! deterministic sequence; the production source is a time-seeded `StdRng`
//! behind a mutex, shared by all request tasks.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::vocabulary::QUERY_TERMS;

// =============================================================================
// RandomSource Trait
// =============================================================================

/// Source of uniformly distributed indices.
///
/// Implementations must be safe to call from many request tasks at once.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn next_index(&self, len: usize) -> usize;
}

/// Process-wide generator seeded once from the clock.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Seed from the current time in nanoseconds since the Unix epoch.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(nanos)
    }

    /// Seed explicitly, for reproducible sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..len)
    }
}

// =============================================================================
// QuerySelector
// =============================================================================

/// Picks query terms uniformly at random.
#[derive(Clone)]
pub struct QuerySelector {
    terms: &'static [&'static str],
    random: Arc<dyn RandomSource>,
}

impl QuerySelector {
    /// Selector over the built-in vocabulary with the given random source.
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self::with_terms(QUERY_TERMS, random)
    }

    /// Selector over a custom vocabulary.
    ///
    /// Falls back to the built-in vocabulary if `terms` is empty, since a
    /// selection must always produce a term.
    pub fn with_terms(terms: &'static [&'static str], random: Arc<dyn RandomSource>) -> Self {
        let terms = if terms.is_empty() { QUERY_TERMS } else { terms };
        Self { terms, random }
    }

    /// Selector over the built-in vocabulary seeded from the clock.
    pub fn from_time() -> Self {
        Self::new(Arc::new(SeededRandom::from_time()))
    }

    /// Pick one term.
    pub fn pick(&self) -> &'static str {
        let index = self.random.next_index(self.terms.len());
        // Guard against a source that ignores the bound
        self.terms[index % self.terms.len()]
    }

    pub fn terms(&self) -> &'static [&'static str] {
        self.terms
    }
}

impl std::fmt::Debug for QuerySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySelector")
            .field("terms", &self.terms.len())
            .finish_non_exhaustive()
    }
}
