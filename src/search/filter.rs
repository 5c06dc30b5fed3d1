//! Source allow-list and domain matching.
//!
//! Matching is plain string comparison: a domain is allowed when it equals an
//! entry or is a subdomain of it (`images.cosmos.so` for `cosmos.so`). No
//! case folding and no URL parsing is done here; the only normalization is
//! the `www.` stripping in [`extract_domain`].

/// Default allow-listed source.
pub const DEFAULT_ALLOWED_SOURCE: &str = "cosmos.so";

/// Ordered list of allowed source domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Build an allow-list, trimming entries and dropping blank ones.
    pub fn new<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// The entries in configured order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check a normalized source domain against the list.
    pub fn is_allowed(&self, domain: &str) -> bool {
        is_allowed_source(domain, &self.entries)
    }

    /// Site restriction for the provider: all entries joined by one space.
    ///
    /// Returns `None` when the list is empty so that no restriction is sent.
    pub fn site_filter(&self) -> Option<String> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.join(" "))
        }
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new([DEFAULT_ALLOWED_SOURCE])
    }
}

/// Return true if `domain` equals an allowed entry or is a subdomain of one.
pub fn is_allowed_source<S: AsRef<str>>(domain: &str, allowed: &[S]) -> bool {
    allowed.iter().any(|entry| {
        let entry = entry.as_ref();
        if domain == entry {
            return true;
        }
        domain.len() > entry.len()
            && domain
                .strip_suffix(entry)
                .is_some_and(|head| head.ends_with('.'))
    })
}

/// Normalize a display link into a source domain by dropping a leading `www.`.
///
/// A bare `www.` is left untouched.
pub fn extract_domain(display_link: &str) -> &str {
    match display_link.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest,
        _ => display_link,
    }
}
