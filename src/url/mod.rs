//! URL handling module for Company-Scout
//!
//! This module provides domain normalization, URL parsing and the blocklist
//! matching used when choosing a company's website.

mod domain;
mod matcher;

use serde::Serialize;

// Re-export main functions
pub use domain::{domain_of, normalize_domain, parse_http_url};
pub use matcher::{blocked_by, is_blocklisted};

/// A website believed to belong to a company
///
/// `domain` is always normalized: lower-case, without a leading `www.`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCandidate {
    /// Normalized hostname of the website
    pub domain: String,

    /// The search result URL the domain was taken from
    pub source_url: String,
}

impl DomainCandidate {
    /// Builds a candidate from a search result URL
    ///
    /// Returns None if the URL is not an absolute HTTP(S) URL with a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_scout::url::DomainCandidate;
    ///
    /// let candidate = DomainCandidate::from_url("https://www.Acme.co.uk/about").unwrap();
    /// assert_eq!(candidate.domain, "acme.co.uk");
    /// assert_eq!(candidate.source_url, "https://www.Acme.co.uk/about");
    /// ```
    pub fn from_url(url: &str) -> Option<Self> {
        let (_, domain) = parse_http_url(url).ok()?;
        Some(Self {
            domain,
            source_url: url.trim().to_string(),
        })
    }
}
