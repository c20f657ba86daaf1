//! HTTP fetcher implementation
//!
//! This module wraps the HTTP client for the site crawler:
//! - Building HTTP clients with the configured user agent and timeout
//! - Following redirects and checking where they landed
//! - Rejecting non-HTML responses
//! - Classifying failures so the crawl can carry on

use crate::config::HttpConfig;
use crate::url::domain_of;
use reqwest::{redirect::Policy, Client};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Why a fetched page was not processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Redirects ended on a different domain than the one being crawled
    OffDomain {
        /// Normalized domain of the final URL
        resolved_domain: String,
    },

    /// The Content-Type was not HTML
    NonHtml {
        /// The Content-Type received
        content_type: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffDomain { resolved_domain } => {
                write!(f, "off-domain (redirected to {})", resolved_domain)
            }
            Self::NonHtml { content_type } => write!(f, "non-html ({})", content_type),
        }
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTML page on the expected domain
    Page {
        /// Final URL after redirects
        final_url: Url,
        /// Page body content
        body: String,
    },

    /// Fetched, but must not be parsed
    Skipped(SkipReason),

    /// Network error or HTTP error status
    Failed(String),
}

impl FetchOutcome {
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page { .. })
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (reqwest's default limit of 10 hops); the caller
/// inspects the final URL.
///
/// # Example
///
/// ```no_run
/// use company_scout::config::HttpConfig;
/// use company_scout::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page for the crawl of `expected_domain`
///
/// # Request Flow
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Connection error, timeout | `Failed` |
/// | HTTP status not 2xx | `Failed` |
/// | Final URL's domain != expected domain | `Skipped(OffDomain)` |
/// | Content-Type without `html` | `Skipped(NonHtml)` |
/// | Body read error | `Failed` |
/// | Otherwise | `Page` |
///
/// `expected_domain` must already be normalized (see
/// [`crate::url::normalize_domain`]).
pub async fn fetch_page(client: &Client, url: &str, expected_domain: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Failed(classify_error(&e)),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failed(format!("HTTP {}", status.as_u16()));
    }

    let final_url = response.url().clone();
    let resolved_domain = domain_of(&final_url).unwrap_or_default();
    if resolved_domain != expected_domain {
        return FetchOutcome::Skipped(SkipReason::OffDomain { resolved_domain });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !content_type.contains("html") {
        return FetchOutcome::Skipped(SkipReason::NonHtml { content_type });
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Page { final_url, body },
        Err(e) => FetchOutcome::Failed(classify_error(&e)),
    }
}

/// Turns a reqwest error into a short log-friendly description
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection failed".to_string()
    } else if e.is_redirect() {
        "Too many redirects".to_string()
    } else {
        e.to_string()
    }
}
