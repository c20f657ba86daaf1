//! Search engine adapters
//!
//! The domain resolver only needs "give me the top N result URLs for this
//! query"; anything that can answer that implements [`SearchProvider`].

use crate::config::SearchConfig;
use crate::ScoutError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// A ranked web search
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns at most `max_results` result URLs, best first
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ScoutError>;
}

/// Scrapes the DuckDuckGo HTML endpoint
///
/// Result anchors (`a.result__a`) either carry the target URL directly or a
/// `/l/?uddg=<encoded target>` redirect, which is decoded.
pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: Url,
}

impl DuckDuckGoSearch {
    /// Creates a search adapter against the configured endpoint
    pub fn new(client: Client, config: &SearchConfig) -> Result<Self, ScoutError> {
        let endpoint = Url::parse(&config.endpoint)?;
        Ok(Self { client, endpoint })
    }

    fn query_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ScoutError> {
        let url = self.query_url(query);
        tracing::debug!("Searching: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScoutError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Search {
                query: query.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|source| ScoutError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(parse_results(&body, &url, max_results))
    }
}

/// Extracts result URLs from a DuckDuckGo HTML results page
pub fn parse_results(html: &str, page_url: &Url, max_results: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a.result__a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| decode_result_href(href, page_url))
        .take(max_results)
        .collect()
}

/// Resolves a result href, unwrapping the `uddg` redirect parameter
fn decode_result_href(href: &str, page_url: &Url) -> Option<String> {
    let resolved = page_url.join(href.trim()).ok()?;

    let target = resolved
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned());

    let target = match target {
        Some(target) => Url::parse(&target).ok()?,
        None => resolved,
    };

    matches!(target.scheme(), "http" | "https").then(|| target.to_string())
}
