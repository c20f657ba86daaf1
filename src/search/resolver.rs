//! Domain resolver: company name -> probable company website

use crate::config::SearchConfig;
use crate::search::SearchProvider;
use crate::url::{blocked_by, DomainCandidate};
use std::time::Duration;

/// Picks a company's website from ranked search results
///
/// Results on registry, gazette and directory sites are passed over using the
/// configured substring blocklist. The first remaining result wins.
pub struct DomainResolver<P> {
    provider: P,
    config: SearchConfig,
}

impl<P: SearchProvider> DomainResolver<P> {
    pub fn new(provider: P, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Builds the search query for a company
    ///
    /// # Examples
    ///
    /// ```
    /// use company_scout::config::SearchConfig;
    /// use company_scout::search::{DomainResolver, DuckDuckGoSearch};
    ///
    /// let config = SearchConfig::default();
    /// let provider = DuckDuckGoSearch::new(reqwest::Client::new(), &config).unwrap();
    /// let resolver = DomainResolver::new(provider, config);
    /// assert_eq!(resolver.query_for("Acme Widgets Ltd"), "Acme Widgets Ltd UK");
    /// ```
    pub fn query_for(&self, company_name: &str) -> String {
        let name = company_name.trim();
        let jurisdiction = self.config.jurisdiction.trim();
        if jurisdiction.is_empty() {
            name.to_string()
        } else {
            format!("{} {}", name, jurisdiction)
        }
    }

    /// Resolves a company name to a website, if a suitable one is found
    ///
    /// Search failures and exhausted results both yield `None`; neither is an
    /// error for the caller. The configured query delay is slept after every
    /// query, whatever the outcome.
    pub async fn resolve(&self, company_name: &str) -> Option<DomainCandidate> {
        let query = self.query_for(company_name);
        tracing::info!("Searching for: {}", query);

        let result = self.pick_candidate(&query).await;

        tokio::time::sleep(Duration::from_millis(self.config.query_delay_ms)).await;
        result
    }

    async fn pick_candidate(&self, query: &str) -> Option<DomainCandidate> {
        let max_results = self.config.max_results;

        let results = match self.provider.search(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!("Search failed for '{}': {}", query, e);
                return None;
            }
        };

        let mut checked = 0;
        for url in results.iter().take(max_results) {
            checked += 1;

            let Some(candidate) = DomainCandidate::from_url(url) else {
                tracing::debug!("Ignoring unusable search result: {}", url);
                continue;
            };

            if let Some(entry) = blocked_by(&candidate.domain, &self.config.blocklist) {
                tracing::info!("Skipping registry/aggregator result ({}): {}", entry, url);
                continue;
            }

            tracing::info!("Found potential domain: {} from {}", candidate.domain, url);
            return Some(candidate);
        }

        tracing::warn!(
            "No suitable website found in the top {} result(s) for '{}'",
            checked,
            query
        );
        None
    }
}
