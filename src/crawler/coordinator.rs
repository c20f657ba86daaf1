//! Site crawler - the bounded breadth-first crawl of one company website
//!
//! This module contains the crawl loop that coordinates:
//! - Managing the frontier queue and visited set
//! - Fetching pages through the fetcher adapter
//! - Extracting email candidates from page text
//! - Following same-domain links while the page budget allows
//! - Pacing requests with a fixed delay

use crate::config::{CrawlerConfig, HttpConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::parser::parse_html;
use crate::email::{BoundaryExtractor, EmailCandidateSet};
use crate::state::PageState;
use crate::url::{domain_of, normalize_domain};
use crate::ScoutError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// One visited URL and the state it ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedPage {
    pub url: String,
    pub state: PageState,
}

/// Result of crawling one website
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Unique accepted email candidates, in discovery order
    pub emails: Vec<String>,

    /// Every URL fetched, in visit order
    pub visited: Vec<VisitedPage>,
}

impl CrawlReport {
    /// Number of pages fetched (whatever the outcome)
    pub fn pages_crawled(&self) -> usize {
        self.visited.len()
    }

    /// Number of visited pages in the given terminal state
    pub fn count(&self, state: PageState) -> usize {
        self.visited.iter().filter(|page| page.state == state).count()
    }
}

/// Crawls a website breadth-first within a page budget
pub struct SiteCrawler {
    client: Client,
    config: CrawlerConfig,
    extractor: BoundaryExtractor,
}

impl SiteCrawler {
    /// Creates a crawler with its own HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(SiteCrawler)` - Ready to crawl
    /// * `Err(ScoutError)` - The HTTP client could not be built
    pub fn new(http: &HttpConfig, config: CrawlerConfig) -> Result<Self, ScoutError> {
        let client = build_http_client(http)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a crawler sharing an existing HTTP client
    pub fn with_client(client: Client, config: CrawlerConfig) -> Self {
        let extractor = BoundaryExtractor::new(config.max_candidate_length);
        Self {
            client,
            config,
            extractor,
        }
    }

    /// Crawls `start_url`, staying on `target_domain`
    ///
    /// # Crawl Loop
    ///
    /// 1. Dequeue the next URL (FIFO), skipping visited ones
    /// 2. Fetch it; off-domain redirects and non-HTML responses are skipped,
    ///    failures are logged
    /// 3. On a parsed page, scan every text node holding an `@` for candidates
    /// 4. While the page budget is not spent, queue same-domain links
    /// 5. Sleep the configured delay after every fetch attempt
    ///
    /// The loop ends when the frontier is empty or `max_pages_per_site` pages
    /// were fetched. Individual page failures never abort the crawl, and an
    /// empty result is a normal outcome.
    pub async fn crawl(&self, start_url: &str, target_domain: &str) -> CrawlReport {
        let start_url = without_fragment(start_url);
        let target_domain = normalize_domain(target_domain);
        if start_url.is_empty() || target_domain.is_empty() {
            return CrawlReport::default();
        }

        let budget = self.config.max_pages_per_site;
        let delay = Duration::from_millis(self.config.page_delay_ms);

        let mut frontier = CrawlFrontier::new(&start_url);
        let mut emails = EmailCandidateSet::new();
        let mut visited = Vec::new();

        tracing::info!(
            "Starting crawl for {}, max {} page(s)",
            target_domain,
            budget
        );

        while visited.len() < budget {
            let Some(url) = frontier.next_url() else {
                tracing::debug!("Frontier is empty, crawl of {} complete", target_domain);
                break;
            };

            tracing::info!(
                "Crawling page {}/{}: {}",
                visited.len() + 1,
                budget,
                url
            );

            let mut state = PageState::Pending;
            advance(&mut state, PageState::Fetching);

            let outcome = fetch_page(&self.client, &url, &target_domain).await;
            let pages_crawled = visited.len() + 1;

            match outcome {
                FetchOutcome::Page { body, .. } => {
                    advance(&mut state, PageState::Parsed);
                    let base_url = match Url::parse(&url) {
                        Ok(base_url) => base_url,
                        Err(e) => {
                            tracing::warn!("Cannot resolve links against {}: {}", url, e);
                            visited.push(VisitedPage { url, state });
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    };

                    let parsed = parse_html(&body, &base_url);

                    for text in &parsed.at_texts {
                        for email in self.extractor.extract(text) {
                            if emails.insert(email.clone()) {
                                tracing::debug!("Found potential email: {} in {}", email, url);
                            }
                        }
                    }

                    if pages_crawled < budget {
                        let queued = self.queue_links(&mut frontier, &parsed.links, &target_domain);
                        tracing::debug!("Queued {} new link(s) from {}", queued, url);
                    }
                }

                FetchOutcome::Skipped(reason) => {
                    advance(&mut state, PageState::Skipped);
                    tracing::warn!("Skipping {}: {}", url, reason);
                }

                FetchOutcome::Failed(error) => {
                    advance(&mut state, PageState::Failed);
                    tracing::error!("Error fetching {}: {}", url, error);
                }
            }

            visited.push(VisitedPage { url, state });
            tokio::time::sleep(delay).await;
        }

        if emails.is_empty() {
            tracing::info!(
                "No potential email addresses found on {} (from {} page(s) crawled)",
                target_domain,
                visited.len()
            );
        } else {
            tracing::info!(
                "Found {} unique potential email address(es) on {} (from {} page(s) crawled)",
                emails.len(),
                target_domain,
                visited.len()
            );
        }

        CrawlReport {
            emails: emails.into_vec(),
            visited,
        }
    }

    /// Adds same-domain links to the frontier, returning how many were new
    fn queue_links(&self, frontier: &mut CrawlFrontier, links: &[String], target_domain: &str) -> usize {
        let mut queued = 0;

        for link in links {
            let same_domain = Url::parse(link)
                .ok()
                .and_then(|url| domain_of(&url))
                .map_or(false, |domain| domain == target_domain);

            if same_domain && frontier.enqueue(link) {
                queued += 1;
            }
        }

        queued
    }
}

/// Trims a start URL and drops its fragment, leaving unparsable input as-is
fn without_fragment(url: &str) -> String {
    let url = url.trim();
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Moves a page to its next state, logging transitions that should not happen
fn advance(state: &mut PageState, next: PageState) {
    if !state.can_transition_to(next) {
        tracing::warn!("Invalid page state transition: {} -> {}", state, next);
    }
    *state = next;
}
