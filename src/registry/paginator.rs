//! Registry pagination controller
//!
//! Walks the search results page by page, visits each new company once and
//! stops on the first of: quota reached, "0 companies found", a page with
//! nothing extractable, an unloadable results page, or the operator giving up
//! on a CAPTCHA.

use crate::config::RegistryConfig;
use crate::registry::{
    detect_challenge, parse_company_page, BrowserSession, ChallengeHandler, CompanyDetails,
    CompanyRecord, ListOutcome, ListParser, ResultItem, NOT_FOUND,
};
use crate::ScoutError;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Extra column recording which results page a company came from
pub const RESULT_PAGE_COLUMN: &str = "Result Page";

/// Why a registry run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of companies was collected
    QuotaReached,

    /// The search matched nothing
    NoCompaniesFound,

    /// `page` had no extractable results
    EndOfResults { page: usize },

    /// Results page `page` could not be loaded
    PageUnavailable { page: usize, error: String },

    /// The operator abandoned a CAPTCHA
    Abandoned(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::QuotaReached => write!(f, "company limit reached"),
            StopReason::NoCompaniesFound => write!(f, "search returned 0 companies"),
            StopReason::EndOfResults { page } => write!(f, "no results on page {}", page),
            StopReason::PageUnavailable { page, error } => {
                write!(f, "results page {} unavailable: {}", page, error)
            }
            StopReason::Abandoned(reason) => write!(f, "abandoned: {}", reason),
        }
    }
}

/// Everything a registry run produced
#[derive(Debug, Clone)]
pub struct RegistryRun {
    /// Collected companies, in discovery order, unique by link
    pub records: Vec<CompanyRecord>,

    /// Results pages loaded
    pub pages_visited: usize,

    /// Detail pages that failed to load
    pub detail_failures: usize,

    pub stop_reason: StopReason,
}

/// Registry links already turned into records during this run
#[derive(Debug, Default)]
struct ProcessedLinks(HashSet<String>);

impl ProcessedLinks {
    /// Returns true the first time a link is seen
    fn claim(&mut self, link: &str) -> bool {
        self.0.insert(link.to_string())
    }
}

enum LoadError {
    /// Page failed to load; the run may carry on
    Unavailable(ScoutError),
    /// Operator gave up on a challenge; the run must stop
    Abandoned(ScoutError),
}

/// Scrapes the registry search results through a browser session
pub struct RegistryScraper<H> {
    config: RegistryConfig,
    search_url: Url,
    list_parser: ListParser,
    challenge: H,
}

impl<H: ChallengeHandler> RegistryScraper<H> {
    pub fn new(config: RegistryConfig, challenge: H) -> Result<Self, ScoutError> {
        let search_url = Url::parse(&config.search_url)?;
        let list_parser = ListParser::new(&config.base_url, &config.detail_path_prefix)?;

        Ok(Self {
            config,
            search_url,
            list_parser,
            challenge,
        })
    }

    /// URL of a 1-based results page
    ///
    /// Page 1 is the configured search URL unchanged; later pages add a
    /// `page` query parameter.
    pub fn page_url(&self, page: usize) -> String {
        if page <= 1 {
            return self.search_url.to_string();
        }
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url.to_string()
    }

    /// Runs the scrape to completion
    ///
    /// Never fails: whatever was collected before the stop is returned along
    /// with the reason for stopping.
    pub async fn run(&self, session: &mut dyn BrowserSession) -> RegistryRun {
        let max = self.config.max_companies;
        let mut records: Vec<CompanyRecord> = Vec::new();
        let mut processed = ProcessedLinks::default();
        let mut pages_visited = 0;
        let mut detail_failures = 0;
        let mut page = 1;

        let stop_reason = loop {
            if records.len() >= max {
                break StopReason::QuotaReached;
            }

            let url = self.page_url(page);
            tracing::info!("Loading results page {}: {}", page, url);

            let html = match self
                .load(session, &url, self.config.results_load_delay_ms)
                .await
            {
                Ok(html) => html,
                Err(LoadError::Abandoned(e)) => break StopReason::Abandoned(e.to_string()),
                Err(LoadError::Unavailable(e)) => {
                    tracing::error!("Results page {} failed to load: {}", page, e);
                    break StopReason::PageUnavailable {
                        page,
                        error: e.to_string(),
                    };
                }
            };
            pages_visited += 1;

            let items = match self.list_parser.parse(&html, page) {
                ListOutcome::Items { strategy, items } => {
                    tracing::debug!(
                        "Page {}: {} result(s) via {}",
                        page,
                        items.len(),
                        strategy.as_str()
                    );
                    items
                }
                ListOutcome::NoCompaniesFound => {
                    tracing::info!("Search returned 0 companies");
                    break StopReason::NoCompaniesFound;
                }
                ListOutcome::EndOfResults => {
                    tracing::info!("No results found on page {}, ending pagination", page);
                    break StopReason::EndOfResults { page };
                }
            };

            let mut new_on_page = 0;
            let mut abandoned = None;
            for item in items {
                if records.len() >= max {
                    break;
                }
                if !processed.claim(&item.link) {
                    tracing::debug!("Already processed: {}", item.link);
                    continue;
                }
                new_on_page += 1;

                tracing::info!("[{}/{}] {}", records.len() + 1, max, item.name);
                let details = match self
                    .load(session, &item.link, self.config.detail_load_delay_ms)
                    .await
                {
                    Ok(html) => parse_company_page(&html),
                    Err(LoadError::Abandoned(e)) => {
                        abandoned = Some(e.to_string());
                        break;
                    }
                    Err(LoadError::Unavailable(e)) => {
                        tracing::warn!("Company page failed for {}: {}", item.link, e);
                        detail_failures += 1;
                        CompanyDetails::not_found()
                    }
                };

                records.push(build_record(item, details, page));
            }

            if let Some(reason) = abandoned {
                break StopReason::Abandoned(reason);
            }

            if new_on_page == 0 {
                tracing::info!("No new companies on page {}; all were already processed", page);
            }

            if records.len() >= max {
                break StopReason::QuotaReached;
            }

            page += 1;
            tokio::time::sleep(Duration::from_millis(self.config.page_delay_ms)).await;
        };

        tracing::info!(
            "Registry run finished ({}): {} companies from {} page(s)",
            stop_reason,
            records.len(),
            pages_visited
        );

        RegistryRun {
            records,
            pages_visited,
            detail_failures,
            stop_reason,
        }
    }

    /// Navigates, waits for rendering and reads the page
    ///
    /// A challenge page is handed to the operator, then the source is read
    /// once more and used as-is.
    async fn load(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
        delay_ms: u64,
    ) -> Result<String, LoadError> {
        let mut html = session.navigate(url).await.map_err(LoadError::Unavailable)?;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            html = session.page_source().await.map_err(LoadError::Unavailable)?;
        }

        if let Some(phrase) = detect_challenge(&html, &self.config.challenge_phrases) {
            tracing::debug!("Challenge phrase '{}' on {}", phrase, url);
            self.challenge
                .wait_for_resolution(url)
                .await
                .map_err(LoadError::Abandoned)?;
            html = session.page_source().await.map_err(LoadError::Unavailable)?;
        }

        Ok(html)
    }
}

fn build_record(item: ResultItem, details: CompanyDetails, page: usize) -> CompanyRecord {
    let mut extra = BTreeMap::new();
    extra.insert(RESULT_PAGE_COLUMN.to_string(), page.to_string());

    CompanyRecord {
        name: item.name,
        registry_link: item.link,
        location: details.location,
        sic_description: details.sic_description,
        sic_found_method: details.sic_method.as_str().to_string(),
        email_address: NOT_FOUND.to_string(),
        extra,
    }
}
