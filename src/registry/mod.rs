//! Registry module: browser-driven scraping of a public company registry
//!
//! - `browser`: the session seam and its Chromium implementation
//! - `challenge`: CAPTCHA detection and the operator pause
//! - `list`: results-page extraction with layout fallbacks
//! - `detail`: address and SIC extraction from company pages
//! - `paginator`: the page loop, de-duplication and quota

mod browser;
mod challenge;
mod detail;
mod list;
mod paginator;
mod record;

pub use browser::{BrowserSession, ChromeSession};
pub use challenge::{detect_challenge, ChallengeHandler, ConsolePrompt};
pub use detail::{parse_company_page, CompanyDetails, SicMethod};
pub use list::{ListOutcome, ListParser, ListStrategy, ResultItem};
pub use paginator::{RegistryRun, RegistryScraper, StopReason, RESULT_PAGE_COLUMN};
pub use record::{CompanyRecord, NOT_FOUND, PREFERRED_COLUMNS};

/// Runs a scrape and closes the session afterwards, whatever the outcome
pub async fn scrape_with_session<S, H>(scraper: &RegistryScraper<H>, mut session: S) -> RegistryRun
where
    S: BrowserSession,
    H: ChallengeHandler,
{
    let run = scraper.run(&mut session).await;

    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    run
}
