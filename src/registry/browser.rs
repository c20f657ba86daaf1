//! Browser automation for the registry scraper
//!
//! The registry renders its results with client-side script, so pages are
//! loaded in a real browser. [`BrowserSession`] is the seam the paginator
//! drives; [`ChromeSession`] implements it over the Chrome DevTools Protocol.

use crate::config::BrowserConfig;
use crate::ScoutError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig as ChromeConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A single browser tab the scraper can steer
#[async_trait]
pub trait BrowserSession: Send {
    /// Loads `url`, waits for the page's load event and returns the
    /// rendered document
    async fn navigate(&mut self, url: &str) -> Result<String, ScoutError>;

    /// Returns the current rendered document
    async fn page_source(&mut self) -> Result<String, ScoutError>;

    /// Shuts the session down; further calls may fail
    async fn close(&mut self) -> Result<(), ScoutError>;
}

/// Chromium-backed session
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
}

impl ChromeSession {
    /// Launches Chromium, or attaches to a running instance when a remote
    /// debugging URL is configured, and opens one blank tab
    pub async fn start(config: &BrowserConfig, user_agent: &str) -> Result<Self, ScoutError> {
        let (browser, mut handler) = match &config.remote_debugging_url {
            Some(url) => {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url.as_str())
                    .await
                    .map_err(|e| browser_error("Failed to connect to remote Chrome", e))?
            }
            None => {
                let mut builder = ChromeConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(config.request_timeout_secs))
                    .arg("--disable-dev-shm-usage")
                    .arg("--disable-blink-features=AutomationControlled");
                if !config.headless {
                    builder = builder.with_head();
                }

                let chrome_config = builder.build().map_err(ScoutError::Browser)?;
                tracing::info!(
                    "Launching Chrome ({})",
                    if config.headless { "headless" } else { "visible window" }
                );
                Browser::launch(chrome_config)
                    .await
                    .map_err(|e| browser_error("Failed to launch Chrome", e))?
            }
        };

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| browser_error("Failed to open tab", e))?;
        page.set_user_agent(user_agent)
            .await
            .map_err(|e| browser_error("Failed to set user agent", e))?;

        Ok(Self {
            browser,
            page,
            handler,
            closed: false,
        })
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<String, ScoutError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| browser_error(&format!("Failed to load {}", url), e))?;
        self.page_source().await
    }

    async fn page_source(&mut self) -> Result<String, ScoutError> {
        self.page
            .content()
            .await
            .map_err(|e| browser_error("Failed to read page source", e))
    }

    async fn close(&mut self) -> Result<(), ScoutError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| browser_error("Failed to close Chrome", e));
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Chrome process did not exit cleanly: {}", e);
        }
        self.handler.abort();

        tracing::info!("Browser closed");
        result
    }
}

fn browser_error(context: &str, error: impl std::fmt::Display) -> ScoutError {
    ScoutError::Browser(format!("{}: {}", context, error))
}
