//! Registry scraping workflow: browser session -> records -> CSV

use crate::config::Config;
use crate::output::{save_registry_records, RegistryRunStats};
use crate::registry::{scrape_with_session, ChromeSession, ConsolePrompt, RegistryScraper};
use crate::ScoutError;
use chrono::Utc;
use std::path::Path;

/// Scrapes the registry with a Chromium session and writes the records
///
/// Fails only when the scraper cannot be configured or the browser cannot be
/// started. A failed write is logged; the run statistics are still returned.
pub async fn run_registry_workflow(config: &Config) -> Result<RegistryRunStats, ScoutError> {
    let started_at = Utc::now();
    let scraper = RegistryScraper::new(config.registry.clone(), ConsolePrompt)?;

    let session = ChromeSession::start(&config.browser, &config.http.user_agent).await?;
    let run = scrape_with_session(&scraper, session).await;

    let output = Path::new(&config.registry.output_path);
    if run.records.is_empty() {
        tracing::warn!("No companies collected; {} not written", output.display());
    } else {
        match save_registry_records(output, &run.records) {
            Ok(()) => tracing::info!(
                "Saved {} companies to {}",
                run.records.len(),
                output.display()
            ),
            Err(e) => tracing::error!("{}", e),
        }
    }

    Ok(RegistryRunStats::from_run(&run, started_at))
}
