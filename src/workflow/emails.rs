//! Email discovery workflow: company name -> website -> contact emails

use crate::config::Config;
use crate::crawler::{build_http_client, SiteCrawler};
use crate::input::CompanyTable;
use crate::output::{save_email_table, EmailRunStats};
use crate::search::{DomainResolver, DuckDuckGoSearch, SearchProvider};
use crate::ScoutError;
use std::path::Path;

/// What was found for one company
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyContact {
    /// Resolved website domain; empty when none was found
    pub domain: String,

    /// Accepted email candidates in discovery order
    pub emails: Vec<String>,

    pub pages_crawled: usize,
}

impl CompanyContact {
    /// Emails as written to the output column
    pub fn email_column(&self) -> String {
        self.emails.join("; ")
    }
}

/// Resolves and crawls companies one at a time
pub struct EmailDiscovery<P> {
    resolver: DomainResolver<P>,
    crawler: SiteCrawler,
}

impl<P: SearchProvider> EmailDiscovery<P> {
    pub fn new(resolver: DomainResolver<P>, crawler: SiteCrawler) -> Self {
        Self { resolver, crawler }
    }

    /// Finds the website and email candidates for one company
    ///
    /// Blank names and unresolvable companies produce an empty contact.
    pub async fn discover(&self, company_name: &str) -> CompanyContact {
        let name = company_name.trim();
        if name.is_empty() {
            return CompanyContact::default();
        }

        let Some(candidate) = self.resolver.resolve(name).await else {
            return CompanyContact::default();
        };

        let report = self.crawler.crawl(&candidate.source_url, &candidate.domain).await;

        CompanyContact {
            domain: candidate.domain,
            pages_crawled: report.pages_crawled(),
            emails: report.emails,
        }
    }

    /// Processes every row of `table` in order
    ///
    /// Returns one contact per row, aligned with the table's rows.
    pub async fn run(&self, table: &CompanyTable) -> (Vec<CompanyContact>, EmailRunStats) {
        let mut stats = EmailRunStats::start();
        let mut contacts = Vec::with_capacity(table.len());
        let total = table.len();

        for (index, name) in table.company_names().enumerate() {
            if name.is_empty() {
                tracing::warn!("Skipping row {} due to empty company name", index + 1);
                stats.record_skipped();
                contacts.push(CompanyContact::default());
                continue;
            }

            tracing::info!("Processing company: {} ({}/{})", name, index + 1, total);
            let contact = self.discover(name).await;
            stats.record(&contact);
            contacts.push(contact);
        }

        stats.finish();
        (contacts, stats)
    }
}

/// Runs the email workflow end to end with the configured search endpoint
///
/// Reads the input table, processes it and writes the enriched table. The
/// statistics are returned even when writing the output fails; the write error
/// is logged.
pub async fn run_email_workflow(config: &Config) -> Result<EmailRunStats, ScoutError> {
    let table = CompanyTable::from_path(
        Path::new(&config.emails.input_path),
        &config.emails.company_column,
        config.emails.max_companies,
    )?;
    tracing::info!(
        "Loaded {} compan{} from {}",
        table.len(),
        if table.len() == 1 { "y" } else { "ies" },
        config.emails.input_path
    );

    let client = build_http_client(&config.http)?;
    let provider = DuckDuckGoSearch::new(client.clone(), &config.search)?;
    let resolver = DomainResolver::new(provider, config.search.clone());
    let crawler = SiteCrawler::with_client(client, config.crawler.clone());

    let discovery = EmailDiscovery::new(resolver, crawler);
    let (contacts, stats) = discovery.run(&table).await;

    let output = Path::new(&config.emails.output_path);
    match save_email_table(output, &table, &contacts) {
        Ok(()) => tracing::info!("Output saved to {}", output.display()),
        Err(e) => tracing::error!("{}", e),
    }

    Ok(stats)
}
