//! Run statistics for both workflows
//!
//! Counters are accumulated while a workflow runs and printed once it ends.

use crate::registry::RegistryRun;
use crate::workflow::CompanyContact;
use chrono::{DateTime, Utc};

/// Email workflow statistics
#[derive(Debug, Clone)]
pub struct EmailRunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Rows processed, including skipped ones
    pub companies: usize,

    /// Rows with an empty company name
    pub skipped: usize,

    /// Companies whose website was resolved
    pub domains_found: usize,

    /// Companies with at least one email candidate
    pub companies_with_emails: usize,

    pub emails_found: usize,
    pub pages_crawled: usize,
}

impl EmailRunStats {
    /// Starts a new run clock with zeroed counters
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            companies: 0,
            skipped: 0,
            domains_found: 0,
            companies_with_emails: 0,
            emails_found: 0,
            pages_crawled: 0,
        }
    }

    /// Counts one processed company
    pub fn record(&mut self, contact: &CompanyContact) {
        self.companies += 1;
        if !contact.domain.is_empty() {
            self.domains_found += 1;
        }
        if !contact.emails.is_empty() {
            self.companies_with_emails += 1;
        }
        self.emails_found += contact.emails.len();
        self.pages_crawled += contact.pages_crawled;
    }

    /// Counts one row skipped for an empty name
    pub fn record_skipped(&mut self) {
        self.companies += 1;
        self.skipped += 1;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Registry workflow statistics
#[derive(Debug, Clone)]
pub struct RegistryRunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: usize,
    pub pages_visited: usize,
    pub detail_failures: usize,
    pub stop_reason: String,
}

impl RegistryRunStats {
    /// Summarises a finished run that started at `started_at`
    pub fn from_run(run: &RegistryRun, started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: Utc::now(),
            records: run.records.len(),
            pages_visited: run.pages_visited,
            detail_failures: run.detail_failures,
            stop_reason: run.stop_reason.to_string(),
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints email workflow statistics to stdout
pub fn print_email_statistics(stats: &EmailRunStats) {
    println!("=== Email Discovery Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {} seconds", duration);
    }
    println!();

    println!("Companies:");
    println!("  Processed: {}", stats.companies);
    println!("  Skipped (empty name): {}", stats.skipped);
    println!("  Website found: {}", stats.domains_found);
    println!("  With email candidates: {}", stats.companies_with_emails);
    println!();

    println!("Crawl:");
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Email candidates: {}", stats.emails_found);
    println!();

    let searched = stats.companies - stats.skipped;
    let hit_rate = if searched > 0 {
        (stats.domains_found as f64 / searched as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Website hit rate: {:.1}% ({} / {} companies)",
        hit_rate, stats.domains_found, searched
    );
}

/// Prints registry workflow statistics to stdout
pub fn print_registry_statistics(stats: &RegistryRunStats) {
    println!("=== Registry Scrape Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Finished: {}", stats.finished_at.to_rfc3339());
    println!("  Duration: {} seconds", stats.duration_seconds());
    println!("  Stopped: {}", stats.stop_reason);
    println!();

    println!("Results:");
    println!("  Companies collected: {}", stats.records);
    println!("  Results pages visited: {}", stats.pages_visited);
    if stats.detail_failures > 0 {
        println!("  Company pages that failed to load: {}", stats.detail_failures);
    }
}
