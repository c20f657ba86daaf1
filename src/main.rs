//! Company-Scout main entry point
//!
//! Command-line interface for the email discovery and registry workflows.

use clap::{Parser, Subcommand};
use company_scout::config::{load_config_with_hash, Config};
use company_scout::output::{print_email_statistics, print_registry_statistics};
use company_scout::workflow::{run_email_workflow, run_registry_workflow};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Company-Scout: company lead discovery
///
/// Finds company websites and the contact emails published on them, or
/// collects company details from the public company registry.
#[derive(Parser, Debug)]
#[command(name = "company-scout")]
#[command(version = "1.0.0")]
#[command(about = "Company website, email and registry lead discovery", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find websites and contact emails for the companies in a CSV file
    Emails {
        /// Input CSV (overrides [emails] input-path)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output CSV (overrides [emails] output-path)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Process at most this many companies; 0 processes all
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Collect company details from the registry search results
    Registry {
        /// Output CSV (overrides [registry] output-path)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Stop after this many companies
        #[arg(long)]
        limit: Option<usize>,

        /// Run the browser without a window (CAPTCHAs cannot be solved)
        #[arg(long)]
        headless: bool,
    },

    /// Validate the config and show what would run
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Emails {
            input,
            output,
            limit,
        } => {
            if let Some(input) = input {
                config.emails.input_path = input.display().to_string();
            }
            if let Some(output) = output {
                config.emails.output_path = output.display().to_string();
            }
            if let Some(limit) = limit {
                config.emails.max_companies = limit;
            }
            handle_emails(&config).await?;
        }
        Command::Registry {
            output,
            limit,
            headless,
        } => {
            if let Some(output) = output {
                config.registry.output_path = output.display().to_string();
            }
            if let Some(limit) = limit {
                config.registry.max_companies = limit;
            }
            if headless {
                config.browser.headless = true;
            }
            handle_registry(&config).await?;
        }
        Command::Check => handle_check(&config),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("company_scout=info,warn"),
            1 => EnvFilter::new("company_scout=debug,info"),
            2 => EnvFilter::new("company_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `check`: shows the effective configuration of both workflows
fn handle_check(config: &Config) {
    println!("=== Company-Scout Configuration Check ===\n");

    println!("HTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);

    println!("\nSearch:");
    println!("  Endpoint: {}", config.search.endpoint);
    println!("  Query suffix: {}", config.search.jurisdiction);
    println!("  Results considered: {}", config.search.max_results);
    println!("  Delay between queries: {}ms", config.search.query_delay_ms);
    println!("  Blocklist ({}):", config.search.blocklist.len());
    for entry in &config.search.blocklist {
        println!("    - {}", entry);
    }

    println!("\nSite crawl:");
    println!("  Pages per site: {}", config.crawler.max_pages_per_site);
    println!("  Delay between pages: {}ms", config.crawler.page_delay_ms);
    println!(
        "  Max email candidate length: {}",
        config.crawler.max_candidate_length
    );

    println!("\nEmail workflow:");
    println!("  Input: {}", config.emails.input_path);
    println!("  Company column: {}", config.emails.company_column);
    println!("  Output: {}", config.emails.output_path);
    if config.emails.max_companies == 0 {
        println!("  Companies: all rows");
    } else {
        println!("  Companies: first {}", config.emails.max_companies);
    }

    println!("\nRegistry workflow:");
    println!("  Search URL: {}", config.registry.search_url);
    println!("  Company limit: {}", config.registry.max_companies);
    println!("  Output: {}", config.registry.output_path);
    println!(
        "  Browser: {}",
        match &config.browser.remote_debugging_url {
            Some(url) => format!("remote ({})", url),
            None if config.browser.headless => "launch (headless)".to_string(),
            None => "launch (visible window)".to_string(),
        }
    );
    println!("  CAPTCHA phrases ({}):", config.registry.challenge_phrases.len());
    for phrase in &config.registry.challenge_phrases {
        println!("    - {}", phrase);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles `emails`: runs email discovery and prints the statistics
async fn handle_emails(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting email discovery ({} -> {})",
        config.emails.input_path,
        config.emails.output_path
    );

    match run_email_workflow(config).await {
        Ok(stats) => {
            print_email_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Email discovery failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles `registry`: runs the registry scrape and prints the statistics
async fn handle_registry(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting registry scrape (limit {}) -> {}",
        config.registry.max_companies,
        config.registry.output_path
    );

    match run_registry_workflow(config).await {
        Ok(stats) => {
            print_registry_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Registry scrape failed: {}", e);
            Err(e.into())
        }
    }
}
