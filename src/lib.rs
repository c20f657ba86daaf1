//! Company-Scout: company website and registry lead discovery
//!
//! This crate implements two workflows:
//! - email discovery: resolve a company's website through a search engine, then
//!   crawl a handful of same-domain pages collecting contact email candidates
//! - registry scraping: paginate a public company registry through a browser
//!   session and extract name, address and SIC codes per company

pub mod config;
pub mod crawler;
pub mod email;
pub mod input;
pub mod output;
pub mod registry;
pub mod search;
pub mod state;
pub mod url;
pub mod workflow;

use thiserror::Error;

/// Main error type for Company-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Search failed for '{query}': {message}")]
    Search { query: String, message: String },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Required column '{column}' not found in input")]
    MissingColumn { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write output to {path}: {message}")]
    OutputWrite { path: String, message: String },

    #[error("Operator prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Company-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use state::PageState;
pub use url::{domain_of, normalize_domain, DomainCandidate};
