//! Crawler module for company website crawling
//!
//! This module contains the website crawling logic, including:
//! - HTTP fetching with domain and content-type checks
//! - HTML parsing for email-bearing text and links
//! - The FIFO crawl frontier
//! - The bounded crawl loop

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlReport, SiteCrawler, VisitedPage};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, SkipReason};
pub use frontier::CrawlFrontier;
pub use parser::{parse_html, resolve_link, ParsedPage};
