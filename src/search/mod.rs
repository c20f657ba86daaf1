//! Search module: finding a company's website
//!
//! - `SearchProvider`: the ranked web search seam
//! - `DuckDuckGoSearch`: HTML-scraping provider used by the CLI
//! - `DomainResolver`: filters results down to one candidate domain

mod provider;
mod resolver;

pub use provider::{parse_results, DuckDuckGoSearch, SearchProvider};
pub use resolver::DomainResolver;
