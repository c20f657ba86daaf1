//! Integration tests for Company-Scout
//!
//! HTTP-facing parts run against wiremock servers; the registry scraper runs
//! against in-memory browser sessions.

mod crawl_tests;
mod registry_tests;
