//! State module for tracking crawl progress
//!
//! - `PageState`: the per-URL lifecycle inside a website crawl

mod page_state;

pub use page_state::PageState;
