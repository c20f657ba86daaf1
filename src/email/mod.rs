//! Email candidate extraction
//!
//! - `BoundaryExtractor`: turns raw pattern matches into accepted candidates
//! - `EmailCandidateSet`: the de-duplicated candidates gathered during a crawl

mod boundary;

pub use boundary::{
    collapse_whitespace, is_delimiter, BoundaryExtractor, BOUNDARY_DELIMITERS,
    DEFAULT_MAX_CANDIDATE_LENGTH,
};

use std::collections::HashSet;

/// Unique email candidates, kept in first-discovery order
#[derive(Debug, Clone, Default)]
pub struct EmailCandidateSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl EmailCandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate; returns false if it was already present
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.seen.contains(&email) {
            return false;
        }
        self.seen.insert(email.clone());
        self.ordered.push(email);
        true
    }

    /// Adds every candidate from an iterator, returning how many were new
    pub fn extend<I, S>(&mut self, emails: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for email in emails {
            if self.insert(email) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, email: &str) -> bool {
        self.seen.contains(email)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Consumes the set, returning candidates in discovery order
    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
