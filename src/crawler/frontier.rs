//! Crawl frontier: the FIFO queue of URLs waiting to be visited
//!
//! Every URL is admitted at most once over the life of the frontier, so a URL
//! that was already queued or visited is never queued again.

use std::collections::{HashSet, VecDeque};

/// FIFO queue of pending URLs plus the visited set of one crawl
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<String>,

    /// Every URL ever admitted to the queue
    admitted: HashSet<String>,

    /// URLs already dequeued for fetching
    visited: HashSet<String>,
}

impl CrawlFrontier {
    /// Creates a frontier holding only the start URL
    pub fn new(start_url: &str) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(start_url);
        frontier
    }

    /// Adds a URL to the back of the queue
    ///
    /// Returns false, leaving the frontier untouched, if the URL was queued or
    /// visited before.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.visited.contains(url) || !self.admitted.insert(url.to_string()) {
            return false;
        }
        self.queue.push_back(url.to_string());
        true
    }

    /// Pops the next unvisited URL and marks it visited
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs waiting in the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs handed out by [`CrawlFrontier::next_url`]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
