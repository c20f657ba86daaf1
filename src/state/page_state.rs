/// Page state definitions for tracking crawl progress
///
/// Every URL a crawl touches moves `Pending -> Fetching` and then into exactly
/// one terminal state.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Page is in the frontier waiting to be fetched
    Pending,

    /// Page is currently being fetched
    Fetching,

    // ===== Terminal States =====
    /// Page was fetched and its text and links were processed
    Parsed,

    /// Page was fetched but not processed (off-domain redirect, non-HTML)
    Skipped,

    /// Page fetch failed (network error, HTTP error status)
    Failed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state (page may still be processed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Fetching)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Parsed)
    }

    /// Returns true if a transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Parsed)
                | (Self::Fetching, Self::Skipped)
                | (Self::Fetching, Self::Failed)
        )
    }

    /// Short lower-case label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Parsed => "parsed",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Fetching,
            Self::Parsed,
            Self::Skipped,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
