//! Boundary validation for raw email pattern matches
//!
//! A regex over free text happily matches inside version strings, glued-together
//! words and tracking blobs. A match is only accepted when it stands on its own:
//! it is short enough, and on both sides it touches either the edge of the text
//! or one of a small set of delimiter characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters accepted immediately before or after an email candidate
pub const BOUNDARY_DELIMITERS: &[char] = &[
    ' ', ':', ',', '.', '(', ')', '[', ']', '<', '>', '"', '\'',
];

/// Longest candidate accepted unless configured otherwise
pub const DEFAULT_MAX_CANDIDATE_LENGTH: usize = 30;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

/// Checks whether a character is one of the boundary delimiters
pub fn is_delimiter(c: char) -> bool {
    BOUNDARY_DELIMITERS.contains(&c)
}

/// Collapses runs of whitespace into single spaces and trims both ends
///
/// # Examples
///
/// ```
/// use company_scout::email::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  mail:\n\t info@acme.com  "), "mail: info@acme.com");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accepts or rejects email-shaped pattern matches
#[derive(Debug, Clone, Copy)]
pub struct BoundaryExtractor {
    max_length: usize,
}

impl Default for BoundaryExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATE_LENGTH)
    }
}

impl BoundaryExtractor {
    /// Creates an extractor accepting candidates of at most `max_length` characters
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Decides whether `text[start..end]` is a standalone email token
    ///
    /// `start` and `end` are byte offsets on character boundaries, as produced
    /// by a regex match. All three rules must hold:
    ///
    /// 1. the span is at most `max_length` characters long
    /// 2. `start` is 0 or the preceding character is a delimiter
    /// 3. `end` is the end of the text or the character at `end` is a delimiter
    ///
    /// # Examples
    ///
    /// ```
    /// use company_scout::email::BoundaryExtractor;
    ///
    /// let extractor = BoundaryExtractor::default();
    /// let text = "Contact: jane.doe@example.com.";
    /// assert!(extractor.accepts(text, 9, 29));
    ///
    /// let glued = "seejane.doe@example.comsoon";
    /// assert!(!extractor.accepts(glued, 3, 23));
    /// ```
    pub fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        if start > end || end > text.len() {
            return false;
        }
        let (Some(candidate), Some(before), Some(after)) =
            (text.get(start..end), text.get(..start), text.get(end..))
        else {
            return false;
        };

        if candidate.chars().count() > self.max_length {
            return false;
        }

        let left_ok = before.chars().next_back().map_or(true, is_delimiter);
        let right_ok = after.chars().next().map_or(true, is_delimiter);

        left_ok && right_ok
    }

    /// Finds every accepted email candidate in a block of text
    ///
    /// Whitespace is collapsed first, then every non-overlapping pattern match
    /// is run through [`BoundaryExtractor::accepts`]. Accepted candidates are
    /// returned in text order; duplicates are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_scout::email::BoundaryExtractor;
    ///
    /// let extractor = BoundaryExtractor::default();
    /// let found = extractor.extract("Write to (sales@acme.co.uk) or\n  info@acme.co.uk.");
    /// assert_eq!(found, vec!["sales@acme.co.uk", "info@acme.co.uk"]);
    /// ```
    pub fn extract(&self, text: &str) -> Vec<String> {
        let collapsed = collapse_whitespace(text);
        if collapsed.is_empty() {
            return Vec::new();
        }

        EMAIL_PATTERN
            .find_iter(&collapsed)
            .filter(|m| self.accepts(&collapsed, m.start(), m.end()))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
