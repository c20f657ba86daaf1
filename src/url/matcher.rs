/// Returns the first blocklist entry contained in a domain, if any
///
/// Matching is a case-insensitive substring test: the entry `compan` blocks
/// `companieshouse.gov.uk` as well as `find-a-company.co.uk`. Empty entries
/// never match.
///
/// # Examples
///
/// ```
/// use company_scout::url::blocked_by;
///
/// let blocklist = vec!["compan".to_string(), "gazette".to_string()];
/// assert_eq!(blocked_by("thegazette.co.uk", &blocklist), Some("gazette"));
/// assert_eq!(blocked_by("acme.co.uk", &blocklist), None);
/// ```
pub fn blocked_by<'a>(domain: &str, blocklist: &'a [String]) -> Option<&'a str> {
    let domain = domain.to_lowercase();
    blocklist
        .iter()
        .map(String::as_str)
        .filter(|entry| !entry.is_empty())
        .find(|entry| domain.contains(&entry.to_lowercase()))
}

/// Checks whether a domain contains any blocklisted substring
pub fn is_blocklisted(domain: &str, blocklist: &[String]) -> bool {
    blocked_by(domain, blocklist).is_some()
}
