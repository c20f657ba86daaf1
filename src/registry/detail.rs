//! Company detail page extraction
//!
//! Pulls the registered office address and the SIC codes out of a company
//! overview page. Both lookups are label-driven: find the label element, then
//! walk to the value next to it.

use crate::email::collapse_whitespace;
use crate::registry::NOT_FOUND;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static ADDRESS_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Registered office address").expect("address label pattern is valid")
});

static SIC_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Nature of business \(SIC\)").expect("SIC label pattern is valid")
});

static SIC_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}\s*-").expect("SIC entry pattern is valid"));

static DT: Lazy<Selector> = Lazy::new(|| parse_selector("dt"));
static SIC_LABELS: Lazy<Selector> = Lazy::new(|| parse_selector("h2, h3, dt"));
static UL: Lazy<Selector> = Lazy::new(|| parse_selector("ul"));
static SIC_SPANS: Lazy<Selector> = Lazy::new(|| parse_selector(r#"li span[id^="sic"]"#));

fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// How the SIC description was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SicMethod {
    /// `<span id="sic...">` elements inside the list items
    SicSpans,
    /// Plain text of the list items
    ListItemText,
    /// Nothing usable on the page
    None,
}

impl SicMethod {
    /// Label recorded in the output's "SIC Found Method" column
    pub fn as_str(&self) -> &'static str {
        match self {
            SicMethod::SicSpans => "Label->UL/DD->LI->SPAN[id^=sic]",
            SicMethod::ListItemText => "Label->UL/DD->LI Text",
            SicMethod::None => "None",
        }
    }
}

impl std::fmt::Display for SicMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields read from one company page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDetails {
    pub location: String,
    pub sic_description: String,
    pub sic_method: SicMethod,
}

impl CompanyDetails {
    /// Details used when the page could not be loaded at all
    pub fn not_found() -> Self {
        Self {
            location: NOT_FOUND.to_string(),
            sic_description: NOT_FOUND.to_string(),
            sic_method: SicMethod::None,
        }
    }
}

/// Extracts location and SIC codes from a company page
///
/// Missing fields are reported as `"Not found"`; this never fails.
///
/// # Example
///
/// ```
/// use company_scout::registry::{parse_company_page, SicMethod};
///
/// let html = r#"<html><body>
///   <h2>Nature of business (SIC)</h2>
///   <ul><li><span id="sic0">28150 - Manufacture of bearings</span></li></ul>
/// </body></html>"#;
/// let details = parse_company_page(html);
/// assert_eq!(details.sic_description, "28150 - Manufacture of bearings");
/// assert_eq!(details.sic_method, SicMethod::SicSpans);
/// assert_eq!(details.location, "Not found");
/// ```
pub fn parse_company_page(html: &str) -> CompanyDetails {
    let document = Html::parse_document(html);

    let location = extract_location(&document).unwrap_or_else(|| NOT_FOUND.to_string());
    let (sic_description, sic_method) = match extract_sic(&document) {
        Some((entries, method)) => (entries.join(" | "), method),
        None => (NOT_FOUND.to_string(), SicMethod::None),
    };

    CompanyDetails {
        location,
        sic_description,
        sic_method,
    }
}

/// Registered office address: the `dd` after the labelled `dt`, one line per
/// text fragment, comma-joined
fn extract_location(document: &Html) -> Option<String> {
    let label = document
        .select(&DT)
        .find(|dt| ADDRESS_LABEL.is_match(&element_text(*dt)))?;

    let value = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "dd")?;

    let lines: Vec<&str> = value
        .text()
        .flat_map(|fragment| fragment.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    (!lines.is_empty()).then(|| lines.join(", "))
}

fn extract_sic(document: &Html) -> Option<(Vec<String>, SicMethod)> {
    let label = document
        .select(&SIC_LABELS)
        .find(|element| SIC_LABEL.is_match(&element_text(*element)))?;

    let list = sic_list_for(label)?;

    let spans: Vec<ElementRef<'_>> = list.select(&SIC_SPANS).collect();
    let (candidates, method): (Vec<String>, SicMethod) = if spans.is_empty() {
        let items = list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li")
            .map(element_text)
            .collect();
        (items, SicMethod::ListItemText)
    } else {
        (spans.into_iter().map(element_text).collect(), SicMethod::SicSpans)
    };

    let mut entries: Vec<String> = Vec::new();
    for candidate in candidates {
        if SIC_ENTRY.is_match(&candidate) && !entries.contains(&candidate) {
            entries.push(candidate);
        }
    }

    (!entries.is_empty()).then_some((entries, method))
}

/// Finds the list holding the SIC entries for a label
///
/// Looks at up to three following sibling elements for a `ul`, or a `dd` or
/// `div` wrapping one, then falls back to the first `ul` under the label's
/// parent.
fn sic_list_for(label: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let from_siblings = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take(3)
        .find_map(|sibling| match sibling.value().name() {
            "ul" => Some(sibling),
            "dd" | "div" => sibling.select(&UL).next(),
            _ => None,
        });

    from_siblings.or_else(|| {
        label
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|parent| parent.select(&UL).next())
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    collapse_whitespace(&text)
}
