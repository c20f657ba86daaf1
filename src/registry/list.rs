//! Results-list extraction for registry search pages
//!
//! Two container layouts are tried in order: the results table, then the
//! older results list. The first layout present on the page is used.

use crate::ConfigError;
use crate::email::collapse_whitespace;
use crate::registry::NOT_FOUND;
use crate::ScoutError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static NO_COMPANIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*0\s+companies\s+found").expect("no-companies pattern is valid")
});

/// Company entry read from a results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub name: String,

    /// Absolute detail-page URL
    pub link: String,
}

/// Result container layouts, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStrategy {
    /// `table.govuk-table` cells
    ResultsTable,
    /// `ul#results-list` items
    ResultsList,
}

impl ListStrategy {
    pub const ORDER: [ListStrategy; 2] = [ListStrategy::ResultsTable, ListStrategy::ResultsList];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListStrategy::ResultsTable => "results-table",
            ListStrategy::ResultsList => "results-list",
        }
    }
}

/// What a results page turned out to contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Items {
        strategy: ListStrategy,
        items: Vec<ResultItem>,
    },

    /// First page reports "0 companies found"
    NoCompaniesFound,

    /// Nothing extractable; pagination is over
    EndOfResults,
}

/// Parses registry results pages
pub struct ListParser {
    base_url: Url,
    link_selector: Selector,
    table: Selector,
    table_body: Selector,
    table_cells: Selector,
    list_items: Selector,
    heading: Selector,
    hidden: Selector,
}

impl ListParser {
    /// Creates a parser for a registry at `base_url` whose detail links start
    /// with `detail_prefix`
    pub fn new(base_url: &str, detail_prefix: &str) -> Result<Self, ScoutError> {
        let base_url = Url::parse(base_url)?;
        let link_selector = format!(
            r#"h2.govuk-heading-m > a.govuk-link[href^="{}"]"#,
            detail_prefix
        );

        Ok(Self {
            base_url,
            link_selector: selector(&link_selector)?,
            table: selector("table.govuk-table")?,
            table_body: selector("tbody")?,
            table_cells: selector("tbody > tr > td.govuk-table__cell")?,
            list_items: selector("ul#results-list > li")?,
            heading: selector("h1")?,
            hidden: selector("span.govuk-visually-hidden")?,
        })
    }

    /// Extracts the result items on one page
    ///
    /// `page_number` is 1-based; the "0 companies found" banner is only
    /// honoured on the first page.
    pub fn parse(&self, html: &str, page_number: usize) -> ListOutcome {
        let document = Html::parse_document(html);

        let found = ListStrategy::ORDER
            .iter()
            .find_map(|strategy| self.containers(&document, *strategy).map(|c| (*strategy, c)));

        if let Some((strategy, containers)) = found {
            let items: Vec<ResultItem> = containers
                .into_iter()
                .filter_map(|container| self.item_from(container))
                .collect();

            if !items.is_empty() {
                return ListOutcome::Items { strategy, items };
            }
            tracing::debug!("{} layout present but held no company links", strategy.as_str());
        }

        if page_number == 1 && self.reports_no_companies(&document) {
            ListOutcome::NoCompaniesFound
        } else {
            ListOutcome::EndOfResults
        }
    }

    fn containers<'a>(&self, document: &'a Html, strategy: ListStrategy) -> Option<Vec<ElementRef<'a>>> {
        match strategy {
            ListStrategy::ResultsTable => {
                let table = document.select(&self.table).next()?;
                table.select(&self.table_body).next()?;
                Some(table.select(&self.table_cells).collect())
            }
            ListStrategy::ResultsList => {
                let items: Vec<ElementRef<'a>> = document.select(&self.list_items).collect();
                (!items.is_empty()).then_some(items)
            }
        }
    }

    fn item_from(&self, container: ElementRef<'_>) -> Option<ResultItem> {
        let anchor = container.select(&self.link_selector).next()?;
        let href = anchor.value().attr("href")?;
        let link = self.base_url.join(href.trim()).ok()?;

        let name = self.visible_text(anchor);
        let name = if name.is_empty() {
            NOT_FOUND.to_string()
        } else {
            name
        };

        Some(ResultItem {
            name,
            link: link.to_string(),
        })
    }

    /// Anchor text without the screen-reader-only spans
    fn visible_text(&self, anchor: ElementRef<'_>) -> String {
        let hidden: Vec<_> = anchor.select(&self.hidden).map(|span| span.id()).collect();

        let mut text = String::new();
        for node in anchor.descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };
            let in_hidden = node.ancestors().any(|ancestor| hidden.contains(&ancestor.id()));
            if !in_hidden {
                text.push_str(fragment);
            }
        }

        collapse_whitespace(&text)
    }

    fn reports_no_companies(&self, document: &Html) -> bool {
        document.select(&self.heading).any(|h1| {
            let text: String = h1.text().collect();
            NO_COMPANIES.is_match(&collapse_whitespace(&text))
        })
    }
}

fn selector(css: &str) -> Result<Selector, ScoutError> {
    Selector::parse(css).map_err(|e| {
        ConfigError::Validation(format!("Invalid selector '{}': {:?}", css, e)).into()
    })
}
