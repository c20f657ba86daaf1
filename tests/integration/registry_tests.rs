//! Registry scraper tests against in-memory browser sessions

use async_trait::async_trait;
use company_scout::config::RegistryConfig;
use company_scout::output::{registry_columns, save_registry_records};
use company_scout::registry::{
    scrape_with_session, BrowserSession, ChallengeHandler, RegistryScraper, StopReason, NOT_FOUND,
    RESULT_PAGE_COLUMN,
};
use company_scout::ScoutError;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const BASE: &str = "https://registry.example";
const SEARCH: &str = "https://registry.example/search?sicCodes=28150";

/// Browser stand-in serving canned documents
///
/// Each URL holds a queue of documents: every read takes the next one, and
/// the last one is repeated once the queue is down to it.
#[derive(Default)]
struct ScriptedBrowser {
    pages: HashMap<String, VecDeque<String>>,
    current: Option<String>,
    navigations: Vec<String>,
    closed: Arc<AtomicBool>,
}

impl ScriptedBrowser {
    fn page(mut self, url: &str, documents: &[String]) -> Self {
        self.pages
            .insert(url.to_string(), documents.iter().cloned().collect());
        self
    }

    fn read(&mut self) -> Result<String, ScoutError> {
        let url = self.current.clone().unwrap_or_default();
        let queue = self
            .pages
            .get_mut(&url)
            .ok_or_else(|| ScoutError::Browser(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)))?;
        let document = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        document.ok_or_else(|| ScoutError::Browser(format!("empty document at {}", url)))
    }
}

#[async_trait]
impl BrowserSession for ScriptedBrowser {
    async fn navigate(&mut self, url: &str) -> Result<String, ScoutError> {
        self.navigations.push(url.to_string());
        self.current = Some(url.to_string());
        self.read()
    }

    async fn page_source(&mut self) -> Result<String, ScoutError> {
        self.read()
    }

    async fn close(&mut self) -> Result<(), ScoutError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Operator stand-in that counts prompts
struct Operator {
    prompts: Arc<AtomicUsize>,
    gives_up: bool,
}

impl Operator {
    fn solving() -> Self {
        Self {
            prompts: Arc::new(AtomicUsize::new(0)),
            gives_up: false,
        }
    }

    fn giving_up() -> Self {
        Self {
            prompts: Arc::new(AtomicUsize::new(0)),
            gives_up: true,
        }
    }
}

#[async_trait]
impl ChallengeHandler for Operator {
    async fn wait_for_resolution(&self, _context: &str) -> Result<(), ScoutError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if self.gives_up {
            Err(ScoutError::Prompt("operator declined to continue".to_string()))
        } else {
            Ok(())
        }
    }
}

fn registry_config(max_companies: usize) -> RegistryConfig {
    RegistryConfig {
        base_url: BASE.to_string(),
        search_url: SEARCH.to_string(),
        max_companies,
        results_load_delay_ms: 0,
        detail_load_delay_ms: 0,
        page_delay_ms: 0,
        ..RegistryConfig::default()
    }
}

fn page_url(page: usize) -> String {
    if page == 1 {
        SEARCH.to_string()
    } else {
        format!("{}&page={}", SEARCH, page)
    }
}

fn company_url(number: &str) -> String {
    format!("{}/company/{}", BASE, number)
}

fn results_page(companies: &[&str]) -> String {
    let rows: String = companies
        .iter()
        .map(|number| {
            format!(
                r#"<tr class="govuk-table__row"><td class="govuk-table__cell">
                    <h2 class="govuk-heading-m">
                        <a class="govuk-link" href="/company/{0}">COMPANY {0} LTD<span class="govuk-visually-hidden"> (opens company overview)</span></a>
                    </h2>
                    <p>Incorporated on 1 January 2001</p>
                </td></tr>"#,
                number
            )
        })
        .collect();
    format!(
        r#"<html><body><h1>{} companies found</h1>
        <table class="govuk-table"><tbody class="govuk-table__body">{}</tbody></table>
        </body></html>"#,
        companies.len(),
        rows
    )
}

fn empty_results() -> String {
    "<html><body><h1>Search results</h1><p>No more results.</p></body></html>".to_string()
}

fn detail_page(address: &str, sic: &[&str]) -> String {
    let items: String = sic
        .iter()
        .enumerate()
        .map(|(i, entry)| format!(r#"<li><span id="sic{}">{}</span></li>"#, i, entry))
        .collect();
    format!(
        r#"<html><body>
        <dl><dt>Registered office address</dt><dd class="text data">{}</dd></dl>
        <h2 class="heading-medium">Nature of business (SIC)</h2>
        <ul>{}</ul>
        </body></html>"#,
        address, items
    )
}

fn with_details(mut browser: ScriptedBrowser, numbers: &[&str]) -> ScriptedBrowser {
    for number in numbers {
        browser = browser.page(
            &company_url(number),
            &[detail_page(
                "1 Mill Lane\nManchester\nM4 1AA",
                &["28150 - Manufacture of bearings, gears, gearing and driving elements"],
            )],
        );
    }
    browser
}

fn names(records: &[company_scout::registry::CompanyRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_dedup_across_pages_and_quota() {
    let browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A", "B"])])
        .page(&page_url(2), &[results_page(&["B", "C", "D"])])
        .page(&page_url(3), &[results_page(&["E"])]);
    let mut browser = with_details(browser, &["A", "B", "C", "D", "E"]);

    let scraper = RegistryScraper::new(registry_config(4), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(
        names(&run.records),
        vec!["COMPANY A LTD", "COMPANY B LTD", "COMPANY C LTD", "COMPANY D LTD"]
    );
    assert_eq!(run.stop_reason, StopReason::QuotaReached);
    assert_eq!(run.pages_visited, 2);

    let b_visits = browser
        .navigations
        .iter()
        .filter(|url| **url == company_url("B"))
        .count();
    assert_eq!(b_visits, 1);
    assert!(!browser.navigations.contains(&page_url(3)));

    let c = &run.records[2];
    assert_eq!(c.registry_link, company_url("C"));
    assert_eq!(c.location, "1 Mill Lane, Manchester, M4 1AA");
    assert_eq!(
        c.sic_description,
        "28150 - Manufacture of bearings, gears, gearing and driving elements"
    );
    assert_eq!(c.sic_found_method, "Label->UL/DD->LI->SPAN[id^=sic]");
    assert_eq!(c.email_address, NOT_FOUND);
    assert_eq!(c.extra.get(RESULT_PAGE_COLUMN).map(String::as_str), Some("2"));
}

#[tokio::test]
async fn test_quota_stops_mid_page() {
    let browser = ScriptedBrowser::default().page(&page_url(1), &[results_page(&["A", "B", "C"])]);
    let mut browser = with_details(browser, &["A", "B", "C"]);

    let scraper = RegistryScraper::new(registry_config(2), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(names(&run.records), vec!["COMPANY A LTD", "COMPANY B LTD"]);
    assert_eq!(run.stop_reason, StopReason::QuotaReached);
    assert!(!browser.navigations.contains(&company_url("C")));
}

#[tokio::test]
async fn test_all_duplicate_page_does_not_stop_pagination() {
    let browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A", "B"])])
        .page(&page_url(2), &[results_page(&["A", "B"])])
        .page(&page_url(3), &[results_page(&["C"])])
        .page(&page_url(4), &[empty_results()]);
    let mut browser = with_details(browser, &["A", "B", "C"]);

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(
        names(&run.records),
        vec!["COMPANY A LTD", "COMPANY B LTD", "COMPANY C LTD"]
    );
    assert_eq!(run.stop_reason, StopReason::EndOfResults { page: 4 });
    assert_eq!(run.pages_visited, 4);
}

#[tokio::test]
async fn test_zero_companies_found() {
    let mut browser = ScriptedBrowser::default().page(
        &page_url(1),
        &["<html><body><h1>0 companies found</h1></body></html>".to_string()],
    );

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert!(run.records.is_empty());
    assert_eq!(run.stop_reason, StopReason::NoCompaniesFound);
    assert_eq!(browser.navigations, vec![page_url(1)]);
}

#[tokio::test]
async fn test_sic_entries_deduplicated_in_order() {
    let mut browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A"])])
        .page(&page_url(2), &[empty_results()])
        .page(
            &company_url("A"),
            &[detail_page(
                "2 Dock Road\nLiverpool",
                &[
                    "28150 - Manufacture of weapons",
                    "28150 - Manufacture of weapons",
                    "62012 - Business software",
                ],
            )],
        );

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(run.records.len(), 1);
    assert_eq!(
        run.records[0].sic_description,
        "28150 - Manufacture of weapons | 62012 - Business software"
    );
    assert_eq!(run.records[0].location, "2 Dock Road, Liverpool");
}

#[tokio::test]
async fn test_captcha_pauses_then_rereads_page() {
    let challenge =
        "<html><body><h1>Please prove you are not a robot</h1></body></html>".to_string();
    let browser = ScriptedBrowser::default()
        .page(&page_url(1), &[challenge, results_page(&["A"])])
        .page(&page_url(2), &[empty_results()]);
    let mut browser = with_details(browser, &["A"]);

    let operator = Operator::solving();
    let prompts = Arc::clone(&operator.prompts);
    let scraper = RegistryScraper::new(registry_config(104), operator).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(prompts.load(Ordering::SeqCst), 1);
    assert_eq!(names(&run.records), vec!["COMPANY A LTD"]);
    assert_eq!(run.stop_reason, StopReason::EndOfResults { page: 2 });
}

#[tokio::test]
async fn test_captcha_on_company_page_rereads_details() {
    let challenge =
        "<html><body><h1>Please prove you are not a robot</h1></body></html>".to_string();
    let mut browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A"])])
        .page(&page_url(2), &[empty_results()])
        .page(
            &company_url("A"),
            &[
                challenge,
                detail_page("3 Quay Street\nBristol", &["33120 - Repair of machinery"]),
            ],
        );

    let operator = Operator::solving();
    let prompts = Arc::clone(&operator.prompts);
    let scraper = RegistryScraper::new(registry_config(104), operator).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(prompts.load(Ordering::SeqCst), 1);
    assert_eq!(run.records.len(), 1);
    assert_eq!(run.detail_failures, 0);
    assert_eq!(run.records[0].location, "3 Quay Street, Bristol");
    assert_eq!(run.records[0].sic_description, "33120 - Repair of machinery");
    let a_visits = browser
        .navigations
        .iter()
        .filter(|url| **url == company_url("A"))
        .count();
    assert_eq!(a_visits, 1);
}

#[tokio::test]
async fn test_captcha_abandoned_keeps_collected_records() {
    let challenge = "<html><body><p>Enter characters shown below</p></body></html>".to_string();
    let browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A"])])
        .page(&page_url(2), &[challenge]);
    let mut browser = with_details(browser, &["A"]);

    let scraper = RegistryScraper::new(registry_config(104), Operator::giving_up()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(names(&run.records), vec!["COMPANY A LTD"]);
    assert!(matches!(run.stop_reason, StopReason::Abandoned(_)));
}

#[tokio::test]
async fn test_failed_detail_page_yields_sentinel_record() {
    let mut browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A", "B"])])
        .page(&page_url(2), &[empty_results()]);
    browser = with_details(browser, &["B"]);

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    assert_eq!(run.records.len(), 2);
    assert_eq!(run.detail_failures, 1);
    assert_eq!(run.records[0].location, NOT_FOUND);
    assert_eq!(run.records[0].sic_description, NOT_FOUND);
    assert_eq!(run.records[0].sic_found_method, "None");
    assert_eq!(run.records[1].location, "1 Mill Lane, Manchester, M4 1AA");
}

#[tokio::test(start_paused = true)]
async fn test_load_delays_and_source_reread() {
    let loading = "<html><body><p>Loading...</p></body></html>".to_string();
    let mut browser = ScriptedBrowser::default()
        .page(&page_url(1), &[loading.clone(), results_page(&["A"])])
        .page(&page_url(2), &[loading.clone(), empty_results()])
        .page(
            &company_url("A"),
            &[
                loading,
                detail_page("4 High Street\nYork", &["28150 - Manufacture of bearings"]),
            ],
        );

    let config = RegistryConfig {
        results_load_delay_ms: 500,
        detail_load_delay_ms: 300,
        page_delay_ms: 1000,
        ..registry_config(104)
    };
    let scraper = RegistryScraper::new(config, Operator::solving()).unwrap();

    let started = tokio::time::Instant::now();
    let run = scraper.run(&mut browser).await;

    // Two results loads, one company load, one pause between pages
    assert!(started.elapsed() >= Duration::from_millis(2 * 500 + 300 + 1000));
    assert_eq!(names(&run.records), vec!["COMPANY A LTD"]);
    assert_eq!(run.records[0].location, "4 High Street, York");
    assert_eq!(run.stop_reason, StopReason::EndOfResults { page: 2 });
    assert_eq!(run.pages_visited, 2);
}

#[tokio::test]
async fn test_session_closed_after_run() {
    let browser = ScriptedBrowser::default().page(&page_url(1), &[empty_results()]);
    let closed = Arc::clone(&browser.closed);

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scrape_with_session(&scraper, browser).await;

    assert_eq!(run.stop_reason, StopReason::EndOfResults { page: 1 });
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_session_closed_when_first_page_fails() {
    let browser = ScriptedBrowser::default();
    let closed = Arc::clone(&browser.closed);

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scrape_with_session(&scraper, browser).await;

    assert!(matches!(run.stop_reason, StopReason::PageUnavailable { page: 1, .. }));
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_records_written_with_result_page_column() {
    let browser = ScriptedBrowser::default()
        .page(&page_url(1), &[results_page(&["A"])])
        .page(&page_url(2), &[results_page(&["B"])])
        .page(&page_url(3), &[empty_results()]);
    let mut browser = with_details(browser, &["A", "B"]);

    let scraper = RegistryScraper::new(registry_config(104), Operator::solving()).unwrap();
    let run = scraper.run(&mut browser).await;

    let columns = registry_columns(&run.records);
    assert_eq!(columns.last().map(String::as_str), Some(RESULT_PAGE_COLUMN));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("registry.csv");
    save_registry_records(&output, &run.records).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(header, columns);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get(0), Some("COMPANY A LTD"));
    assert_eq!(rows[1].get(1), Some(company_url("B").as_str()));
    assert_eq!(rows[1].get(6), Some("2"));
}
