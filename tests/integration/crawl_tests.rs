//! Site crawler tests against a mock website

use crate::common::{crawler_config, html, localhost_uri, mock_domain};
use company_scout::crawler::SiteCrawler;
use company_scout::config::{CrawlerConfig, HttpConfig};
use company_scout::state::PageState;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn crawler(max_pages: usize) -> SiteCrawler {
    SiteCrawler::new(&HttpConfig::default(), crawler_config(max_pages))
        .expect("Failed to build crawler")
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body>
                <p>Write to info@acme.test today</p>
                <a href="{0}/about">About</a>
                <a href="/contact">Contact</a>
                <a href="/team">Team</a>
            </body></html>"#,
            base
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<html><body><p>sales@acme.test</p></body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("<html><body><p>contact@acme.test</p></body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let report = crawler(2).crawl(&format!("{}/", base), &mock_domain(&server)).await;

    assert_eq!(report.pages_crawled(), 2);
    assert_eq!(report.emails, vec!["info@acme.test", "sales@acme.test"]);
    assert_eq!(report.count(PageState::Parsed), 2);
}

#[tokio::test]
async fn test_crawl_never_repeats_urls_or_emails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                <p>Email: hello@acme.test</p>
                <a href="/a">A</a><a href="/a">A again</a><a href="/">Home</a><a href="/b">B</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(
            "<html><body><footer>hello@acme.test | (jobs@acme.test)</footer><a href=\"/\">Home</a></body></html>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html("<html><body>hello@acme.test</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let report = crawler(5)
        .crawl(&format!("{}/", server.uri()), &mock_domain(&server))
        .await;

    let urls: HashSet<&str> = report.visited.iter().map(|v| v.url.as_str()).collect();
    assert_eq!(urls.len(), report.visited.len());
    assert_eq!(report.pages_crawled(), 3);
    assert_eq!(report.emails, vec!["hello@acme.test", "jobs@acme.test"]);
}

#[tokio::test]
async fn test_crawl_treats_fragment_links_as_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r##"<html><body>
                <a href="/contact#form">Write to us</a>
                <a href="/contact">Contact</a>
                <a href="/team">Team</a>
            </body></html>"##,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("<html><body>office@acme.test</body></html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(html("<html><body>jane@acme.test</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let report = crawler(3)
        .crawl(&format!("{}/#top", base), &mock_domain(&server))
        .await;

    let urls: Vec<&str> = report.visited.iter().map(|v| v.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base),
            format!("{}/contact", base),
            format!("{}/team", base)
        ]
    );
    assert_eq!(report.emails, vec!["office@acme.test", "jane@acme.test"]);
}

#[tokio::test]
async fn test_crawl_sleeps_after_every_fetch_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body><a href="/gone">Gone</a><a href="/price-list.pdf">Prices</a></body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/price-list.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        page_delay_ms: 150,
        ..crawler_config(3)
    };
    let crawler = SiteCrawler::new(&HttpConfig::default(), config).expect("Failed to build crawler");

    let started = tokio::time::Instant::now();
    let report = crawler
        .crawl(&format!("{}/", server.uri()), &mock_domain(&server))
        .await;

    let states: Vec<PageState> = report.visited.iter().map(|v| v.state).collect();
    assert_eq!(
        states,
        vec![PageState::Parsed, PageState::Failed, PageState::Skipped]
    );
    assert!(started.elapsed() >= Duration::from_millis(3 * 150));
}

#[tokio::test]
async fn test_crawl_skips_off_domain_redirect() {
    let server = MockServer::start().await;
    let elsewhere = format!("{}/landing", localhost_uri(&server));

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", elsewhere.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(html("<html><body>parked@elsewhere.test</body></html>"))
        .mount(&server)
        .await;

    let report = crawler(2)
        .crawl(&format!("{}/", server.uri()), &mock_domain(&server))
        .await;

    assert!(report.emails.is_empty());
    assert_eq!(report.pages_crawled(), 1);
    assert_eq!(report.count(PageState::Skipped), 1);
}

#[tokio::test]
async fn test_crawl_skips_non_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("%PDF-1.4 info@acme.test".as_bytes().to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let report = crawler(2)
        .crawl(&format!("{}/brochure.pdf", server.uri()), &mock_domain(&server))
        .await;

    assert!(report.emails.is_empty());
    assert_eq!(report.count(PageState::Skipped), 1);
}

#[tokio::test]
async fn test_crawl_ignores_links_to_other_domains() {
    let server = MockServer::start().await;
    let other = localhost_uri(&server);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/partner">Partner</a><a href="/news">News</a></body></html>"#,
            other
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(html("<html><body>press@acme.test</body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/partner"))
        .respond_with(html("<html><body>partner@other.test</body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let report = crawler(3)
        .crawl(&format!("{}/", server.uri()), &mock_domain(&server))
        .await;

    assert_eq!(report.pages_crawled(), 2);
    assert_eq!(report.emails, vec!["press@acme.test"]);
    assert!(report.visited.iter().all(|v| !v.url.contains("localhost")));
}

#[tokio::test]
async fn test_crawl_continues_after_failed_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body><a href="/missing">Old</a><a href="/contact">Contact</a></body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("<html><body><p>Contact: office@acme.test.</p></body></html>"))
        .mount(&server)
        .await;

    let report = crawler(3)
        .crawl(&format!("{}/", server.uri()), &mock_domain(&server))
        .await;

    let states: Vec<PageState> = report.visited.iter().map(|v| v.state).collect();
    assert_eq!(
        states,
        vec![PageState::Parsed, PageState::Failed, PageState::Parsed]
    );
    assert_eq!(report.emails, vec!["office@acme.test"]);
}

#[tokio::test]
async fn test_crawl_rejects_glued_and_overlong_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                <p>Ask seejane.doe@acme.test!</p>
                <p>a.very.long.mailbox.name.here@acme.test</p>
                <p>[ok@acme.test]</p>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    let report = crawler(1)
        .crawl(&format!("{}/", server.uri()), &mock_domain(&server))
        .await;

    assert_eq!(report.emails, vec!["ok@acme.test"]);
}

#[tokio::test]
async fn test_crawl_with_empty_inputs() {
    let report = crawler(2).crawl("", "acme.test").await;
    assert_eq!(report.pages_crawled(), 0);

    let report = crawler(2).crawl("https://acme.test/", "  ").await;
    assert_eq!(report.pages_crawled(), 0);
    assert!(report.emails.is_empty());
}
