//! Integration tests for the crawl orchestrator
//!
//! These tests use wiremock to stand in for the crawled site and exercise
//! the full fetch, extract, and aggregate cycle.

use sitesweep::config::AppConfig;
use sitesweep::crawler::{CrawlRequest, Orchestrator};
use sitesweep::SweepError;
use std::collections::HashSet;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Arc<AppConfig> {
    let mut config = AppConfig::default();
    config.crawler.fetch_timeout_secs = 2;
    config.crawler.max_concurrent_fetches = 4;
    Arc::new(config)
}

fn orchestrator() -> Orchestrator {
    Orchestrator::new(test_config()).expect("failed to build orchestrator")
}

async fn mount_html(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.into())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_depth_zero_fetches_only_the_seed() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <a href="/page1">One</a>
            <a href="/page2">Two</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/page1", "<html><body></body></html>").await;
    mount_html(&server, "/page2", "<html><body></body></html>").await;

    let mut request = CrawlRequest::new(server.uri());
    request.depth = 0;

    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, 1);
    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].title, "Home");
    // Links are still recorded even though none are followed
    assert_eq!(report.pages[0].links_count, 2);
}

#[tokio::test]
async fn test_depth_one_follows_links_and_dedups() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <a href="/page1">One</a>
            <a href="/page1">One again</a>
            <a href="/page2">Two</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/page1",
        r#"<html><head><title>Page 1</title></head><body><a href="/">Back home</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/page2",
        "<html><head><title>Page 2</title></head><body></body></html>",
    )
    .await;

    let request = CrawlRequest::new(server.uri());
    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, 3);

    let urls: HashSet<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls.len(), 3, "no URL may repeat in the report");
}

#[tokio::test]
async fn test_max_pages_caps_the_crawl() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/a">a</a>
            <a href="/b">b</a>
            <a href="/c">c</a>
            <a href="/d">d</a>
        </body></html>"#,
    )
    .await;
    for route in ["/a", "/b", "/c", "/d"] {
        mount_html(&server, route, "<html><body></body></html>").await;
    }

    let mut request = CrawlRequest::new(server.uri());
    request.max_pages = 3;

    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, 3);

    // Earlier-discovered links win when the budget truncates the level
    let urls: HashSet<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert!(urls.iter().any(|u| u.ends_with("/a")));
    assert!(urls.iter().any(|u| u.ends_with("/b")));
    assert!(!urls.iter().any(|u| u.ends_with("/c")));
    assert!(!urls.iter().any(|u| u.ends_with("/d")));
}

#[tokio::test]
async fn test_failed_page_is_skipped_not_fatal() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/ok">fine</a>
            <a href="/missing">broken</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/ok", "<html><head><title>OK</title></head></html>").await;
    // /missing has no mock mounted, so the server answers 404

    let request = CrawlRequest::new(server.uri());
    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, 2);
    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert!(!urls.iter().any(|u| u.ends_with("/missing")));
}

#[tokio::test]
async fn test_seed_http_error_fails_the_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = CrawlRequest::new(server.uri());
    let err = orchestrator().run(&request).await.unwrap_err();

    match err {
        SweepError::Crawl(message) => assert!(message.contains("HTTP 500")),
        other => panic!("expected Crawl error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_external_links_recorded_but_not_followed() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head><title>Example Domain</title></head><body>
            <h1>Example Domain</h1>
            <p>This domain is for use in illustrative examples in documents.</p>
            <a href="https://www.iana.org/domains/example">More information...</a>
        </body></html>"#,
    )
    .await;

    let mut request = CrawlRequest::new(server.uri());
    request.depth = 1;
    request.max_pages = 5;

    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, 1);
    assert_eq!(report.pages[0].title, "Example Domain");
    assert_eq!(report.pages[0].headings, vec!["Example Domain"]);
    assert_eq!(report.pages[0].paragraphs.len(), 1);
    assert!(report.pages[0].images.is_empty());
    assert_eq!(report.pages[0].links_count, 1);
    assert_eq!(report.summary.total_images, 0);
    assert_eq!(report.summary.total_headings, 1);
}

#[tokio::test]
async fn test_report_invariants_hold() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head><title>Root</title></head><body>
            <h1>Welcome</h1>
            <p>The root page has a paragraph that is long enough to count.</p>
            <a href="/one">one</a>
            <a href="/two">two</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/one",
        r#"<html><head><title>One</title></head><body>
            <h2>Section</h2><h3>Subsection</h3>
            <p>Another paragraph with more than twenty characters in it.</p>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/two",
        "<html><head><title>Two</title></head><body></body></html>",
    )
    .await;

    let mut request = CrawlRequest::new(server.uri());
    request.depth = 2;
    request.max_pages = 10;

    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, report.pages.len());
    assert!(report.pages.len() <= report.max_pages);

    let urls: HashSet<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls.len(), report.pages.len());

    for page in &report.pages {
        assert_eq!(page.headings_count, page.headings.len());
        assert_eq!(page.paragraphs_count, page.paragraphs.len());
        assert_eq!(page.links_count, page.links.len());
        assert_eq!(page.images_count, page.images.len());
    }

    assert_eq!(
        report.summary.total_headings,
        report.pages.iter().map(|p| p.headings_count).sum::<usize>()
    );
    assert_eq!(
        report.summary.total_paragraphs,
        report
            .pages
            .iter()
            .map(|p| p.paragraphs_count)
            .sum::<usize>()
    );
    assert_eq!(
        report.summary.total_links,
        report.pages.iter().map(|p| p.links_count).sum::<usize>()
    );
    assert_eq!(
        report.summary.total_content_length,
        report.pages.iter().map(|p| p.content_length).sum::<usize>()
    );
}

#[tokio::test]
async fn test_unparsable_page_degrades_to_empty_record() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "]]] this is not markup [[[").await;

    let mut request = CrawlRequest::new(server.uri());
    request.depth = 0;

    let report = orchestrator().run(&request).await.unwrap();

    assert_eq!(report.pages_scraped, 1);
    assert_eq!(report.pages[0].title, "");
    assert!(report.pages[0].headings.is_empty());
    assert!(report.pages[0].links.is_empty());
}
