//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use sitesift::config::Config;
use sitesift::crawler::{crawl, CrawlState, ERROR_TITLE};
use sitesift::output::{format_markdown_report, write_markdown_report};
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(keywords: &[&str], max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.request_delay_ms = 0;
    config.crawler.request_timeout_secs = 1;
    config.relevance.keywords = keywords.iter().map(|k| k.to_string()).collect();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn html_page(title: &str, body_text: &str, links: &[(&str, &str)]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|(href, text)| format!(r#"<li><a href="{}">{}</a></li>"#, href, text))
        .collect();
    let html = format!(
        "<html><head><title>{}</title><style>body {{ color: red; }}</style></head>\
         <body><p>{}</p><ul>{}</ul><script>var x = 1;</script></body></html>",
        title, body_text, anchors
    );
    ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn seed(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse server URI")
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &"Welcome to the site. ".repeat(300),
            &[("/about", "About us"), ("/products", "Our products")],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        html_page("About", &"We build things. ".repeat(200), &[("/", "Home")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/products",
        html_page(
            "Products",
            &"Every product we sell. ".repeat(150),
            &[("/about", "About")],
        ),
    )
    .await;

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.state, CrawlState::Completed);
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.pages_discovered, 3);
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.error_count(), 0);

    let home = &outcome.records[0];
    assert_eq!(home.title, "Home");
    assert_eq!(home.relevance, 1.0);
    assert!(!home.text.contains("color: red"));
    assert!(!home.text.contains("var x"));

    for pair in outcome.records.windows(2) {
        assert!(pair[0].relevance >= pair[1].relevance);
    }

    // Each page is requested exactly once
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_crawl_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html_page("Home", &"x".repeat(5000), &[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&[], 10);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
}

#[tokio::test]
async fn test_denied_and_offsite_links_never_fetched() {
    let mock_server = MockServer::start().await;
    let port = seed(&mock_server).port().expect("mock server has a port");

    let offsite = format!("http://localhost:{}/offsite", port);
    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &"x".repeat(5000),
            &[
                ("/blog/tag/rust", "Rust tag"),
                ("/privacy-policy", "Privacy"),
                (offsite.as_str(), "Elsewhere"),
                ("mailto:team@example.com", "Mail"),
                ("#top", "Top"),
            ],
        ),
    )
    .await;

    for route in ["/blog/tag/rust", "/privacy-policy", "/offsite"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page("Hidden", &"x".repeat(5000), &[]))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&["rust"], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.pages_discovered, 1);
}

#[tokio::test]
async fn test_fetch_errors_become_records() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &"x".repeat(5000),
            &[("/missing", "Missing"), ("/broken", "Broken"), ("/fine", "Fine")],
        ),
    )
    .await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500)).await;
    mount_page(
        &mock_server,
        "/fine",
        html_page("Fine", &"y".repeat(2500), &[]),
    )
    .await;

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.error_count(), 2);

    let errors: Vec<_> = outcome.records.iter().filter(|r| r.fetch_failed).collect();
    for error in &errors {
        assert_eq!(error.title, ERROR_TITLE);
        assert_eq!(error.relevance, 0.0);
        assert!(error.text.starts_with("Failed to fetch content - "));
    }
    assert!(errors.iter().any(|r| r.text.contains("404")));
    assert!(errors.iter().any(|r| r.text.contains("500")));

    // Error records rank last
    assert!(outcome.records[2].fetch_failed);
    assert!(outcome.records[3].fetch_failed);
}

#[tokio::test]
async fn test_timeout_becomes_error_record() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page("Home", &"x".repeat(5000), &[("/slow", "Slow")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/slow",
        html_page("Slow", &"x".repeat(5000), &[])
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 2);
    let slow = outcome
        .records
        .iter()
        .find(|r| r.url.path() == "/slow")
        .expect("slow page has a record");
    assert!(slow.fetch_failed);
    assert!(slow.text.contains("timed out"));
}

#[tokio::test]
async fn test_non_html_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &"x".repeat(5000),
            &[("/manual.pdf", "Manual"), ("/data.json", "Data")],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/manual.pdf",
        ResponseTemplate::new(200).set_body_raw(vec![0x25, 0x50, 0x44, 0x46], "application/pdf"),
    )
    .await;
    mount_page(
        &mock_server,
        "/data.json",
        ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
    )
    .await;

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.error_count(), 0);
}

#[tokio::test]
async fn test_low_relevance_pages_discarded() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page("Home", &"x".repeat(5000), &[("/stub", "Stub")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/stub",
        html_page("Stub", "Short.", &[("/behind-stub", "Behind")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/behind-stub"))
        .respond_with(html_page("Behind", &"x".repeat(5000), &[]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].title, "Home");
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_keywords_rank_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &"Company overview. ".repeat(120),
            &[("/pricing", "Pricing"), ("/team", "Team")],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/pricing",
        html_page(
            "Pricing",
            &"Pricing for every plan, transparent pricing. ".repeat(120),
            &[],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/team",
        html_page("Team", &"Meet the people. ".repeat(130), &[]),
    )
    .await;

    let config = create_test_config(&["pricing"], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records[0].title, "Pricing");
}

#[tokio::test]
async fn test_max_pages_bounds_crawl() {
    let mock_server = MockServer::start().await;

    let links: Vec<(String, String)> = (0..20)
        .map(|i| (format!("/page{}", i), format!("Page {}", i)))
        .collect();
    let links: Vec<(&str, &str)> = links.iter().map(|(h, t)| (h.as_str(), t.as_str())).collect();

    mount_page(&mock_server, "/", html_page("Home", &"x".repeat(5000), &links)).await;
    for i in 0..20 {
        mount_page(
            &mock_server,
            &format!("/page{}", i),
            html_page("Page", &"y".repeat(5000), &links),
        )
        .await;
    }

    let config = create_test_config(&[], 5);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages_discovered, 5);
    assert_eq!(outcome.records.len(), 5);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 5);
}

#[tokio::test]
async fn test_cancelled_crawl_still_reports() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html_page("Home", &"x".repeat(5000), &[])).await;

    let token = CancellationToken::new();
    token.cancel();

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &token)
        .await
        .expect("Crawl failed");

    assert!(outcome.is_interrupted());
    assert!(outcome.records.is_empty());

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let report_path = dir.path().join("report.md");
    write_markdown_report(&outcome, None, &report_path).expect("Failed to write report");

    let report = std::fs::read_to_string(&report_path).expect("Failed to read report");
    assert!(report.contains("- **Status**: interrupted"));
}

#[tokio::test]
async fn test_report_from_live_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page("Home", &"x".repeat(5000), &[("/gone", "Gone")]),
    )
    .await;

    let config = create_test_config(&[], 100);
    let outcome = crawl(&config, &seed(&mock_server), &CancellationToken::new())
        .await
        .expect("Crawl failed");

    let report = format_markdown_report(&outcome, Some("deadbeef"), chrono::Utc::now());

    assert!(report.starts_with(&format!("# Web Scraping Report for {}", outcome.domain)));
    assert!(report.contains("## Home"));
    assert!(report.contains(&format!("## {}/gone", mock_server.uri())));
    assert!(report.find("## Home") < report.find("/gone\n"));
}
