//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run full
//! breadth-first crawls end-to-end through the static HTTP fetcher.

use seo_ripple::config::{Config, FetcherKind};
use seo_ripple::output::{CrawlReport, CrawlStatistics};
use seo_ripple::{Crawler, PageAnalysis};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration using plain HTTP fetching
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.fetcher = FetcherKind::Http;
    config.crawler.navigation_timeout = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

/// Mounts an HTML page at `page_path` that must be requested `times` times
async fn mount_page(server: &MockServer, page_path: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .expect(times)
        .mount(server)
        .await;
}

fn urls(pages: &[PageAnalysis]) -> Vec<&str> {
    pages.iter().map(|p| p.url.as_str()).collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title>
            <meta name="description" content="The home page">
            </head><body>
            <h1>Welcome</h1>
            <img src="logo.png" alt="Logo">
            <a href="{base}/page1">Page 1</a>
            <a href="/page2?ref=home#top">Page 2</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page1",
        r#"<html><head><title>Page 1</title></head><body>
        <h2>First</h2><p>one two three</p>
        <a href="/">Home</a>
        </body></html>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page2",
        concat!(
            r#"<html><head><title>Page 2</title><style>p { margin: 0 }</style></head>"#,
            r#"<body><p> Second page</p><script>track("page2");</script></body></html>"#,
        )
        .to_string(),
        1,
    )
    .await;

    let seed = format!("{base}/");
    let pages = Crawler::new(create_test_config())
        .crawl(&seed, 2)
        .await
        .expect("Crawl should succeed");

    assert_eq!(
        urls(&pages),
        vec![
            seed.as_str(),
            format!("{base}/page1").as_str(),
            format!("{base}/page2").as_str(),
        ]
    );

    let home = &pages[0];
    assert_eq!(home.title, "Home");
    assert_eq!(home.meta_description, "The home page");
    assert_eq!(home.h_tags, vec![("h1".to_string(), "Welcome".to_string())]);
    assert_eq!(home.alt_tags, vec!["Logo".to_string()]);
    assert!(home.word_count > 0);

    assert_eq!(pages[1].title, "Page 1");
    assert_eq!(pages[1].h_tags, vec![("h2".to_string(), "First".to_string())]);

    // Title and paragraph only; style and script bodies are not page text
    assert_eq!(pages[2].word_count, 4);
}

#[tokio::test]
async fn test_depth_limit_respected() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/level1">next</a>"#.to_string(), 1).await;
    mount_page(&server, "/level1", r#"<a href="/level2">next</a>"#.to_string(), 1).await;
    mount_page(&server, "/level2", r#"<a href="/level3">next</a>"#.to_string(), 0).await;

    let pages = Crawler::new(create_test_config())
        .crawl(&format!("{base}/"), 1)
        .await
        .expect("Crawl should succeed");

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].url, format!("{base}/level1"));
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/ok">OK</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&server, "/ok", "<title>OK</title>".to_string(), 1).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let pages = Crawler::new(create_test_config())
        .crawl(&format!("{base}/"), 2)
        .await
        .expect("Crawl should succeed");

    assert_eq!(
        urls(&pages),
        vec![format!("{base}/").as_str(), format!("{base}/ok").as_str()]
    );
}

#[tokio::test]
async fn test_out_of_scope_links_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let base = server.uri();

    // 127.0.0.1 and localhost are different hosts, so the second server is
    // out of scope even though it runs on the same machine
    let other_url = other.uri().replace("127.0.0.1", "localhost");

    mount_page(
        &server,
        "/",
        format!(
            r#"<a href="{other_url}/external">External</a>
            <a href="mailto:someone@example.com">Mail</a>
            <a href="javascript:void(0)">JS</a>"#
        ),
        1,
    )
    .await;
    mount_page(&other, "/external", "<title>External</title>".to_string(), 0).await;

    let pages = Crawler::new(create_test_config())
        .crawl(&format!("{base}/"), 3)
        .await
        .expect("Crawl should succeed");

    assert_eq!(urls(&pages), vec![format!("{base}/").as_str()]);
}

#[tokio::test]
async fn test_max_pages_cap() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&server, "/a", "<title>A</title>".to_string(), 1).await;
    mount_page(&server, "/b", "<title>B</title>".to_string(), 0).await;
    mount_page(&server, "/c", "<title>C</title>".to_string(), 0).await;

    let mut config = create_test_config();
    config.crawler.max_pages = Some(2);

    let pages = Crawler::new(config)
        .crawl(&format!("{base}/"), 2)
        .await
        .expect("Crawl should succeed");

    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pages = Crawler::new(create_test_config())
        .crawl(&format!("{base}/"), 2)
        .await
        .expect("Crawl should succeed");

    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_report_and_statistics_from_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        concat!(
            r#"<html><head><title>Home</title></head>"#,
            r#"<body><h1>Hi</h1><a href="/bare">x</a></body></html>"#,
        )
        .to_string(),
        1,
    )
    .await;
    mount_page(&server, "/bare", "<p>no title here</p>".to_string(), 1).await;

    let seed = format!("{base}/");
    let started_at = chrono::Utc::now();
    let pages = Crawler::new(create_test_config())
        .crawl(&seed, 1)
        .await
        .expect("Crawl should succeed");

    let stats = CrawlStatistics::from_pages(&pages);
    assert_eq!(stats.total_pages, 2);
    assert_eq!(stats.missing_title, vec![format!("{base}/bare")]);
    assert_eq!(stats.missing_h1, vec![format!("{base}/bare")]);

    let report = CrawlReport {
        seed_url: seed,
        max_depth: 1,
        started_at,
        finished_at: chrono::Utc::now(),
        pages,
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["pages"].as_array().unwrap().len(), 2);
}
