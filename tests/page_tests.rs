//! Integration tests for single-page retrieval

use sitesweep::config::Config;
use sitesweep::fetch::{build_http_client, HostThrottle};
use sitesweep::page::retrieve_page;
use sitesweep::SweepError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Config {
    let mut config = Config::default();
    config.fetch.max_attempts = 1;
    config.fetch.request_timeout_ms = 2_000;
    config.fetch.retry_backoff_ms = 10;
    config.fetch.throttle_interval_ms = 1;
    config
}

#[tokio::test]
async fn test_page_fetched_via_direct_variant() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>hello</body></html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let config = test_config();
    let client = build_http_client(&config.fetch).unwrap();
    let throttle = HostThrottle::new(config.fetch.throttle_interval());

    let page = retrieve_page(&client, &throttle, &config, &format!("{}/article", base))
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.content_type, "text/html; charset=utf-8");
    assert!(page.body.contains("hello"));
}

#[tokio::test]
async fn test_non_textual_content_type_downgraded() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/blob"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8, 1, 2, 3])
                .insert_header("content-type", "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let config = test_config();
    let client = build_http_client(&config.fetch).unwrap();
    let throttle = HostThrottle::new(config.fetch.throttle_interval());

    let page = retrieve_page(&client, &throttle, &config, &format!("{}/blob", base))
        .await
        .unwrap();

    assert_eq!(page.content_type, "text/plain; charset=utf-8");
}

#[tokio::test]
async fn test_total_failure_surfaces_last_error() {
    let mut config = test_config();
    config.fetch.request_timeout_ms = 500;

    let client = build_http_client(&config.fetch).unwrap();
    let throttle = HostThrottle::new(config.fetch.throttle_interval());

    // Port 9 is refused; the proxy fallbacks cannot resolve either in a
    // hermetic test environment, so every candidate fails.
    let result = retrieve_page(&client, &throttle, &config, "http://127.0.0.1:9/page").await;

    match result {
        Err(SweepError::EscalationExhausted { url, .. }) => {
            assert_eq!(url, "http://127.0.0.1:9/page");
        }
        other => panic!("expected EscalationExhausted, got {:?}", other.map(|p| p.status)),
    }
}
