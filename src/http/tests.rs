//! Tests for the HTTP module

use super::*;
use crate::error::Error;
use crate::operation::{OperationDescriptor, TokenPaths};
use crate::transport::Transport;
use crate::types::{BackoffType, Method};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> HttpConfig {
    let mut config = HttpConfig::new(Url::parse(&server.uri()).unwrap());
    config.retry = RetryPolicy {
        max_retries: 2,
        backoff: BackoffType::Constant,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_secs(1),
    };
    config
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(config_for(server)).unwrap()
}

fn get(route: &str) -> OperationDescriptor {
    OperationDescriptor::new("Get").with_route(Method::GET, route)
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = HttpConfig::new(Url::parse("https://api.example.com").unwrap());
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.retry, RetryPolicy::default());
    assert_eq!(config.retry.max_retries, 3);
    assert!(config.rate_limit.is_none());
}

#[test]
fn test_invalid_header_is_config_error() {
    let mut config = HttpConfig::new(Url::parse("https://api.example.com").unwrap());
    config.headers.insert("bad header".into(), "x".into());
    assert!(matches!(HttpClient::new(config), Err(Error::Config { .. })));
}

#[test]
fn test_endpoint_keeps_base_path() {
    let config = HttpConfig::new(Url::parse("https://api.example.com/v1/").unwrap());
    let client = HttpClient::new(config).unwrap();

    assert_eq!(
        client.endpoint("/tables").unwrap().as_str(),
        "https://api.example.com/v1/tables"
    );
    assert_eq!(
        client.endpoint("tables/items").unwrap().as_str(),
        "https://api.example.com/v1/tables/items"
    );
}

// ============================================================================
// Retry Policy
// ============================================================================

#[test]
fn test_backoff_curves() {
    let policy = |backoff| RetryPolicy {
        max_retries: 5,
        backoff,
        initial_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_millis(500),
    };

    assert_eq!(policy(BackoffType::Constant).backoff(3), Duration::from_millis(100));
    assert_eq!(policy(BackoffType::Linear).backoff(1), Duration::from_millis(200));
    assert_eq!(policy(BackoffType::Exponential).backoff(2), Duration::from_millis(400));
    // capped
    assert_eq!(policy(BackoffType::Exponential).backoff(6), Duration::from_millis(500));
    assert_eq!(policy(BackoffType::Linear).backoff(u32::MAX), Duration::from_millis(500));
}

#[test]
fn test_retry_after_overrides_backoff() {
    let policy = RetryPolicy::default();
    let limited = Error::RateLimited {
        retry_after_seconds: Some(2),
    };
    let unhinted = Error::RateLimited {
        retry_after_seconds: None,
    };

    assert_eq!(policy.delay(&limited, 0), Duration::from_secs(2));
    assert_eq!(policy.delay(&unhinted, 1), policy.backoff(1));
}

#[test]
fn test_should_retry() {
    let policy = RetryPolicy {
        max_retries: 1,
        ..RetryPolicy::default()
    };
    let server_error = Error::http_status(503, "");

    assert!(policy.should_retry(&server_error, 0));
    assert!(!policy.should_retry(&server_error, 1));
    assert!(!policy.should_retry(&Error::http_status(400, ""), 0));
}

// ============================================================================
// Execute
// ============================================================================

#[tokio::test]
async fn test_execute_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(header("X-Api-Version", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [1, 2]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.headers.insert("X-Api-Version".into(), "2".into());
    let client = HttpClient::new(config).unwrap();

    let body = client.execute(&get("/items"), &json!({})).await.unwrap();
    assert_eq!(body, json!({"items": [1, 2]}));
}

#[tokio::test]
async fn test_execute_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .execute(&get("/missing"), &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, ref body } if body == "Not found"));
}

#[tokio::test]
async fn test_execute_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let body = client_for(&mock_server)
        .execute(&get("/flaky"), &json!({}))
        .await
        .unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_execute_honours_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "1")
                .set_body_string("slow down"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let started = std::time::Instant::now();
    let body = client_for(&mock_server)
        .execute(&get("/limited"), &json!({}))
        .await
        .unwrap();

    assert_eq!(body, json!({"ok": true}));
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_execute_gives_up_with_last_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/always-fail"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .execute(&get("/always-fail"), &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, ref body } if body == "Server error"));
}

#[tokio::test]
async fn test_execute_rate_limited_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.retry.max_retries = 0;
    let err = HttpClient::new(config)
        .unwrap()
        .execute(&get("/limited"), &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: None
        }
    ));
}

#[tokio::test]
async fn test_execute_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.timeout = Duration::from_millis(50);
    config.retry.max_retries = 0;
    let err = HttpClient::new(config)
        .unwrap()
        .execute(&get("/slow"), &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_execute_paced_by_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.rate_limit = Some(RateLimiterConfig::new(5, 1));
    let client = HttpClient::new(config).unwrap();

    let started = std::time::Instant::now();
    client.execute(&get("/items"), &json!({})).await.unwrap();
    client.execute(&get("/items"), &json!({})).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(150));
}

// ============================================================================
// Transport
// ============================================================================

#[test]
fn test_query_pairs() {
    let mut pairs = query_pairs(&json!({
        "limit": 10,
        "startToken": "abc",
        "skip": null,
        "tags": ["a", "b"],
        "flag": true,
        "filter": {"kind": "x"}
    }));
    pairs.sort();

    assert_eq!(
        pairs,
        vec![
            ("filter".to_string(), r#"{"kind":"x"}"#.to_string()),
            ("flag".to_string(), "true".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("startToken".to_string(), "abc".to_string()),
            ("tags".to_string(), "a,b".to_string()),
        ]
    );
    assert!(query_pairs(&json!("scalar")).is_empty());
}

#[tokio::test]
async fn test_transport_get_uses_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("startToken", "abc"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [3]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = client_for(&mock_server);
    let body = transport
        .send(&get("/items"), &json!({"startToken": "abc", "limit": 2}))
        .await
        .unwrap();
    assert_eq!(body, json!({"items": [3]}));
}

#[tokio::test]
async fn test_transport_post_uses_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scan"))
        .and(body_json(json!({"ExclusiveStartKey": {"id": 7}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let operation = OperationDescriptor::new("Scan")
        .with_route(Method::POST, "/scan")
        .with_pagination(TokenPaths::new(["ExclusiveStartKey"], ["LastEvaluatedKey"]).unwrap())
        .unwrap();
    let transport = client_for(&mock_server);

    let body = transport
        .send(&operation, &json!({"ExclusiveStartKey": {"id": 7}}))
        .await
        .unwrap();
    assert_eq!(body, json!({"Items": []}));
}

#[tokio::test]
async fn test_transport_invalid_json_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = client_for(&mock_server);
    let err = transport.send(&get("/html"), &json!({})).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(!err.is_retryable());
}
