//! Tests for the HTTP client module

use super::*;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("jwt-paginator/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query_pairs(vec![
            ("status".to_string(), "open".to_string()),
            ("status".to_string(), "closed".to_string()),
        ])
        .headers(HashMap::from([(
            "X-Request-Id".to_string(),
            "abc123".to_string(),
        )]))
        .form_field("username", "joe")
        .form_field("password", "secret");

    assert_eq!(
        config.query,
        vec![
            ("status".to_string(), "open".to_string()),
            ("status".to_string(), "closed".to_string()),
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.form.as_ref().map(Vec::len), Some(2));
}

fn default_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::default()).unwrap()
}

#[tokio::test]
async fn test_get_with_query_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/"))
        .and(query_param("limit", "2"))
        .and(header("Authorization", "Bearer tok"))
        .and(header("User-Agent", "test-agent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder().user_agent("test-agent/1.0").build(),
    )
    .unwrap();

    let response = client
        .get_with_config(
            &format!("{}/api/items/", mock_server.uri()),
            RequestConfig::new()
                .query_pairs(vec![("limit".to_string(), "2".to_string())])
                .headers(HashMap::from([(
                    "Authorization".to_string(),
                    "Bearer tok".to_string(),
                )])),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_post_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=joe"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "tok"
        })))
        .mount(&mock_server)
        .await;

    let client = default_client();
    let response = client
        .post_with_config(
            &format!("{}/api/token/", mock_server.uri()),
            RequestConfig::new()
                .form_field("username", "joe")
                .form_field("password", "secret"),
        )
        .await
        .unwrap();

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["access"], "tok");
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/protected"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&mock_server)
        .await;

    let client = default_client();
    let response = client
        .get_with_config(
            &format!("{}/api/protected", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(body_text(response).await, "expired");
}

#[tokio::test]
async fn test_timeout_is_an_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .timeout(Duration::from_millis(50))
            .build(),
    )
    .unwrap();
    let result = client
        .get_with_config(
            &format!("{}/api/slow", mock_server.uri()),
            RequestConfig::new(),
        )
        .await;

    match result {
        Err(crate::Error::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}
