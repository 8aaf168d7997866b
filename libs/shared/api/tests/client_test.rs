use assert_matches::assert_matches;
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_api::ApiClient;
use shared_config::ApiConfig;
use shared_models::ClientError;

fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        session_file: std::path::PathBuf::from("/tmp/unused-session.json"),
    }
}

#[tokio::test]
async fn unwraps_successful_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": "doc-1"}]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&test_config(&mock_server.uri()));
    let doctors: Vec<serde_json::Value> = client
        .request(Method::GET, "/doctors", Some("token-1"), None)
        .await
        .unwrap();

    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["id"], "doc-1");
}

#[tokio::test]
async fn success_false_is_rejected_even_on_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "slot no longer available"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&test_config(&mock_server.uri()));
    let result: Result<serde_json::Value, _> = client
        .request(
            Method::POST,
            "/appointments",
            Some("token-1"),
            Some(json!({"doctorId": "doc-1"})),
        )
        .await;

    assert_matches!(result, Err(ClientError::Rejected(m)) if m == "slot no longer available");
}

#[tokio::test]
async fn non_2xx_maps_to_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&test_config(&mock_server.uri()));
    let result: Result<Vec<serde_json::Value>, _> = client
        .request(Method::GET, "/appointments", Some("token-1"), None)
        .await;

    assert_matches!(result, Err(ClientError::Http { status: 500, .. }));
}

#[tokio::test]
async fn requests_without_token_carry_no_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"ok": true}
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&test_config(&mock_server.uri()));
    let body: serde_json::Value = client
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"email": "p@example.com", "password": "pw"})),
        )
        .await
        .unwrap();

    assert_eq!(body["ok"], true);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
