use std::time::Duration;

use pretty_assertions::assert_eq;
use roster_feed::{
    FailureKind, FeedClient, FeedSettings, ReqwestFeedClient, EPOCH_HEADER, TOKEN_HEADER,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, route: &str) -> ReqwestFeedClient {
    let settings = FeedSettings {
        endpoint: format!("{}{route}", server.uri()),
        token: "debug-token".to_string(),
        ..FeedSettings::default()
    };
    ReqwestFeedClient::new(settings).expect("client")
}

#[tokio::test]
async fn fetch_sends_token_and_epoch_headers() {
    let server = MockServer::start().await;
    let body = json!({ "error": null, "ts": 6, "diff": { "2": { "h": 50 } } });
    Mock::given(method("GET"))
        .and(path("/monitor/players.json"))
        .and(header(TOKEN_HEADER, "debug-token"))
        .and(header(EPOCH_HEADER, "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "/monitor/players.json");
    let reply = client.fetch(Some("5")).await.expect("fetch ok");
    assert_eq!(reply, body);
}

#[tokio::test]
async fn fetch_without_epoch_omits_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": null, "ts": 1, "data": [] })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, "/players");
    client.fetch(None).await.expect("fetch ok");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get(EPOCH_HEADER).is_none());
    assert_eq!(
        requests[0]
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some("debug-token")
    );
}

#[tokio::test]
async fn fetch_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server, "/missing").fetch(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, "/html").fetch(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidJson);
}

#[tokio::test]
async fn fetch_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "error": null, "ts": 1, "data": [] })),
        )
        .mount(&server)
        .await;

    let settings = FeedSettings {
        endpoint: format!("{}/slow", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..FeedSettings::default()
    };
    let client = ReqwestFeedClient::new(settings).expect("client");

    let err = client.fetch(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetch_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("{\"ts\": 12345}"),
        )
        .mount(&server)
        .await;

    let settings = FeedSettings {
        endpoint: format!("{}/large", server.uri()),
        max_bytes: 10,
        ..FeedSettings::default()
    };
    let client = ReqwestFeedClient::new(settings).expect("client");

    let err = client.fetch(None).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(13)
        }
    );
}

#[test]
fn invalid_endpoint_is_rejected_up_front() {
    let settings = FeedSettings {
        endpoint: "not a url".to_string(),
        ..FeedSettings::default()
    };
    let err = ReqwestFeedClient::new(settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
