// These tests exercise the low-level service on its own, checking what it
// reports back before any of it is turned into a validation message.

use mission_control::http::{HTTPClientFactory, HTTPError};
use mission_control::service::{MissionControlService, Service};
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn target(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{path}", server.uri())).expect("invalid target")
}

#[tokio::test]
async fn it_returns_the_status_of_a_head_request() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/api/validate/token/github"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let service = MissionControlService::default();
    let status = service
        .head(target(&server, "/api/validate/token/github"), "t")
        .await
        .unwrap();
    assert_eq!(status, 204);
}

#[tokio::test]
async fn it_returns_error_statuses_of_a_head_request() {
    let server = MockServer::start().await;

    let service = MissionControlService::default();
    let status = service
        .head(target(&server, "/api/validate/token/github"), "t")
        .await
        .unwrap();
    assert_eq!(status, 404);
}

#[tokio::test]
async fn it_reports_unsuccessful_list_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/openshift/clusters"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = MissionControlService::default();
    let result = service
        .get_list(target(&server, "/api/openshift/clusters"), "t")
        .await;
    assert!(matches!(
        result,
        Err(HTTPError::Http(StatusCode::SERVICE_UNAVAILABLE))
    ));
}

#[tokio::test]
async fn it_reports_list_responses_that_are_not_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/openshift/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
        .mount(&server)
        .await;

    let service = MissionControlService::default();
    let result = service
        .get_list(target(&server, "/api/openshift/clusters"), "t")
        .await;
    assert!(matches!(result, Err(HTTPError::Deserialization(_))));
}

#[tokio::test]
async fn it_times_out_slow_requests() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let factory = HTTPClientFactory::default().timeout(Some(Duration::from_millis(100)));
    let service = MissionControlService::new(factory);
    let result = service
        .head(target(&server, "/api/validate/token/github"), "t")
        .await;
    match result {
        Err(HTTPError::Request(err)) => assert!(err.is_timeout(), "{err} is not a timeout"),
        other => panic!("expected a timeout, got {other:?}"),
    }
}
