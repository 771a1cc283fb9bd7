use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use remediation_operator::{
    alerts::AlertMatcher,
    remediation::{PlaybookExecutor, RemediationRequest, Remediator},
    server::Server,
};

const MARKER: &str = "remediation-ran";

/// Server wired to a real executor whose "playbook" drops a marker file in
/// the working directory, so a launch is observable from the outside.
fn marker_server(workdir: &Path, timeout: Duration) -> TestServer {
    let request = RemediationRequest {
        program: "touch".into(),
        args: vec![OsString::from(MARKER)],
        working_dir: workdir.to_path_buf(),
    };
    build_server(request, timeout)
}

fn build_server(request: RemediationRequest, timeout: Duration) -> TestServer {
    let executor = Arc::new(PlaybookExecutor::new(request, timeout)) as Arc<dyn Remediator>;
    let server = Server::new(AlertMatcher::new("NginxDown"), executor);
    TestServer::new(server.build_router()).unwrap()
}

#[tokio::test]
async fn firing_target_alert_triggers_remediation() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client
        .post("/webhook")
        .json(&json!({
            "status": "firing",
            "alerts": [{ "labels": { "alertname": "NginxDown" } }]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Webhook received!");
    assert!(dir.path().join(MARKER).exists());
}

#[tokio::test]
async fn match_in_later_entry_triggers_remediation() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client
        .post("/webhook")
        .json(&json!({
            "status": "firing",
            "alerts": [
                { "labels": { "alertname": "DiskFull" } },
                { "labels": { "alertname": "NginxDown" } }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(dir.path().join(MARKER).exists());
}

#[tokio::test]
async fn resolved_alert_is_acknowledged_without_remediation() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client
        .post("/webhook")
        .json(&json!({
            "status": "resolved",
            "alerts": [{ "labels": { "alertname": "NginxDown" } }]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Webhook received!");
    assert!(!dir.path().join(MARKER).exists());
}

#[tokio::test]
async fn firing_without_matching_name_is_acknowledged_without_remediation() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client
        .post("/webhook")
        .json(&json!({
            "status": "firing",
            "alerts": [{ "labels": { "alertname": "DiskFull" } }]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!dir.path().join(MARKER).exists());
}

#[tokio::test]
async fn malformed_body_is_acknowledged_not_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client.post("/webhook").text("not valid json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Webhook received!");
    assert!(!dir.path().join(MARKER).exists());
}

#[tokio::test]
async fn get_on_webhook_path_is_method_not_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client.get("/webhook").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn slow_remediation_is_cut_off_and_still_acknowledged() {
    let dir = tempfile::tempdir().unwrap();
    let request = RemediationRequest {
        program: "sleep".into(),
        args: vec![OsString::from("5")],
        working_dir: dir.path().to_path_buf(),
    };
    let client = build_server(request, Duration::from_millis(200));

    let started = std::time::Instant::now();
    let response = client
        .post("/webhook")
        .json(&json!({
            "status": "firing",
            "alerts": [{ "labels": { "alertname": "NginxDown" } }]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Webhook received!");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn missing_binary_is_still_acknowledged() {
    let dir = tempfile::tempdir().unwrap();
    let request = RemediationRequest {
        program: "/nonexistent/definitely-not-a-binary".into(),
        args: vec![],
        working_dir: dir.path().to_path_buf(),
    };
    let client = build_server(request, Duration::from_secs(5));

    let response = client
        .post("/webhook")
        .json(&json!({
            "status": "firing",
            "alerts": [{ "labels": { "alertname": "NginxDown" } }]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Webhook received!");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    let response = client.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn metrics_endpoint_exposes_webhook_counters() {
    let dir = tempfile::tempdir().unwrap();
    let client = marker_server(dir.path(), Duration::from_secs(5));

    client.post("/webhook").text("not valid json").await;

    let response = client.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("remediator_webhooks_received_total"));
    assert!(body.contains("remediator_parse_failures_total"));
}
