//! Integration tests for request rate limiting on the document endpoint.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_eleventh_request_from_one_ip_is_rate_limited() {
    let app = TestApp::new();
    let ip = "198.51.100.20";

    let slugs = ["board-playbook", "no-such-document", "ghost-file"];
    for i in 0..10 {
        let response = app
            .get_document(slugs[i % slugs.len()], Some("basic-token"), ip)
            .await;
        assert_ne!(response.status, StatusCode::TOO_MANY_REQUESTS, "request {i}");
    }

    let response = app
        .get_document("ultimate-purpose-of-man", Some("basic-token"), ip)
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["errorCode"], "rate_limited");

    let retry_after: u64 = response.header("retry-after").parse().unwrap();
    assert!((1..=60).contains(&retry_after));
    assert_eq!(response.body["retryAfter"], retry_after);

    app.flush_audit().await;
    let events = app.audit.events();
    assert_eq!(events.len(), 11);
    assert_eq!(events[10].status_code, 429);
    assert_eq!(events[10].error_code.as_deref(), Some("rate_limited"));
}

#[tokio::test]
async fn test_malformed_requests_do_not_consume_budget() {
    let app = TestApp::new();
    let ip = "198.51.100.21";

    for _ in 0..5 {
        let response = app.get_document("NOT_A_SLUG", None, ip).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
    for _ in 0..10 {
        let response = app
            .get_document("board-playbook", Some("premium-token"), ip)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .get_document("board-playbook", Some("premium-token"), ip)
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_limits_are_per_address() {
    let app = TestApp::new();

    for _ in 0..11 {
        app.get_document("no-such-document", None, "198.51.100.22")
            .await;
    }

    let other = app
        .get_document("no-such-document", None, "198.51.100.23")
        .await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_limit_spans_addresses() {
    let app = TestApp::new();

    for i in 0..10 {
        let ip = format!("192.0.2.{i}");
        let response = app
            .get_document("no-such-document", Some("premium-token"), &ip)
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    let response = app
        .get_document("no-such-document", Some("premium-token"), "192.0.2.99")
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["errorCode"], "rate_limited");
}

#[tokio::test(start_paused = true)]
async fn test_window_resets() {
    let app = TestApp::new();
    let ip = "198.51.100.24";

    for _ in 0..10 {
        app.get_document("no-such-document", None, ip).await;
    }
    let limited = app.get_document("no-such-document", None, ip).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);

    tokio::time::advance(Duration::from_secs(61)).await;

    let response = app.get_document("no-such-document", None, ip).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forwarded_addresses_ignored_when_proxy_untrusted() {
    let app = TestApp::with_config(|config| config.server.trust_proxy_headers = false);

    for i in 0..10 {
        let response = app
            .get_document("board-playbook", None, &format!("198.51.100.{}", 100 + i))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "request {i}");
    }

    let response = app
        .get_document("board-playbook", None, "198.51.100.200")
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["errorCode"], "rate_limited");
}
