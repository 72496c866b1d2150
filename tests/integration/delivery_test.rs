//! Integration tests for private document delivery.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sha2::{Digest, Sha256};

use helpers::{BRIEFING, PLAYBOOK, PURPOSE, TestApp};

const IP: &str = "203.0.113.7";

#[tokio::test]
async fn test_premium_member_receives_board_playbook() {
    let app = TestApp::new();

    let response = app
        .get_document("board-playbook", Some("premium-token"), IP)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes.as_ref(), PLAYBOOK);

    let expected_hash = hex::encode(Sha256::digest(PLAYBOOK));
    assert_eq!(response.header("x-content-sha256"), expected_hash);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"board-playbook.pdf\""
    );
    assert_eq!(
        response.header("cache-control"),
        "no-store, no-cache, must-revalidate, proxy-revalidate, max-age=0"
    );
    assert_eq!(response.header("pragma"), "no-cache");
    assert_eq!(response.header("expires"), "0");
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("referrer-policy"), "no-referrer");

    app.flush_audit().await;

    let metadata = app.audit.metadata("board-playbook").expect("metadata row");
    assert_eq!(metadata.total_downloads, 1);
    assert_eq!(app.audit.metadata_count(), 1);

    let events = app.audit.events();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert!(event.success);
    assert_eq!(event.status_code, 200);
    assert_eq!(event.file_hash.as_deref(), Some(expected_hash.as_str()));
    assert_eq!(event.member_id.as_deref(), Some("m-premium"));
    assert_eq!(event.email_hash.as_deref(), Some("premium-email-hash"));
    assert!(event.error_code.is_none());

    let ip_hash = event.ip_hash.as_deref().expect("ip hash");
    assert_eq!(ip_hash.len(), 64);
    assert_ne!(ip_hash, IP);
}

#[tokio::test]
async fn test_basic_member_denied_board_playbook() {
    let app = TestApp::new();

    let response = app
        .get_document("board-playbook", Some("basic-token"), IP)
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["ok"], false);
    assert_eq!(response.body["errorCode"], "access_denied");
    assert_eq!(response.body["reason"], "tier_insufficient");
    assert_eq!(response.body["requiredTier"], "premium");
    assert_eq!(response.body["currentTier"], "basic");
    assert!(response.body.get("detail").is_none());
    assert!(response.header("cache-control").contains("no-store"));

    app.flush_audit().await;
    assert!(app.audit.metadata("board-playbook").is_none());

    let events = app.audit.events();
    assert_eq!(events.len(), 1);
    assert!(!events[0].success);
    assert_eq!(events[0].status_code, 403);
    assert_eq!(events[0].error_code.as_deref(), Some("access_denied"));
    assert!(events[0].file_hash.is_none());
}

#[tokio::test]
async fn test_anonymous_caller_needs_session() {
    let app = TestApp::new();

    let response = app.get_document("board-playbook", None, IP).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["errorCode"], "session_invalid");
    assert_eq!(response.body["reason"], "session_invalid");
    assert_eq!(response.body["currentTier"], "public");
}

#[tokio::test]
async fn test_unknown_token_is_anonymous() {
    let app = TestApp::new();

    let response = app
        .get_document("board-playbook", Some("forged-token"), IP)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["errorCode"], "session_invalid");
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let app = TestApp::new();

    let req = Request::builder()
        .uri("/api/private/documents/board-playbook")
        .header("X-Forwarded-For", IP)
        .header("Cookie", "theme=dark; strongroom_session=premium-token")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes.as_ref(), PLAYBOOK);
}

#[tokio::test]
async fn test_explicit_grant_gates_inner_circle() {
    let app = TestApp::new();

    let denied = app
        .get_document("inner-circle-briefing", Some("enterprise-token"), IP)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["reason"], "grant_required");
    assert_eq!(denied.body["requiredTier"], "restricted");

    let granted = app
        .get_document("inner-circle-briefing", Some("granted-token"), IP)
        .await;
    assert_eq!(granted.status, StatusCode::OK);
    assert_eq!(granted.bytes.as_ref(), BRIEFING);
}

#[tokio::test]
async fn test_preview_document_is_inline() {
    let app = TestApp::new();

    let response = app
        .get_document("ultimate-purpose-of-man", Some("basic-token"), IP)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes.as_ref(), PURPOSE);
    assert_eq!(
        response.header("content-disposition"),
        "inline; filename=\"ultimate-purpose-of-man.pdf\""
    );
}

#[tokio::test]
async fn test_failure_taxonomy() {
    let app = TestApp::new();

    let cases = [
        ("no-such-document", StatusCode::NOT_FOUND, "not_found"),
        ("ghost-file", StatusCode::NOT_FOUND, "asset_missing"),
        ("public-canon-overview", StatusCode::FORBIDDEN, "not_applicable"),
        ("Board_Playbook", StatusCode::BAD_REQUEST, "invalid_input"),
    ];

    for (slug, status, code) in cases {
        let response = app.get_document(slug, Some("premium-token"), IP).await;
        assert_eq!(response.status, status, "slug {slug}");
        assert_eq!(response.body["errorCode"], code, "slug {slug}");
        assert_eq!(response.header("pragma"), "no-cache");
    }

    app.flush_audit().await;
    let events = app.audit.events();
    assert_eq!(events.len(), cases.len());
    for event in &events {
        assert!(!event.success);
        assert!(event.error_code.as_deref().is_some_and(|c| !c.is_empty()));
    }
    assert_eq!(app.audit.metadata_count(), 0);
}

#[tokio::test]
async fn test_wrong_method_is_rejected_and_audited() {
    let app = TestApp::new();

    let req = Request::builder()
        .method("POST")
        .uri("/api/private/documents/board-playbook")
        .header("X-Forwarded-For", IP)
        .header("Authorization", "Bearer premium-token")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["errorCode"], "invalid_input");
    assert_eq!(response.header("allow"), "GET");

    app.flush_audit().await;
    let events = app.audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status_code, 405);
}

#[tokio::test]
async fn test_development_mode_exposes_detail() {
    let app = TestApp::with_config(|config| config.delivery.development_mode = true);

    let response = app
        .get_document("no-such-document", Some("premium-token"), IP)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let detail = response.body["detail"].as_str().expect("detail");
    assert!(detail.contains("no-such-document"));
}

#[tokio::test]
async fn test_repeat_downloads_increment_metadata() {
    let app = TestApp::new();

    for _ in 0..2 {
        let response = app
            .get_document("board-playbook", Some("enterprise-token"), IP)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    app.flush_audit().await;
    let metadata = app.audit.metadata("board-playbook").expect("metadata row");
    assert_eq!(metadata.total_downloads, 2);
    assert_eq!(app.audit.metadata_count(), 1);
}

#[tokio::test]
async fn test_audit_outage_does_not_change_response() {
    let app = TestApp::new();
    app.audit.set_failing(true);

    let response = app
        .get_document("board-playbook", Some("premium-token"), IP)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes.as_ref(), PLAYBOOK);

    app.flush_audit().await;
    assert!(app.audit.events().is_empty());
}

#[tokio::test]
async fn test_session_store_outage_is_server_error() {
    let app = TestApp::new();
    app.sessions.set_unavailable(true);

    let response = app
        .get_document("board-playbook", Some("premium-token"), IP)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["errorCode"], "server_error");
    assert_eq!(response.body["error"], "Server error");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["documents"], 5);
    assert_eq!(response.body["data"]["storageAvailable"], true);
}
