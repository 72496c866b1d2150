//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use strongroom_api::AppState;
use strongroom_auth::{MemorySessionStore, Session, SessionResolver};
use strongroom_core::config::AppConfig;
use strongroom_core::config::registry::DocumentEntry;
use strongroom_core::traits::AssetStore;
use strongroom_database::MemoryAuditStore;
use strongroom_entity::Tier;
use strongroom_service::{
    AuditLogger, DeliveryComponents, DeliveryPipeline, DocumentRegistry, RateLimiter, SingleFlight,
};
use strongroom_storage::{AssetLocator, LocalAssetStore};

/// Asset bytes for `board-playbook`.
pub const PLAYBOOK: &[u8] = b"%PDF-1.7\n% board playbook\n";

/// Asset bytes for `ultimate-purpose-of-man`.
pub const PURPOSE: &[u8] = b"%PDF-1.7\n% purpose preview\n";

/// Asset bytes for `inner-circle-briefing`.
pub const BRIEFING: &[u8] = b"%PDF-1.7\n% inner circle\n";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state the router was built with
    pub state: AppState,
    /// Session store backing the bearer tokens below
    pub sessions: MemorySessionStore,
    /// Audit sink the pipeline writes to
    pub audit: MemoryAuditStore,
    _assets: TempDir,
}

impl TestApp {
    /// Create a test application with default settings.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application, letting the caller adjust the config
    /// before anything is wired.
    ///
    /// Registered documents:
    /// - `board-playbook`: premium or enterprise
    /// - `ultimate-purpose-of-man`: basic and up, preview only
    /// - `inner-circle-briefing`: enterprise or restricted, explicit grant
    /// - `ghost-file`: basic and up, no asset on disk
    /// - `public-canon-overview`: public, not private
    ///
    /// Bearer tokens: `basic-token`, `premium-token`, `enterprise-token`,
    /// `granted-token` (enterprise with private override).
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let assets = tempfile::tempdir().expect("Failed to create asset dir");
        std::fs::write(assets.path().join("board-playbook.pdf"), PLAYBOOK)
            .expect("Failed to write asset");
        std::fs::write(assets.path().join("ultimate-purpose-of-man.pdf"), PURPOSE)
            .expect("Failed to write asset");
        std::fs::write(assets.path().join("inner-circle-briefing.pdf"), BRIEFING)
            .expect("Failed to write asset");

        let mut config = AppConfig::default();
        config.delivery.asset_root = assets.path().display().to_string();
        config.documents = vec![
            entry("board-playbook", &["premium", "enterprise"], |_| {}),
            entry("ultimate-purpose-of-man", &["basic"], |e| e.preview_only = true),
            entry("inner-circle-briefing", &["enterprise", "restricted"], |e| {
                e.requires_explicit_grant = true
            }),
            entry("ghost-file", &["basic"], |_| {}),
            entry("public-canon-overview", &["public"], |e| e.private = false),
        ];
        adjust(&mut config);

        let sessions = MemorySessionStore::new();
        sessions.insert("basic-token", Session::member("m-basic", Tier::Basic));
        sessions.insert(
            "premium-token",
            Session::member("m-premium", Tier::Premium).with_email_hash("premium-email-hash"),
        );
        sessions.insert(
            "enterprise-token",
            Session::member("m-enterprise", Tier::Enterprise),
        );
        sessions.insert(
            "granted-token",
            Session::member("m-granted", Tier::Enterprise).with_private(true),
        );

        let audit = MemoryAuditStore::new();
        let registry =
            DocumentRegistry::from_entries(&config.documents).expect("Failed to load registry");
        let store: Arc<dyn AssetStore> =
            Arc::new(LocalAssetStore::new(&config.delivery.asset_root));

        let pipeline = DeliveryPipeline::new(
            DeliveryComponents {
                ip_limiter: Arc::new(RateLimiter::new("ip", &config.rate_limit)),
                member_limiter: Arc::new(RateLimiter::new("member", &config.rate_limit)),
                sessions: SessionResolver::new(Arc::new(sessions.clone())),
                registry: Arc::new(registry),
                store: Arc::clone(&store),
                locator: AssetLocator::new(config.delivery.file_name_template.clone()),
                flights: Arc::new(SingleFlight::new()),
                audit: Arc::new(AuditLogger::spawn(
                    Arc::new(audit.clone()),
                    config.audit.queue_capacity,
                )),
            },
            &config.delivery,
        );

        let state = AppState::new(Arc::new(config), Arc::new(pipeline), store);
        let router = strongroom_api::build_app(state.clone());

        Self {
            router,
            state,
            sessions,
            audit,
            _assets: assets,
        }
    }

    /// GET a document from `ip`, optionally with a bearer token.
    pub async fn get_document(&self, slug: &str, token: Option<&str>, ip: &str) -> TestResponse {
        let mut req = Request::builder()
            .method("GET")
            .uri(format!("/api/private/documents/{slug}"))
            .header("X-Forwarded-For", ip)
            .header("User-Agent", "strongroom-tests");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        self.send(req.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// Send an arbitrary request through the router.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Wait until every queued audit record has reached the sink.
    pub async fn flush_audit(&self) {
        self.state.pipeline.audit().flush().await;
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Body parsed as JSON, `Null` for binary bodies
    pub body: Value,
}

impl TestResponse {
    /// A header as text, panicking if absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .expect("non-text header")
    }
}

fn entry(slug: &str, tiers: &[&str], adjust: impl FnOnce(&mut DocumentEntry)) -> DocumentEntry {
    let mut entry = DocumentEntry {
        slug: slug.to_string(),
        title: String::new(),
        tiers: tiers.iter().map(|t| t.to_string()).collect(),
        requires_explicit_grant: false,
        preview_only: false,
        private: true,
    };
    adjust(&mut entry);
    entry
}
