//! Strongroom Server: access-gated private document delivery
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use strongroom_api::AppState;
use strongroom_auth::{JwtSessionStore, SessionResolver};
use strongroom_core::config::AppConfig;
use strongroom_core::error::AppError;
use strongroom_core::traits::AssetStore;
use strongroom_database::{AuditSink, DatabasePool, MemoryAuditStore, PgAuditRepository};
use strongroom_service::{
    AuditLogger, DeliveryComponents, DeliveryPipeline, DocumentRegistry, RateLimiter, SingleFlight,
};
use strongroom_storage::{AssetLocator, LocalAssetStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("STRONGROOM_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("STRONGROOM_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Strongroom v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Document registry ────────────────────────────────
    let registry = Arc::new(DocumentRegistry::from_entries(&config.documents)?);
    tracing::info!(documents = registry.len(), "Document registry loaded");
    for document in registry.iter() {
        tracing::debug!(
            slug = %document.slug(),
            min_tier = %document.min_tier(),
            private = document.is_private_class(),
            grant = document.requires_explicit_grant(),
            "Registered document"
        );
    }

    // ── Step 2: Asset storage ────────────────────────────────────
    let store = LocalAssetStore::new(&config.delivery.asset_root);
    tracing::info!(
        provider = store.provider_type(),
        root = %config.delivery.asset_root,
        "Asset store initialized"
    );
    if !store.health_check().await? {
        tracing::warn!(
            root = %config.delivery.asset_root,
            "Asset root is not readable; every delivery will fail"
        );
    }
    let store: Arc<dyn AssetStore> = Arc::new(store);

    // ── Step 3: Audit sink ───────────────────────────────────────
    let (sink, db): (Arc<dyn AuditSink>, Option<DatabasePool>) =
        match config.audit.backend.as_str() {
            "memory" => (Arc::new(MemoryAuditStore::new()), None),
            "postgres" => {
                tracing::info!("Connecting to database...");
                let db = DatabasePool::connect_and_migrate(&config.database).await?;
                tracing::info!("Database migrations complete");
                (Arc::new(PgAuditRepository::new(db.pool())), Some(db))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown audit backend '{other}'"
                )));
            }
        };
    tracing::info!(backend = sink.backend(), "Audit sink ready");
    let audit = Arc::new(AuditLogger::spawn(sink, config.audit.queue_capacity));

    // ── Step 4: Sessions ─────────────────────────────────────────
    if config.auth.uses_default_secret() {
        if config.delivery.development_mode {
            tracing::warn!(
                "auth.jwt_secret is the built-in default; set a real secret before deploying"
            );
        } else {
            return Err(AppError::configuration(
                "auth.jwt_secret is the built-in default; set STRONGROOM__AUTH__JWT_SECRET",
            ));
        }
    }
    let sessions = SessionResolver::new(Arc::new(JwtSessionStore::new(&config.auth)));

    // ── Step 5: Rate limiters ────────────────────────────────────
    let ip_limiter = Arc::new(RateLimiter::new("ip", &config.rate_limit));
    let member_limiter = Arc::new(RateLimiter::new("member", &config.rate_limit));

    // ── Step 6: Delivery pipeline ────────────────────────────────
    let pipeline = Arc::new(DeliveryPipeline::new(
        DeliveryComponents {
            ip_limiter: Arc::clone(&ip_limiter),
            member_limiter: Arc::clone(&member_limiter),
            sessions,
            registry,
            store: Arc::clone(&store),
            locator: AssetLocator::new(config.delivery.file_name_template.clone()),
            flights: Arc::new(SingleFlight::new()),
            audit: Arc::clone(&audit),
        },
        &config.delivery,
    ));

    // ── Step 7: Shutdown channel & sweepers ──────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweep_interval = config.rate_limit.sweep_interval();
    let sweepers = [
        ip_limiter.spawn_sweeper(sweep_interval, shutdown_rx.clone()),
        member_limiter.spawn_sweeper(sweep_interval, shutdown_rx.clone()),
    ];

    // ── Step 8: Build and start HTTP server ──────────────────────
    let state = AppState::new(Arc::new(config.clone()), pipeline, store);
    let app = strongroom_api::build_app(state);

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    strongroom_api::serve(app, &config.server, shutdown_rx).await?;

    // ── Step 9: Drain background tasks ───────────────────────────
    tracing::info!("Waiting for background tasks to complete...");
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    for handle in sweepers {
        let _ = tokio::time::timeout(grace, handle).await;
    }
    if tokio::time::timeout(grace, audit.shutdown()).await.is_err() {
        tracing::warn!("Audit queue did not drain before the grace period ended");
    }
    if audit.dropped() > 0 {
        tracing::warn!(dropped = audit.dropped(), "Audit records were dropped");
    }
    if let Some(db) = db {
        db.close().await;
    }

    tracing::info!("Strongroom server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
