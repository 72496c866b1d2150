//! Delivery orchestration.
//!
//! One call to [`DeliveryPipeline::deliver`] walks a request through
//! validation, rate limiting, session resolution, document lookup, the
//! privacy-class check, authorization, asset location and the coalesced
//! read. Any failing step short-circuits to auditing; nothing is retried.
//! Every outcome produces exactly one audit event, and a successful one
//! also bumps the document's download counter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use strongroom_auth::{AccessDecisionEngine, SessionResolver};
use strongroom_core::config::delivery::DeliveryConfig;
use strongroom_core::traits::AssetStore;
use strongroom_core::types::{Slug, sha256_hex};
use strongroom_core::{AppError, AppResult};
use strongroom_entity::{AccessContext, AuditEvent, ReasonCode};
use strongroom_storage::AssetLocator;

use super::outcome::{Delivery, DeliveryFailure, Disposition};
use super::request::DeliveryRequest;
use crate::audit::AuditLogger;
use crate::rate_limit::RateLimiter;
use crate::registry::DocumentRegistry;
use crate::single_flight::SingleFlight;

/// Slugs longer than this are cut down before being written to the audit
/// trail.
const AUDIT_SLUG_MAX: usize = 100;

/// Everything the pipeline is wired with.
#[derive(Debug, Clone)]
pub struct DeliveryComponents {
    /// Limiter keyed by `ip:<addr>`.
    pub ip_limiter: Arc<RateLimiter>,
    /// Limiter keyed by `member:<id>`.
    pub member_limiter: Arc<RateLimiter>,
    /// Session resolution.
    pub sessions: SessionResolver,
    /// Registered documents.
    pub registry: Arc<DocumentRegistry>,
    /// Asset storage.
    pub store: Arc<dyn AssetStore>,
    /// Slug → asset path mapping.
    pub locator: AssetLocator,
    /// Read coalescing table.
    pub flights: Arc<SingleFlight>,
    /// Audit queue.
    pub audit: Arc<AuditLogger>,
}

/// Orchestrates one request lifecycle for a private document.
#[derive(Debug, Clone)]
pub struct DeliveryPipeline {
    ip_limiter: Arc<RateLimiter>,
    member_limiter: Arc<RateLimiter>,
    sessions: SessionResolver,
    registry: Arc<DocumentRegistry>,
    engine: AccessDecisionEngine,
    store: Arc<dyn AssetStore>,
    locator: AssetLocator,
    flights: Arc<SingleFlight>,
    audit: Arc<AuditLogger>,
    content_type: String,
    request_timeout: Duration,
}

/// Caller details learned while the request runs, kept for the audit event.
#[derive(Debug, Default)]
struct Trace {
    ctx: Option<AccessContext>,
}

impl DeliveryPipeline {
    /// Wires a pipeline from its components and delivery settings.
    pub fn new(components: DeliveryComponents, config: &DeliveryConfig) -> Self {
        Self {
            ip_limiter: components.ip_limiter,
            member_limiter: components.member_limiter,
            sessions: components.sessions,
            registry: components.registry,
            engine: AccessDecisionEngine::new(),
            store: components.store,
            locator: components.locator,
            flights: components.flights,
            audit: components.audit,
            content_type: config.content_type.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    /// The audit queue this pipeline writes to.
    pub fn audit(&self) -> &Arc<AuditLogger> {
        &self.audit
    }

    /// The document registry this pipeline serves from.
    pub fn registry(&self) -> &Arc<DocumentRegistry> {
        &self.registry
    }

    /// Runs one request to completion and audits the outcome.
    pub async fn deliver(&self, request: DeliveryRequest) -> Result<Delivery, DeliveryFailure> {
        let started = Instant::now();
        let mut trace = Trace::default();

        let outcome = self.run(&request, &mut trace, started).await;
        let latency_ms = started.elapsed().as_millis();

        let ctx = trace.ctx.as_ref();
        let event = AuditEvent::new(audit_slug(&request.slug), status_of(&outcome))
            .with_latency_ms(latency_ms)
            .with_identity(
                ctx.and_then(AccessContext::member_id),
                ctx.and_then(AccessContext::email_hash),
            )
            .with_client(
                request.client.ip_hash(),
                request.client.user_agent.clone(),
                request.client.referrer.clone(),
            );

        match &outcome {
            Ok(delivery) => {
                info!(
                    slug = %request.slug,
                    status = 200,
                    bytes = delivery.bytes.len(),
                    latency_ms = latency_ms as u64,
                    "Document delivered"
                );
                self.audit.record(event.delivered(
                    delivery.file_name.clone(),
                    delivery.bytes.len() as u64,
                    delivery.sha256.clone(),
                ));
                self.audit.bump_metadata(&request.slug);
            }
            Err(failure) => {
                let status = failure.status_code();
                let error_code = failure.error_code();
                if failure.error.kind.is_server_error() {
                    error!(
                        slug = %audit_slug(&request.slug),
                        status,
                        error_code,
                        error = %failure.error,
                        latency_ms = latency_ms as u64,
                        "Document delivery failed"
                    );
                } else {
                    warn!(
                        slug = %audit_slug(&request.slug),
                        status,
                        error_code,
                        reason = failure.reason().map(|r| r.as_str()),
                        latency_ms = latency_ms as u64,
                        "Document delivery refused"
                    );
                }
                let detail = match failure.reason() {
                    Some(reason) => reason.as_str().to_string(),
                    None => failure.error.message.clone(),
                };
                self.audit.record(event.failed(error_code, detail));
            }
        }

        outcome
    }

    async fn run(
        &self,
        request: &DeliveryRequest,
        trace: &mut Trace,
        started: Instant,
    ) -> Result<Delivery, DeliveryFailure> {
        let deadline = started + self.request_timeout;

        // Validating
        if request.method != "GET" {
            return Err(AppError::method_not_allowed(format!(
                "Method {} not allowed",
                request.method
            ))
            .into());
        }
        let slug = Slug::parse(&request.slug)?;

        // RateLimiting
        let ip_key = request.client.rate_limit_key();
        if !self.ip_limiter.allow(&ip_key) {
            return Err(DeliveryFailure::rate_limited(
                AppError::rate_limited("Too many requests from this address"),
                self.ip_limiter.retry_after(&ip_key),
            ));
        }

        // ResolvingSession
        let ctx = within(deadline, "session lookup", self.sessions.resolve(&request.credentials))
            .await?;
        trace.ctx = Some(ctx.clone());

        if let Some(member_id) = ctx.member_id() {
            let member_key = format!("member:{member_id}");
            if !self.member_limiter.allow(&member_key) {
                return Err(DeliveryFailure::rate_limited(
                    AppError::rate_limited("Too many requests for this member"),
                    self.member_limiter.retry_after(&member_key),
                ));
            }
        }

        // ResolvingDocument
        let document = self
            .registry
            .lookup(&slug)
            .ok_or_else(|| AppError::not_found(format!("No document registered for '{slug}'")))?;

        // CheckingPrivacyClass
        if !document.is_private_class() {
            return Err(AppError::not_applicable(format!(
                "'{slug}' is not served by the private delivery path"
            ))
            .into());
        }

        // Authorizing
        let decision = self.engine.authorize(&document, &ctx);
        if !decision.allowed() {
            let error = match decision.reason_code() {
                ReasonCode::SessionInvalid => {
                    AppError::session_invalid("A valid session is required")
                }
                reason => AppError::access_denied(format!(
                    "{} requires {}, caller has {}",
                    slug,
                    decision.required_tier().display_name(),
                    reason_subject(reason, decision.current_tier().display_name()),
                )),
            };
            return Err(DeliveryFailure::denied(error, decision));
        }
        debug!(slug = %slug, tier = %decision.current_tier(), "Access granted");

        // LocatingAsset
        let path = self.locator.locate(&slug);
        let size = within(deadline, "asset stat", self.store.stat(&path)).await?;
        if size.is_none() {
            return Err(AppError::asset_missing(format!("Asset for '{slug}' is not on disk")).into());
        }

        // Fetching
        let store = Arc::clone(&self.store);
        let read_path = path.clone();
        let bytes = within(
            deadline,
            "asset read",
            self.flights.fetch(slug.as_str(), move || async move {
                store.read_all(&read_path).await
            }),
        )
        .await?;
        let sha256 = sha256_hex(&bytes);

        // Streaming
        Ok(Delivery {
            bytes,
            content_type: self.content_type.clone(),
            file_name: self.locator.file_name(&slug),
            disposition: if document.preview_only() {
                Disposition::Inline
            } else {
                Disposition::Attachment
            },
            sha256,
        })
    }
}

/// Awaits `fut` until `deadline`, turning expiry into a timeout error.
async fn within<T>(
    deadline: Instant,
    step: &str,
    fut: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| AppError::timeout(format!("Request deadline exceeded during {step}")))?
}

fn reason_subject(reason: ReasonCode, current: &str) -> String {
    match reason {
        ReasonCode::GrantRequired => format!("{current} without an explicit grant"),
        _ => current.to_string(),
    }
}

fn status_of(outcome: &Result<Delivery, DeliveryFailure>) -> u16 {
    match outcome {
        Ok(_) => 200,
        Err(failure) => failure.status_code(),
    }
}

fn audit_slug(raw: &str) -> String {
    raw.chars().take(AUDIT_SLUG_MAX).collect()
}
