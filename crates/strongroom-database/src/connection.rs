//! PostgreSQL connection pool for the audit trail.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use strongroom_core::config::DatabaseConfig;
use strongroom_core::error::{AppError, ErrorKind};
use strongroom_core::result::AppResult;

use crate::migration;

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect using the configured pool limits and apply pending migrations.
    pub async fn connect_and_migrate(config: &DatabaseConfig) -> AppResult<Self> {
        let db = Self::connect(config).await?;
        migration::run_migrations(&db.pool).await?;
        Ok(db)
    }

    /// Connect using the configured pool limits.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %redact_credentials(&config.url),
            max_connections = config.max_connections,
            "Connecting to audit database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to audit database: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// A clone of the underlying pool handle.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Audit database pool closed");
    }
}

/// Replace the password in a connection URL with `****` for logging.
fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_credentials() {
        assert_eq!(
            redact_credentials("postgres://audit:s3cret@db:5432/strongroom"),
            "postgres://audit:****@db:5432/strongroom"
        );
        assert_eq!(
            redact_credentials("postgres://db:5432/strongroom"),
            "postgres://db:5432/strongroom"
        );
        assert_eq!(
            redact_credentials("postgres://audit@db/strongroom"),
            "postgres://audit@db/strongroom"
        );
    }
}
