//! Schema migrations for the audit tables.

use sqlx::PgPool;
use tracing::info;

use strongroom_core::error::{AppError, ErrorKind};
use strongroom_core::result::AppResult;

/// Apply pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Audit schema migration failed: {e}"),
                e,
            )
        })?;

    info!("Audit schema up to date");
    Ok(())
}
