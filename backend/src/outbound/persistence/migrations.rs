//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::DocumentStoreError;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a short-lived synchronous connection.
///
/// Runs on the blocking pool so the async runtime is never stalled.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), DocumentStoreError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| DocumentStoreError::connection(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| DocumentStoreError::query(format!("migration failed: {err}")))
    })
    .await
    .map_err(|err| DocumentStoreError::query(format!("migration task failed: {err}")))??;
    info!(applied, "database migrations applied");
    Ok(())
}
