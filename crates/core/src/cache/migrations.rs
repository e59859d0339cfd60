//! Schema versions for the cache store.
//!
//! `_schema_version` records every version applied so far. Each pending
//! version runs in its own transaction together with its version row, so a
//! store is never left half way between two versions.

use super::Error;
use tokio_rusqlite::{Connection, params};

/// Schema steps in the order they must be applied.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, include_str!("../../migrations/001_caches.sql")),
    (2, include_str!("../../migrations/002_preferences.sql")),
];

/// Bring the store up to the latest schema version.
///
/// # Errors
///
/// Returns `MIGRATION_FAILED` naming the version whose SQL did not apply.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    let applied = conn
        .call(|conn| -> Result<Vec<u32>, Error> {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS _schema_version (
                    version INTEGER PRIMARY KEY,
                    applied_at TEXT NOT NULL
                )",
                [],
            )?;

            let current: u32 =
                conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _schema_version", [], |row| row.get(0))?;

            let mut applied = Vec::new();
            for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > current) {
                let tx = conn.transaction()?;
                tx.execute_batch(sql)
                    .map_err(|e| Error::MigrationFailed(format!("version {version}: {e}")))?;
                tx.execute(
                    "INSERT INTO _schema_version (version, applied_at) VALUES (?1, ?2)",
                    params![version, chrono::Utc::now().to_rfc3339()],
                )?;
                tx.commit()?;
                applied.push(*version);
            }

            Ok(applied)
        })
        .await
        .map_err(Error::from)?;

    if !applied.is_empty() {
        tracing::info!(?applied, "cache store schema upgraded");
    }
    Ok(())
}
