use sqlx::Connection;
use time::OffsetDateTime;

use crate::{Database, StoreError};

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    module TEXT NOT NULL,
    id TEXT NOT NULL,
    applied_at TEXT NOT NULL,
    PRIMARY KEY (module, id)
)";

/// Schema change contributed by a module.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

impl Database {
    /// Apply every migration not yet recorded in the ledger.
    ///
    /// Each migration runs in its own transaction together with its ledger
    /// row. Returns how many were applied by this call.
    pub async fn run_migrations(
        &self,
        migrations: &[(String, Migration)],
    ) -> Result<usize, StoreError> {
        let mut conn = self.acquire().await?;
        sqlx::query(CREATE_LEDGER).execute(&mut *conn).await?;

        let mut applied = 0;
        for (module, migration) in migrations {
            let seen: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM schema_migrations WHERE module = ? AND id = ?",
            )
            .bind(module)
            .bind(migration.id)
            .fetch_one(&mut *conn)
            .await?;

            if seen > 0 {
                tracing::debug!(module = %module, migration = migration.id, "migration already applied");
                continue;
            }

            let mut tx = conn.begin().await?;
            sqlx::raw_sql(migration.up).execute(&mut *tx).await?;
            sqlx::query("INSERT INTO schema_migrations (module, id, applied_at) VALUES (?, ?, ?)")
                .bind(module)
                .bind(migration.id)
                .bind(OffsetDateTime::now_utc())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            tracing::info!(module = %module, migration = migration.id, "applied migration");
            applied += 1;
        }

        Ok(applied)
    }
}
