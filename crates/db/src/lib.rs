//! SQLite connection provider and migration tooling for shelf.
//!
//! The [`Database`] handle is built once at process start from
//! [`DatabaseSettings`] and cloned into every module that touches storage.
//! Handlers take one scoped connection per request with [`Database::acquire`];
//! the connection goes back to the provider when the guard is dropped.

mod error;
mod migrate;

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

pub use error::StoreError;
pub use migrate::Migration;

/// Connection settings for the relational store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_url")]
    pub url: String,
    #[serde(default = "DatabaseSettings::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "DatabaseSettings::default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

impl DatabaseSettings {
    fn default_url() -> String {
        "sqlite:shelf.db?mode=rwc".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_acquire_timeout_ms() -> u64 {
        30_000
    }

    /// Settings pointing at a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// Whether the URL names an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_ms: Self::default_acquire_timeout_ms(),
        }
    }
}

/// Shared handle to the configured database endpoint.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the provider described by `settings`.
    ///
    /// In-memory databases live only as long as their connection, so they are
    /// pinned to a single connection that is never recycled.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&settings.url)?.foreign_keys(true);

        let mut pool = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms));
        pool = if settings.is_in_memory() {
            pool.max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool.max_connections(settings.max_connections)
        };

        let pool = pool.connect_with(options).await?;

        tracing::info!(
            target: "shelf-db",
            url = %settings.url,
            in_memory = settings.is_in_memory(),
            "database connection provider ready"
        );

        Ok(Self { pool })
    }

    /// Take a connection for the duration of one request.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        Ok(self.pool.acquire().await?)
    }

    /// Round-trip a trivial statement to prove the store is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// Close every connection held by the provider.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
