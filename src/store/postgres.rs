//! PostgreSQL implementation of the key store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::{KeyStore, StoreResult};

/// Postgres-backed [`KeyStore`] over a single `urls` table.
pub struct PgKeyStore {
    pool: Arc<PgPool>,
}

impl PgKeyStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgKeyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let target = sqlx::query_scalar::<_, String>("SELECT target FROM urls WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(target)
    }

    async fn put(&self, key: &str, target: &str) -> StoreResult<()> {
        // A colliding randomly generated key silently replaces the earlier
        // mapping; key uniqueness is best-effort.
        sqlx::query(
            "INSERT INTO urls (key, target) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET target = EXCLUDED.target",
        )
        .bind(key)
        .bind(target)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
