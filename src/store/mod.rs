//! Durable key → target URL storage.
//!
//! Defines the [`KeyStore`] trait in the repository style, with two
//! implementations:
//! - [`PgKeyStore`] - PostgreSQL-backed store for production
//! - [`MemoryKeyStore`] - HashMap-backed store for tests and local runs

mod memory;
mod postgres;

pub use memory::MemoryKeyStore;
pub use postgres::PgKeyStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by [`KeyStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from short key to target URL.
///
/// Absence is a valid lookup outcome (`Ok(None)`), distinct from a backend
/// failure (`Err`). Implementations must be thread-safe; each call is
/// individually atomic and callers never span multiple calls with one
/// transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Looks up the target URL stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `target` under `key`, overwriting any previous mapping.
    async fn put(&self, key: &str, target: &str) -> StoreResult<()>;

    /// Reports whether the backend is reachable.
    ///
    /// Used by the health check endpoint.
    async fn health_check(&self) -> bool;
}
