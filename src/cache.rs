//! Time-bounded in-memory cache for resolved redirect targets.
//!
//! [`RedirectCache`] wraps the redirect-resolving handler. A cache hit
//! answers with `302 Found` immediately, touching neither the store nor the
//! wrapped handler. On a miss the wrapped handler runs as usual, then the
//! store is re-read for the same key: a non-empty target is cached and a
//! one-shot expiry task is scheduled for it. The cache never decides on its
//! own what a key resolves to; it only remembers what the store most
//! recently reported.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::response::Response;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::handlers::found;
use crate::routing::{Handler, HandlerFuture};
use crate::store::KeyStore;

/// Errors raised while constructing a [`RedirectCache`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache TTL must be a positive duration")]
    ZeroTtl,
}

/// Caching wrapper around a redirect-resolving handler.
///
/// Owns the entry map and the per-entry expiry tasks; the wrapped handler
/// and the store are referenced, not owned. All map access goes through one
/// mutex, and the critical sections never await foreign futures.
pub struct RedirectCache {
    inner: Handler,
    store: Arc<dyn KeyStore>,
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl RedirectCache {
    /// Wraps `inner` with a cache whose entries live for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ZeroTtl`] for a zero duration. This is a
    /// configuration error and fails startup.
    pub fn new(inner: Handler, store: Arc<dyn KeyStore>, ttl: Duration) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::ZeroTtl);
        }

        Ok(Self {
            inner,
            store,
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Serves a redirect request, consulting the cache first.
    pub async fn handle(&self, req: Request) -> Response {
        let key = req.uri().path().trim_start_matches('/').to_owned();

        let cached = self.entries.lock().await.get(&key).cloned();
        if let Some(target) = cached {
            debug!(%key, "cache hit");
            return found(&target);
        }

        let response = (self.inner)(req).await;

        // The resolver owns the response; afterwards the store is re-read to
        // learn what target (if any) now exists under the key. A failed
        // re-read is treated as absent and never propagated.
        match self.store.get(&key).await {
            Ok(Some(target)) => {
                self.entries.lock().await.insert(key.clone(), target);
                self.schedule_expiry(key);
            }
            Ok(None) => {}
            Err(e) => warn!(%key, error = %e, "store re-read failed, skipping cache fill"),
        }

        response
    }

    /// Schedules a one-shot task that removes `key` after the TTL elapses.
    ///
    /// Expiry is fixed from insertion and not refreshed on hits. Removing a
    /// key that is already gone (re-insert race, duplicate timer) is a no-op.
    fn schedule_expiry(&self, key: String) {
        let entries = Arc::clone(&self.entries);
        let ttl = self.ttl;

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            entries.lock().await.remove(&key);
            debug!(%key, "cache entry expired");
        });
    }

    /// Converts the cache into a [`Handler`] registrable with the router.
    pub fn into_handler(self) -> Handler {
        let cache = Arc::new(self);
        Arc::new(move |req| {
            let cache = Arc::clone(&cache);
            Box::pin(async move { cache.handle(req).await }) as HandlerFuture
        })
    }
}
