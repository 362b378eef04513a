#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use snip::routes::build_router;
use snip::state::AppState;
use snip::store::{KeyStore, MemoryKeyStore, StoreResult};

pub const TEST_PUBLIC_URL: &str = "http://test.local";

/// Wraps a [`MemoryKeyStore`] and counts `get` calls, so tests can observe
/// whether a request was served from the redirect cache.
pub struct CountingStore {
    inner: MemoryKeyStore,
    gets: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryKeyStore::new(),
            gets: AtomicUsize::new(0),
        }
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyStore for CountingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, target: &str) -> StoreResult<()> {
        self.inner.put(key, target).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

pub fn test_state(store: Arc<dyn KeyStore>) -> AppState {
    AppState::new(store, TEST_PUBLIC_URL.to_string(), 5)
}

/// Assembles the full application service over the given store, with a
/// 60 second cache TTL.
pub fn test_app(store: Arc<dyn KeyStore>) -> axum::Router {
    test_app_with_ttl(store, Duration::from_secs(60))
}

pub fn test_app_with_ttl(store: Arc<dyn KeyStore>, ttl: Duration) -> axum::Router {
    build_router(test_state(store), ttl)
        .expect("route table construction failed")
        .into_service()
}
