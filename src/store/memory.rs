//! In-memory key store for tests and database-less local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{KeyStore, StoreResult};

/// HashMap-backed [`KeyStore`]. Contents are lost on process exit.
#[derive(Default)]
pub struct MemoryKeyStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, target: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), target.to_owned());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_stored_target() {
        let store = MemoryKeyStore::new();

        store.put("aaaaa", "https://example.com").await.unwrap();

        assert_eq!(
            store.get("aaaaa").await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn get_of_unknown_key_is_none() {
        let store = MemoryKeyStore::new();

        assert_eq!(store.get("nope1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_overwrites_silently() {
        let store = MemoryKeyStore::new();

        store.put("aaaaa", "https://one.example").await.unwrap();
        store.put("aaaaa", "https://two.example").await.unwrap();

        assert_eq!(
            store.get("aaaaa").await.unwrap().as_deref(),
            Some("https://two.example")
        );
    }
}
