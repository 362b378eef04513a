//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::store::KeyStore;

/// State shared by all handlers.
///
/// Cheap to clone; handlers receive a clone per invocation.
#[derive(Clone)]
pub struct AppState {
    /// Durable key → target URL storage.
    pub store: Arc<dyn KeyStore>,
    /// Public base URL rendered into short links, without a trailing slash.
    pub public_url: String,
    /// Number of characters in generated short keys.
    pub key_length: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyStore>, public_url: String, key_length: usize) -> Self {
        Self {
            store,
            public_url,
            key_length,
        }
    }
}
