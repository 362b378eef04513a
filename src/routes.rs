//! Route table assembly.
//!
//! Registration order is significant (see [`crate::routing`]): `/health`
//! precedes the short-key pattern so a randomly generated key spelling
//! "health" can never shadow the endpoint, and the two root form routes
//! share `^/$` across their methods.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::cache::RedirectCache;
use crate::handlers;
use crate::routing::{Route, Router, handler, with_state};
use crate::state::AppState;

/// Builds the route table, wrapping the redirect handler in its TTL cache.
///
/// The short-key pattern is derived from the configured key length.
///
/// # Errors
///
/// Returns an error if a route pattern fails to compile or the TTL is zero;
/// both fail startup before any request is served.
pub fn build_router(state: AppState, cache_ttl: Duration) -> Result<Router> {
    let key_pattern = format!("^/[a-zA-Z0-9]{{{}}}$", state.key_length);

    let resolve = with_state(state.clone(), handlers::redirect_handler);
    let cached_redirect = RedirectCache::new(resolve, Arc::clone(&state.store), cache_ttl)?;

    let routes = vec![
        Route::get("^/$", handler(handlers::index_handler))?,
        Route::get("^/health$", with_state(state.clone(), handlers::health_handler))?,
        Route::get(&key_pattern, cached_redirect.into_handler())?,
        Route::post("^/$", with_state(state, handlers::shorten_handler))?,
    ];

    Ok(Router::new(routes))
}
