//! Handler for short URL redirect.

use axum::extract::Request;
use axum::response::Response;
use tracing::debug;

use crate::error::AppError;
use crate::handlers::found;
use crate::state::AppState;

/// Redirects a short key to its stored target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Resolution reads the store directly. Repeat lookups are short-circuited
/// by the [`crate::cache::RedirectCache`] wrapping this handler in the
/// route table.
///
/// # Errors
///
/// Returns 404 if the key has no stored target, 500 if the store read
/// fails.
pub async fn redirect_handler(state: AppState, req: Request) -> Result<Response, AppError> {
    let key = req.uri().path().trim_start_matches('/');

    match state.store.get(key).await? {
        Some(target) => {
            debug!(%key, %target, "redirecting");
            Ok(found(&target))
        }
        None => Err(AppError::NotFound),
    }
}
