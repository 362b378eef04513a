//! Request handlers registered with the dispatcher.

pub mod health;
pub mod index;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Builds a `302 Found` redirect to `location`.
///
/// Short-link redirects use the classic 302 rather than axum's 303/307/308
/// helpers.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
