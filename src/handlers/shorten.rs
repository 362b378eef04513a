//! Handler for the shorten form submission.

use axum::extract::{Form, FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::error::AppError;
use crate::handlers::index::IndexTemplate;
use crate::state::AppState;
use crate::utils::keygen::generate_key;

/// Form payload for `POST /`.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

/// Shortens a submitted URL and renders the resulting short link.
///
/// # Endpoint
///
/// `POST /` with an `application/x-www-form-urlencoded` body carrying a
/// `url` field.
///
/// Invalid submissions re-render the form with an error message rather
/// than failing the request; only a store write failure surfaces as 500.
pub async fn shorten_handler(state: AppState, req: Request) -> Result<Response, AppError> {
    let form = match Form::<ShortenForm>::from_request(req, &()).await {
        Ok(Form(form)) => form,
        Err(_) => ShortenForm { url: String::new() },
    };

    if form.url.is_empty() {
        return Ok(IndexTemplate {
            message: "Error: cannot shorten empty URL!".to_string(),
        }
        .into_response());
    }

    let target = match Url::parse(&form.url) {
        Ok(url) => url,
        Err(_) => {
            return Ok(IndexTemplate {
                message: "Error: submitted URL is incorrect!".to_string(),
            }
            .into_response());
        }
    };

    let key = generate_key(state.key_length);
    state.store.put(&key, target.as_str()).await?;

    info!(%key, target = %target, "shortened URL");

    Ok(IndexTemplate {
        message: format!("{}/{}", state.public_url, key),
    }
    .into_response())
}
