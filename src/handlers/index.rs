//! Form page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Request;
use axum::response::IntoResponse;

/// Template for the shorten form page.
///
/// Renders `templates/index.html` with a status line: empty on first load,
/// an error message or the freshly minted short link after a submission.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub message: String,
}

/// Renders the empty shorten form.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(_req: Request) -> impl IntoResponse {
    IndexTemplate {
        message: String::new(),
    }
}
