//! Method-aware request dispatch over an ordered route table.
//!
//! Routes are scanned in registration order. The first route whose path
//! pattern matches the request path *and* whose method equals the request
//! method wins, and its response is returned unmodified. A path that matches
//! at least one pattern but never on the request method yields
//! `405 Method Not Allowed` with an `Allow` header listing the methods that
//! would have matched; a path matching no pattern at all yields
//! `404 Not Found`.
//!
//! Order is significant: two routes may share a pattern with different
//! methods, and overlapping patterns (e.g. `^/$` and `^/[a-zA-Z0-9]{5}$`)
//! are resolved by whichever was registered first.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use thiserror::Error;

/// Boxed future produced by a route handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A route handler: an async function over the raw request.
pub type Handler = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

/// Errors raised while building a route table.
///
/// Construction is the only failure point of the dispatcher; [`Router::dispatch`]
/// itself never fails beyond its 404/405 verdicts.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("invalid route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Wraps a plain async function as a [`Handler`].
pub fn handler<H, Fut, R>(h: H) -> Handler
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    Arc::new(move |req| {
        let fut = h(req);
        Box::pin(async move { fut.await.into_response() }) as HandlerFuture
    })
}

/// Wraps an async function taking shared state as a [`Handler`].
///
/// The state is cloned into every invocation, so cheap-to-clone state
/// (`Arc`-backed, like [`crate::state::AppState`]) is expected.
pub fn with_state<S, H, Fut, R>(state: S, h: H) -> Handler
where
    S: Clone + Send + Sync + 'static,
    H: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    Arc::new(move |req| {
        let fut = h(state.clone(), req);
        Box::pin(async move { fut.await.into_response() }) as HandlerFuture
    })
}

/// A single (method, path pattern, handler) binding.
pub struct Route {
    method: Method,
    pattern: Regex,
    handler: Handler,
}

impl Route {
    /// Builds a route, compiling `pattern` as a regex over the request path.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the pattern does not
    /// compile. This is a configuration error and fails startup.
    pub fn new(method: Method, pattern: &str, handler: Handler) -> Result<Self, RouterError> {
        let pattern = Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            method,
            pattern,
            handler,
        })
    }

    /// Builds a `GET` route.
    pub fn get(pattern: &str, handler: Handler) -> Result<Self, RouterError> {
        Self::new(Method::GET, pattern, handler)
    }

    /// Builds a `POST` route.
    pub fn post(pattern: &str, handler: Handler) -> Result<Self, RouterError> {
        Self::new(Method::POST, pattern, handler)
    }
}

/// Ordered route table with first-match-wins dispatch.
///
/// Immutable after construction; cloning shares the same table.
#[derive(Clone)]
pub struct Router {
    routes: Arc<Vec<Route>>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// Dispatches a request to the first route matching both path and method.
    ///
    /// The selected handler's response is returned as-is. With no
    /// method-matching route the verdict is 404 (no pattern matched) or 405
    /// (a pattern matched on another method).
    pub async fn dispatch(&self, req: Request) -> Response {
        let path = req.uri().path().to_owned();
        let method = req.method().clone();

        let mut allowed: Vec<Method> = Vec::new();
        for route in self.routes.iter() {
            if !route.pattern.is_match(&path) {
                continue;
            }
            if route.method == method {
                return (route.handler)(req).await;
            }
            // A later route may still carry the right method for this path.
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            return (StatusCode::NOT_FOUND, "404 page not found").into_response();
        }

        let allow = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, allow)],
            format!("method {method} not allowed"),
        )
            .into_response()
    }

    /// Mounts the dispatcher behind a catch-all axum service.
    pub fn into_service(self) -> axum::Router {
        axum::Router::new().fallback(move |req: Request| {
            let router = self.clone();
            async move { router.dispatch(req).await }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(method: Method, path: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    fn tagged(tag: &'static str) -> Handler {
        handler(move |_req| async move { (StatusCode::OK, tag).into_response() })
    }

    fn routes() -> Vec<Route> {
        vec![
            Route::get("^/$", tagged("root")).unwrap(),
            Route::get("^/[a-zA-Z0-9]{5}$", tagged("key")).unwrap(),
            Route::post("^/$", tagged("posted")).unwrap(),
        ]
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn invalid_pattern_fails_construction() {
        let result = Route::get("^/[a-zA-Z0-9]{5$", tagged("broken"));
        assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
    }

    #[tokio::test]
    async fn dispatches_root_get() {
        let router = Router::new(routes());

        let response = router.dispatch(request(Method::GET, "/")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "root");
    }

    #[tokio::test]
    async fn dispatches_key_path_to_key_route() {
        let router = Router::new(routes());

        let response = router.dispatch(request(Method::GET, "/a23B5")).await;

        assert_eq!(body_text(response).await, "key");
    }

    #[tokio::test]
    async fn dispatches_root_post() {
        let router = Router::new(routes());

        let response = router.dispatch(request(Method::POST, "/")).await;

        assert_eq!(body_text(response).await, "posted");
    }

    #[tokio::test]
    async fn unmatched_path_is_not_found() {
        let router = Router::new(routes());

        let response = router.dispatch(request(Method::GET, "/way-too-long")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn method_mismatch_reports_allowed_methods() {
        let router = Router::new(routes());

        let response = router.dispatch(request(Method::DELETE, "/")).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
    }

    #[tokio::test]
    async fn method_mismatch_on_key_path_allows_get_only() {
        let router = Router::new(routes());

        let response = router.dispatch(request(Method::POST, "/aaaaa")).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
    }

    #[tokio::test]
    async fn first_structural_match_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counting = |counter: Arc<AtomicUsize>| {
            handler(move |_req| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK.into_response()
                }
            })
        };

        let router = Router::new(vec![
            Route::get("^/$", counting(Arc::clone(&first))).unwrap(),
            Route::get("^/$", counting(Arc::clone(&second))).unwrap(),
        ]);

        router.dispatch(request(Method::GET, "/")).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn later_route_can_satisfy_the_method() {
        let router = Router::new(vec![
            Route::post("^/$", tagged("posted")).unwrap(),
            Route::get("^/$", tagged("root")).unwrap(),
        ]);

        let response = router.dispatch(request(Method::GET, "/")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "root");
    }
}
