//! HTTP server initialization and runtime setup.
//!
//! Wires the key store, route table, and redirect cache together and runs
//! the Axum server until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{KeyStore, MemoryKeyStore, PgKeyStore};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Postgres connection pool and migrations, or the in-memory store when
///   `DATABASE_URL` is unset
/// - Route table and redirect cache
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database
/// connection fails, or the listener cannot bind.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let store: Arc<dyn KeyStore> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Arc::new(PgKeyStore::new(Arc::new(pool)))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory store (volatile)");
            Arc::new(MemoryKeyStore::new())
        }
    };

    let public_url = config.public_url.trim_end_matches('/').to_string();
    let state = AppState::new(store, public_url, config.key_length);

    let router = build_router(state, config.cache_ttl())?;
    let app = router.into_service().layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    info!("Listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("Server shutting down");
}
