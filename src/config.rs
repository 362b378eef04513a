//! Service configuration from CLI flags with environment fallbacks.
//!
//! Every flag can also be supplied through the environment variable named
//! alongside it; a `.env` file is honored when present (loaded by `main`).
//! Values that cannot be expressed as clap constraints are checked by
//! [`Config::validate`] before the server starts — an invalid key length or
//! cache TTL never serves a request.

use std::time::Duration;

use anyhow::{Result, ensure};
use clap::Parser;

/// Service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "snip", version, about = "URL shortener with a time-bounded redirect cache")]
pub struct Config {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: String,

    /// Public base URL rendered into short links.
    #[arg(long, env = "PUBLIC_URL", default_value = "http://localhost:3000")]
    pub public_url: String,

    /// Number of characters in generated short keys.
    #[arg(long, env = "KEY_LENGTH", default_value_t = 5)]
    pub key_length: usize,

    /// Seconds a cached redirect target stays valid.
    #[arg(long, env = "CACHE_TTL_SECONDS", default_value_t = 60)]
    pub cache_ttl_seconds: u64,

    /// Postgres connection string. When unset, an in-memory store is used
    /// and shortened URLs do not survive a restart.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log output format: text or json.
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,
}

impl Config {
    /// Checks invariants that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero key length or a zero cache TTL; both are
    /// fatal configuration errors.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.key_length >= 1, "KEY_LENGTH must be at least 1");
        ensure!(
            self.cache_ttl_seconds >= 1,
            "CACHE_TTL_SECONDS must be at least 1"
        );
        Ok(())
    }

    /// Cache TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}
