use std::env;

use anyhow::{Context, Result};

/// Runtime configuration, resolved once at process start. Store credentials
/// come from the environment (or a `.env` file), never from source.
#[derive(Debug, Clone)]
pub struct Config {
    /// Primary SQLite store, e.g. `sqlite://./Finance.db`.
    pub database_url: String,
    /// Optional secondary PostgreSQL mirror of the register table.
    pub secondary_database_url: Option<String>,
    /// Listen address, `127.0.0.1:5001` by default.
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let secondary_database_url = env::var("SECONDARY_DATABASE_URL").ok();
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5001".to_string());

        Ok(Config {
            database_url,
            secondary_database_url,
            bind_addr,
        })
    }
}
