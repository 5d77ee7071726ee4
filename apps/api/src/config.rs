use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only malformed values are errors; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means records are kept in process memory only.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// JSON product catalog; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Fixes the product picker seed for reproducible routines.
    pub selection_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            db_max_connections: optional_env("DB_MAX_CONNECTIONS")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?
                .unwrap_or(10),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            selection_seed: optional_env("SELECTION_SEED")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SELECTION_SEED must be an unsigned integer")?,
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            db_max_connections: 1,
            port: 0,
            rust_log: "debug".to_string(),
            catalog_path: None,
            selection_seed: Some(7),
        }
    }
}
