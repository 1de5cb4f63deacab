//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string (unless
//!   `STORAGE_BACKEND=memory`)
//!
//! ## Optional Variables
//!
//! - `STORAGE_BACKEND` - `postgres` (default) or `memory`
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `DOMAINS` - Comma-separated allow-list of short-link domains; the
//!   first entry is the default (default: `short.example.com`)
//! - `ALIAS_LENGTH` - Characters in a generated alias (default: 7, min: 4)
//! - `ALIAS_MAX_RETRIES` - Collision retries per allocation (default: 10)
//! - `VISIT_RECORDING` - `sync` (default) or `detached`
//! - `VISIT_QUEUE_CAPACITY` - Detached visit buffer size (default: 10000,
//!   min: 100)
//! - `VISIT_HISTORY_LIMIT` - Max visit records per stats read (default: 1000)
//! - `API_TOKENS` - Bearer token map, `token=user[:admin]` comma-separated
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result, bail};
use std::env;

use crate::application::services::VisitRecording;

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Volatile; data is lost on restart. Intended for tests and demos.
    Memory,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    /// Short-link domain allow-list; the first entry is the default.
    pub domains: Vec<String>,
    pub alias_length: usize,
    pub alias_max_retries: usize,
    pub visit_recording: VisitRecording,
    pub visit_queue_capacity: usize,
    pub visit_history_limit: i64,
    /// Raw bearer-token spec, parsed by
    /// [`crate::application::services::AuthService::from_spec`].
    pub api_tokens: String,
    pub log_level: String,
    pub log_format: String,

    // ── PgPool settings ─────────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`,
    /// default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required database configuration is missing or a
    /// variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Err(_) | Ok("postgres") => StorageBackend::Postgres,
            Ok("memory") => StorageBackend::Memory,
            Ok(other) => bail!("unknown STORAGE_BACKEND '{other}'"),
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORAGE_BACKEND is postgres");
        }

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let domains = parse_domains(
            &env::var("DOMAINS").unwrap_or_else(|_| "short.example.com".to_string()),
        )?;

        let alias_length = parse_or("ALIAS_LENGTH", 7)?;
        if alias_length < 4 {
            bail!("ALIAS_LENGTH must be at least 4");
        }

        let alias_max_retries = parse_or("ALIAS_MAX_RETRIES", 10)?;
        if alias_max_retries == 0 {
            bail!("ALIAS_MAX_RETRIES must be at least 1");
        }

        let visit_recording = env::var("VISIT_RECORDING")
            .unwrap_or_else(|_| "sync".to_string())
            .parse::<VisitRecording>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let visit_queue_capacity = parse_or("VISIT_QUEUE_CAPACITY", 10_000)?;
        if visit_queue_capacity < 100 {
            bail!("VISIT_QUEUE_CAPACITY must be at least 100");
        }

        let visit_history_limit = parse_or("VISIT_HISTORY_LIMIT", 1000)?;

        let api_tokens = env::var("API_TOKENS").unwrap_or_default();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 10)?;
        let db_connect_timeout = parse_or("DB_CONNECT_TIMEOUT", 30)?;

        Ok(Self {
            listen_addr,
            storage_backend,
            database_url,
            domains,
            alias_length,
            alias_max_retries,
            visit_recording,
            visit_queue_capacity,
            visit_history_limit,
            api_tokens,
            log_level,
            log_format,
            db_max_connections,
            db_connect_timeout,
        })
    }
}

/// Splits and validates the `DOMAINS` allow-list.
fn parse_domains(raw: &str) -> Result<Vec<String>> {
    let domains: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| d.trim_end_matches('/').to_string())
        .collect();

    if domains.is_empty() {
        bail!("DOMAINS must contain at least one domain");
    }

    Ok(domains)
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} has an invalid value")),
    }
}
