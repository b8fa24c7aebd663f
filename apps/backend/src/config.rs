//! Server configuration read from the environment.

use anyhow::Context;

use crate::services::sessions::DEFAULT_SESSION_TTL_MINUTES;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    /// Idle minutes before a study session is dropped.
    pub session_ttl_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read HOST, PORT, RUST_LOG and SESSION_TTL_MINUTES.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let session_ttl_minutes = match lookup("SESSION_TTL_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("SESSION_TTL_MINUTES must be a number of minutes, got {raw:?}"))?,
            None => defaults.session_ttl_minutes,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            session_ttl_minutes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_ttl_minutes))
    }
}
