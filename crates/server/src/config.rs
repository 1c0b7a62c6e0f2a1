// crates/server/src/config.rs
//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported database type '{0}': kstats reads a SQLite message store only")]
    UnsupportedDatabase(String),
}

/// Server configuration. Every flag falls back to a `KSTATS_*` variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "kstats", version, about = "Read-only IRC channel statistics dashboard")]
pub struct Config {
    /// Database driver. Only SQLite stores are read; the setting exists so
    /// deployments configured for another driver fail at startup.
    #[arg(long, env = "KSTATS_DATABASE_TYPE", default_value = "sqlite")]
    pub database_type: String,

    /// Connection string, e.g. `sqlite:/var/lib/kstats/kstats.db`.
    #[arg(long, env = "KSTATS_DATABASE_URL")]
    pub database_url: String,

    /// Redis `host:port`. Without it records are cached in process.
    #[arg(long, env = "KSTATS_REDIS_ADDRESS")]
    pub redis_address: Option<String>,

    #[arg(long, env = "KSTATS_REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    #[arg(long, env = "KSTATS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding `statistics.html`.
    #[arg(long = "templates", env = "KSTATS_TEMPLATE_DIR", default_value = "templates")]
    pub template_dir: PathBuf,

    /// Directory served under `/assets`.
    #[arg(long = "assets", env = "KSTATS_ASSET_DIR", default_value = "assets")]
    pub asset_dir: PathBuf,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.database_type.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(()),
            _ => Err(ConfigError::UnsupportedDatabase(self.database_type.clone())),
        }
    }

    /// The Redis address, if one was given and is not blank.
    pub fn redis_address(&self) -> Option<&str> {
        self.redis_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}
