//! Process configuration
//!
//! Flags take precedence over environment variables, which may come from a
//! `.env` file loaded before parsing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use agency::BreedRegistryConfig;
use clap::Parser;

use crate::error::{WebServerError, WebServerResult};

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "webserver")]
#[command(about = "Spy Cat Agency HTTP API")]
pub struct Args {
    /// Interface to bind, as an IP address or a host name
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for HTTP server
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Base URL of the breed registry
    #[arg(long, env = "BREED_API_URL", default_value = BreedRegistryConfig::DEFAULT_BASE_URL)]
    pub breed_api_url: String,

    #[arg(long, env = "BREED_API_TIMEOUT_SECS", default_value = "10")]
    pub breed_api_timeout_secs: u64,

    /// Allowed CORS origins
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost"
    )]
    pub cors_origins: Vec<String>,

    /// SQLite database file (`sqlite://` prefix optional); memory store when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Settings resolved once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub breed_registry: BreedRegistryConfig,
    pub cors_origins: Vec<String>,
    pub database_path: Option<PathBuf>,
}

impl ServerConfig {
    /// First address `host:port` resolves to
    pub async fn bind_address(&self) -> WebServerResult<SocketAddr> {
        let invalid = |reason: String| {
            WebServerError::config(format!("Invalid bind address {}:{}: {}", self.host, self.port, reason))
        };
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("host resolved to no addresses".to_string()))
    }
}

impl Args {
    pub fn into_config(self) -> WebServerResult<ServerConfig> {
        let host = self.host.trim().to_string();
        if host.is_empty() {
            return Err(WebServerError::config("Host must not be empty"));
        }

        if self.breed_api_timeout_secs == 0 {
            return Err(WebServerError::config("Breed API timeout must be at least 1 second"));
        }

        let cors_origins: Vec<String> = self
            .cors_origins
            .into_iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_path = self.database_url.as_deref().map(database_path).transpose()?;

        Ok(ServerConfig {
            host,
            port: self.port,
            log_level: self.log_level,
            breed_registry: BreedRegistryConfig::new(
                self.breed_api_url,
                Duration::from_secs(self.breed_api_timeout_secs),
            ),
            cors_origins,
            database_path,
        })
    }
}

fn database_path(url: &str) -> WebServerResult<PathBuf> {
    let url = url.trim();
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.is_empty() {
        return Err(WebServerError::config(format!("Invalid database URL {url:?}")));
    }
    if url.contains("://") && !url.starts_with("sqlite://") {
        return Err(WebServerError::config(format!("Unsupported database URL {url:?}, expected sqlite://<path>")));
    }
    Ok(PathBuf::from(path))
}
