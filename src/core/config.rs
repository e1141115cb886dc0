//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! defaults, an optional `.env` file, and `MCP_*` environment variables.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Web page fetching.
    pub scraper: ScraperConfig,

    /// Repository documentation download.
    pub docs: DocsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Timeouts and identity for the two fetch strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Request timeout of the primary (collector) strategy.
    pub visit_timeout_secs: u64,

    /// Request timeout of the fallback strategy.
    pub fallback_timeout_secs: u64,

    /// User agent sent by the primary strategy.
    pub user_agent: String,
}

/// Limits for the documentation downloader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Lower-case extensions, dot included, of files to collect.
    pub extensions: Vec<String>,

    /// Maximum number of files collected per repository.
    pub max_files: usize,

    /// Characters of each file shown by the Markdown rendering.
    pub max_preview_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "fetch-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            visit_timeout_secs: 30,
            fallback_timeout_secs: 10,
            user_agent: concat!("fetch-mcp-server/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".md".to_string(), ".txt".to_string()],
            max_files: 50,
            max_preview_chars: 2000,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// Environment variables are prefixed with `MCP_`, for example
    /// `MCP_SERVER_NAME` or `MCP_SCRAPER_VISIT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(version) = std::env::var("MCP_SERVER_VERSION") {
            config.server.version = version;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Some(secs) = env_parse("MCP_SCRAPER_VISIT_TIMEOUT_SECS") {
            config.scraper.visit_timeout_secs = secs;
        }

        if let Some(secs) = env_parse("MCP_SCRAPER_FALLBACK_TIMEOUT_SECS") {
            config.scraper.fallback_timeout_secs = secs;
        }

        if let Ok(user_agent) = std::env::var("MCP_SCRAPER_USER_AGENT") {
            config.scraper.user_agent = user_agent;
        }

        if let Some(max_files) = env_parse("MCP_DOCS_MAX_FILES") {
            config.docs.max_files = max_files;
        }

        config
    }
}

/// Parse an environment variable, keeping the default when it is unset or invalid.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}
