//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::default_database_path;

/// Default port for the API server.
pub const DEFAULT_PORT: u16 = 3000;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub site: SiteConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable permissive CORS.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    /// The configured address as `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Content database location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the `SQLite` file. Unset means [`default_database_path`].
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_database_path)
    }
}

/// Per-site content settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Selects the `footer_legal` row.
    pub site_id: String,
    /// Brand name used when the settings table has none.
    pub brand_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_id: "slow-morocco".to_string(),
            brand_name: "Slow Morocco".to_string(),
        }
    }
}
