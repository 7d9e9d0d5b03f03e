//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_SOURCE` - Item listing location: an `http(s)://` URL or a path
//!   to a JSON file in the same format
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSourceConfig {
    /// Fetch the listing over HTTP.
    Http(Url),
    /// Read the listing from a local file.
    File(PathBuf),
}

impl CatalogSourceConfig {
    /// Interpret a `CATALOG_SOURCE` value.
    ///
    /// Values starting with `http://` or `https://` are URLs; anything else is
    /// a file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for an empty value or an
    /// unparseable URL.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_SOURCE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(value).map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_SOURCE".to_string(), e.to_string())
            })?;
            Ok(Self::Http(url))
        } else {
            Ok(Self::File(PathBuf::from(value)))
        }
    }
}

impl std::fmt::Display for CatalogSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Item listing location
    pub catalog_source: CatalogSourceConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_required = |key: &str| {
            lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let catalog_source = CatalogSourceConfig::parse(&get_required("CATALOG_SOURCE")?)?;
        let host = get_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        Ok(Self {
            catalog_source,
            host,
            port,
            base_url,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}
