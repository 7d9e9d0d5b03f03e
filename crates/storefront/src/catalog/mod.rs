//! Catalog loading.
//!
//! # Architecture
//!
//! - [`CatalogSource`] fetches one listing and parses it into a
//!   [`Catalog`](ubermelon_core::Catalog)
//! - [`HttpCatalogSource`] issues a single `GET` with `reqwest`
//! - [`FileCatalogSource`] reads a local JSON file (seed data, offline runs)
//! - [`CatalogStore`] holds the current snapshot and swaps it atomically on
//!   a successful load
//!
//! There is no retry and no timeout. A failed load leaves the previous
//! snapshot in place.
//!
//! # Example
//!
//! ```rust,ignore
//! use ubermelon_storefront::catalog::{CatalogStore, ConfiguredSource};
//!
//! let source = ConfiguredSource::from_config(&config.catalog_source);
//! let store = CatalogStore::new();
//! if let Err(e) = store.load(&source).await {
//!     tracing::warn!("catalog unavailable: {e}");
//! }
//! let catalog = store.snapshot();
//! ```

mod file;
mod http;
mod store;

use std::future::Future;

use thiserror::Error;
use ubermelon_core::{Catalog, CatalogParseError};

use crate::config::CatalogSourceConfig;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;
pub use store::CatalogStore;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, DNS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The listing endpoint answered with a non-success status.
    #[error("listing returned HTTP {status}")]
    Status {
        /// Status code received.
        status: u16,
    },

    /// Reading the listing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be parsed into a catalog.
    #[error("invalid listing: {0}")]
    Parse(#[from] CatalogParseError),
}

/// Something that can produce a catalog snapshot.
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the listing once.
    fn fetch(&self) -> impl Future<Output = Result<Catalog, CatalogError>> + Send;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// The source selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpCatalogSource),
    File(FileCatalogSource),
}

impl ConfiguredSource {
    /// Build the source named by `CATALOG_SOURCE`.
    #[must_use]
    pub fn from_config(config: &CatalogSourceConfig) -> Self {
        match config {
            CatalogSourceConfig::Http(url) => Self::Http(HttpCatalogSource::new(url.clone())),
            CatalogSourceConfig::File(path) => Self::File(FileCatalogSource::new(path.clone())),
        }
    }
}

impl CatalogSource for ConfiguredSource {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::File(source) => source.describe(),
        }
    }
}
