//! Subcommand implementations.

pub mod catalog;
pub mod quote;

use ubermelon_core::{Catalog, ItemCodeError};
use ubermelon_storefront::catalog::{CatalogError, CatalogStore, ConfiguredSource};
use ubermelon_storefront::config::{CatalogSourceConfig, ConfigError};

/// Errors shared by the catalog-backed commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid catalog source: {0}")]
    Source(#[from] ConfigError),

    #[error("Catalog load failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid item code: {0}")]
    ItemCode(#[from] ItemCodeError),
}

/// Load the catalog once from `source` (URL or file path).
async fn load_catalog(source: &str) -> Result<std::sync::Arc<Catalog>, CommandError> {
    let config = CatalogSourceConfig::parse(source)?;
    let source = ConfiguredSource::from_config(&config);
    let store = CatalogStore::new();
    Ok(store.load(&source).await?)
}
