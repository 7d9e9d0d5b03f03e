//! Local file listing source.

use std::path::PathBuf;

use tracing::instrument;
use ubermelon_core::Catalog;

use super::{CatalogError, CatalogSource};

/// Reads the listing from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source for the given file.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CatalogSource for FileCatalogSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let catalog = Catalog::from_json_slice(&bytes)?;
        tracing::debug!(items = catalog.len(), "Read catalog listing");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
