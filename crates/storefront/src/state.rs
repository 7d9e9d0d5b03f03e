//! Application state shared across handlers.

use std::sync::Arc;

use ubermelon_core::Catalog;

use crate::carts::CartRegistry;
use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog store and the visitors' carts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    carts: CartRegistry,
}

impl AppState {
    /// Create a new application state with an empty catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog_store(config, CatalogStore::new())
    }

    /// Create a new application state around an existing catalog store.
    #[must_use]
    pub fn with_catalog_store(config: StorefrontConfig, catalog: CatalogStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts: CartRegistry::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog_store(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Carts by session.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }

    /// The current catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        self.inner.catalog.snapshot()
    }
}
