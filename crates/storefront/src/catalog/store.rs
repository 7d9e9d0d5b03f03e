//! Catalog snapshot holder.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::instrument;
use ubermelon_core::Catalog;

use super::{CatalogError, CatalogSource};

/// Holds the current catalog snapshot.
///
/// Readers get an `Arc<Catalog>` that stays valid after later loads. A load
/// only swaps the pointer, and only after the fetch has succeeded. The lock
/// is never held across an `.await`, so when two loads overlap the one that
/// finishes last wins.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// A store holding an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Fetch from `source` and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept and the error returned.
    ///
    /// # Errors
    ///
    /// Returns whatever `source` failed with.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn load<S: CatalogSource>(&self, source: &S) -> Result<Arc<Catalog>, CatalogError> {
        match source.fetch().await {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                self.replace(Arc::clone(&catalog));
                tracing::info!(items = catalog.len(), "Catalog loaded");
                Ok(catalog)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kept_items = self.snapshot().len(),
                    "Catalog load failed, keeping previous snapshot"
                );
                Err(e)
            }
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn replace(&self, catalog: Arc<Catalog>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = catalog;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use ubermelon_core::CatalogParseError;

    use super::*;

    const LISTING: &str = r#"{
        "wm1": { "name": "Watermelon", "image_url": "/img/wm.png", "price": 5.0 },
        "ca2": { "name": "Cantaloupe", "image_url": "/img/ca.png", "price": 3.5 }
    }"#;

    /// Replays scripted results, one per fetch.
    struct ScriptedSource {
        results: Mutex<Vec<Result<&'static str, u16>>>,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<&'static str, u16>>) -> Self {
            Self {
                results: Mutex::new(results),
                delay: Duration::ZERO,
            }
        }

        fn delayed(result: Result<&'static str, u16>, delay: Duration) -> Self {
            Self {
                results: Mutex::new(vec![result]),
                delay,
            }
        }
    }

    impl CatalogSource for ScriptedSource {
        async fn fetch(&self) -> Result<Catalog, CatalogError> {
            tokio::time::sleep(self.delay).await;
            let next = self.results.lock().unwrap().remove(0);
            match next {
                Ok(body) => Ok(Catalog::from_json_str(body)?),
                Err(status) => Err(CatalogError::Status { status }),
            }
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let store = CatalogStore::new();
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot() {
        let store = CatalogStore::new();
        let source = ScriptedSource::new(vec![Ok(LISTING)]);

        let loaded = store.load(&source).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(store.snapshot().get("ca2").unwrap().name, "Cantaloupe");
    }

    #[tokio::test]
    async fn test_first_failure_leaves_store_empty() {
        let store = CatalogStore::new();
        let source = ScriptedSource::new(vec![Err(500)]);

        assert!(store.load(&source).await.is_err());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_snapshot() {
        let store = CatalogStore::new();
        let source = ScriptedSource::new(vec![Ok(LISTING), Err(502), Ok("[not a listing]")]);

        store.load(&source).await.unwrap();
        let before = store.snapshot();

        assert!(matches!(
            store.load(&source).await,
            Err(CatalogError::Status { status: 502 })
        ));
        assert!(matches!(
            store.load(&source).await,
            Err(CatalogError::Parse(CatalogParseError::Json(_)))
        ));
        assert_eq!(*store.snapshot(), *before);
    }

    #[tokio::test]
    async fn test_load_replaces_rather_than_merges() {
        let store = CatalogStore::new();
        let source = ScriptedSource::new(vec![
            Ok(LISTING),
            Ok(r#"{"cas3": {"name": "Casaba", "image_url": "", "price": 4}}"#),
        ]);

        store.load(&source).await.unwrap();
        store.load(&source).await.unwrap();

        let catalog = store.snapshot();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("cas3"));
        assert!(!catalog.contains("wm1"));
    }

    #[tokio::test]
    async fn test_held_snapshot_survives_reload() {
        let store = CatalogStore::new();
        let source = ScriptedSource::new(vec![
            Ok(LISTING),
            Ok(r#"{"cas3": {"name": "Casaba", "image_url": "", "price": 4}}"#),
        ]);

        store.load(&source).await.unwrap();
        let held = store.snapshot();
        store.load(&source).await.unwrap();

        assert!(held.contains("wm1"));
        assert!(!store.snapshot().contains("wm1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_loads_last_to_resolve_wins() {
        let store = CatalogStore::new();
        let slow = ScriptedSource::delayed(
            Ok(r#"{"slow": {"name": "Slow", "image_url": "", "price": 1}}"#),
            Duration::from_millis(200),
        );
        let fast = ScriptedSource::delayed(
            Ok(r#"{"fast": {"name": "Fast", "image_url": "", "price": 1}}"#),
            Duration::from_millis(10),
        );

        let (a, b) = tokio::join!(store.load(&slow), store.load(&fast));
        a.unwrap();
        b.unwrap();

        let catalog = store.snapshot();
        assert!(catalog.contains("slow"));
        assert!(!catalog.contains("fast"));
    }

    #[test]
    fn test_with_catalog() {
        let store = CatalogStore::with_catalog(Catalog::from_json_str(LISTING).unwrap());
        assert_eq!(store.snapshot().len(), 2);
    }
}
