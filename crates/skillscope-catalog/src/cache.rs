//! Lazily-initialized, write-once catalog cache
//!
//! The first `get()` loads the catalog; every later call shares the same
//! `Arc`. Concurrent first callers block on a single initializer. The only
//! way to force a reload is `reset()`.

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogLoader};

type CatalogSource = Box<dyn Fn() -> Result<Catalog> + Send + Sync>;

/// Shared, read-mostly handle to the loaded catalog
pub struct CatalogCache {
    source: CatalogSource,
    slot: RwLock<Arc<OnceCell<Arc<Catalog>>>>,
}

impl CatalogCache {
    /// Cache backed by a [`CatalogLoader`]
    pub fn new(loader: CatalogLoader) -> Self {
        Self::with_source(move || loader.load())
    }

    /// Cache backed by an arbitrary load function
    pub fn with_source<F>(source: F) -> Self
    where
        F: Fn() -> Result<Catalog> + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
            slot: RwLock::new(Arc::new(OnceCell::new())),
        }
    }

    /// Return the cached catalog, loading it on first use.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn get(&self) -> Result<Arc<Catalog>> {
        let cell = Arc::clone(&self.slot.read().unwrap_or_else(PoisonError::into_inner));

        let catalog = cell.get_or_try_init(|| {
            debug!("Loading catalog");
            (self.source)().map(Arc::new)
        })?;

        Ok(Arc::clone(catalog))
    }

    /// Whether a catalog is currently cached
    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get()
            .is_some()
    }

    /// Drop the cached catalog so the next `get()` reloads it.
    ///
    /// Callers already holding an `Arc<Catalog>` keep their snapshot.
    pub fn reset(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(OnceCell::new());
        info!("Catalog cache reset");
    }
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::Skill;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn counting_cache() -> (Arc<AtomicUsize>, CatalogCache) {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let cache = CatalogCache::with_source(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Catalog::new(vec![Skill::new("one", "first")], vec![], vec![]))
        });
        (loads, cache)
    }

    #[test]
    fn test_loads_once() {
        let (loads, cache) = counting_cache();
        assert!(!cache.is_loaded());

        let a = cache.get().unwrap();
        let b = cache.get().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_concurrent_first_get_loads_once() {
        let (loads, cache) = counting_cache();
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get().unwrap().skills().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reset_forces_reload() {
        let (loads, cache) = counting_cache();
        let before = cache.get().unwrap();

        cache.reset();
        assert!(!cache.is_loaded());

        let after = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.skills().len(), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let cache = CatalogCache::with_source(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("disk unavailable");
            }
            Ok(Catalog::default())
        });

        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert!(cache.get().is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
