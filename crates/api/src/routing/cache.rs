//! In-memory catalog cache with TTL
//!
//! Caches visa catalog lookups (sold countries, slugs, default categories)
//! so link building in views does not hit the catalog backend per call.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default cache TTL (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache entry with expiration
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe in-memory cache keyed by string
pub struct CatalogCache<V> {
    cache: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> Default for CatalogCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> CatalogCache<V> {
    /// Create a new cache with default TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Create a new cache with custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Cached value for a key, None if missing or expired
    pub fn get(&self, key: &str) -> Option<V> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(key)?;

        if entry.is_expired() {
            None
        } else {
            Some(entry.value.clone())
        }
    }

    pub fn set(&self, key: &str, value: V) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.to_string(), CacheEntry::new(value, self.ttl));
        }
    }

    /// Cached value, computing and storing it on a miss
    pub fn get_or_insert_with(&self, key: &str, load: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = load();
        self.set(key, value.clone());
        value
    }

    /// Drop every entry (catalog data changed)
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Clear expired entries (call periodically for memory management)
    pub fn cleanup(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| !entry.is_expired());
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        if let Ok(cache) = self.cache.read() {
            let total = cache.len();
            let expired = cache.values().filter(|e| e.is_expired()).count();
            CacheStats {
                total_entries: total,
                expired_entries: expired,
                active_entries: total - expired,
            }
        } else {
            CacheStats::default()
        }
    }
}

/// Cache statistics
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

impl std::ops::Add for CacheStats {
    type Output = CacheStats;

    fn add(self, other: CacheStats) -> CacheStats {
        CacheStats {
            total_entries: self.total_entries + other.total_entries,
            expired_entries: self.expired_entries + other.expired_entries,
            active_entries: self.active_entries + other.active_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::thread::sleep;

    #[test]
    fn test_cache_get_set() {
        let cache = CatalogCache::new();

        assert!(cache.get("slug:IN").is_none());

        cache.set("slug:IN", Some("india".to_string()));
        assert_eq!(cache.get("slug:IN"), Some(Some("india".to_string())));
    }

    #[test]
    fn test_cache_negative() {
        let cache: CatalogCache<Option<String>> = CatalogCache::new();

        // A country with no slug is cached too
        cache.set("slug:XX", None);
        assert_eq!(cache.get("slug:XX"), Some(None));
    }

    #[test]
    fn test_cache_expiration() {
        let cache = CatalogCache::with_ttl(Duration::from_millis(50));

        cache.set("category:TR", "/turkey-e-visa".to_string());
        assert!(cache.get("category:TR").is_some());

        sleep(Duration::from_millis(60));
        assert!(cache.get("category:TR").is_none());

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.expired_entries, 1);

        cache.cleanup();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_get_or_insert_with_loads_once() {
        let cache = CatalogCache::new();
        let loads = Cell::new(0);

        for _ in 0..3 {
            let value = cache.get_or_insert_with("sold", || {
                loads.set(loads.get() + 1);
                vec!["IN".to_string()]
            });
            assert_eq!(value, vec!["IN".to_string()]);
        }

        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_cache_clear() {
        let cache = CatalogCache::new();

        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.stats().active_entries, 2);

        cache.clear();
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
