//! In-memory caching with TTL.

use std::{collections::HashMap, hash::Hash, sync::RwLock};

use chrono::{DateTime, Duration, Utc};
use peerval_primitives::{MetricsRecord, Symbol};
use peerval_traits::{MetricsProvider, ProviderError};
use tracing::trace;

/// Default entry lifetime in seconds.
pub const DEFAULT_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    fn new(data: V, ttl: Duration) -> Self {
        Self { data, expires_at: Utc::now() + ttl }
    }

    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Key-value cache whose entries expire after a fixed lifetime.
///
/// Expiry is checked on read; expired entries linger until overwritten or
/// swept by [`TtlCache::clear_expired`]. A poisoned lock degrades to a miss.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Create a cache with the default one-hour TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// Create a cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl }
    }

    /// Get the TTL applied by [`TtlCache::insert`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a value if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().ok()?;
        entries.get(key).filter(|e| !e.is_expired()).map(|e| e.data.clone())
    }

    /// Cache a value with the default TTL.
    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    /// Cache a value with a custom TTL.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, CacheEntry::new(value, ttl));
        }
    }

    /// Remove a cached value.
    pub fn invalidate(&self, key: &K) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Drop every expired entry.
    pub fn clear_expired(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, e| !e.is_expired());
        }
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache stores no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics provider that memoizes successful lookups per symbol.
#[derive(Debug)]
pub struct CachedMetricsProvider<P> {
    inner: P,
    cache: TtlCache<Symbol, MetricsRecord>,
}

impl<P: MetricsProvider> CachedMetricsProvider<P> {
    /// Wrap a provider with the default TTL.
    pub fn new(inner: P) -> Self {
        Self { inner, cache: TtlCache::new() }
    }

    /// Wrap a provider with a custom TTL.
    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self { inner, cache: TtlCache::with_ttl(ttl) }
    }

    /// Get the underlying cache.
    pub const fn cache(&self) -> &TtlCache<Symbol, MetricsRecord> {
        &self.cache
    }
}

impl<P: MetricsProvider> MetricsProvider for CachedMetricsProvider<P> {
    fn try_fetch_metrics(&self, symbol: &Symbol) -> Result<MetricsRecord, ProviderError> {
        if let Some(record) = self.cache.get(symbol) {
            trace!(%symbol, "metrics cache hit");
            return Ok(record);
        }

        let record = self.inner.try_fetch_metrics(symbol)?;
        self.cache.insert(symbol.clone(), record.clone());
        Ok(record)
    }
}
