//! In-memory cache backend
//!
//! `MemoryCache` stands in for a shared cache service: handles are cheap
//! clones of the same map, and `MemoryCache::global()` is the process-wide
//! instance every fetcher sees by default.

use super::types::{slugify, TokenStore};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::RwLock;

static GLOBAL_CACHE: LazyLock<MemoryCache> = LazyLock::new(MemoryCache::new);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }
}

/// Shared key-value cache with optional entry lifetime
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    /// Create an empty cache whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache whose entries expire after `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::default(),
            ttl: Some(ttl),
        }
    }

    /// Handle to the process-wide cache
    pub fn global() -> Self {
        GLOBAL_CACHE.clone()
    }

    /// Get a value, `None` if missing or expired
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// Set a value, replacing any previous one
    pub async fn set(&self, key: &str, value: &str) {
        let expires_at = self
            .ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| Utc::now() + ttl);

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    /// Remove a value
    pub async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Token store backed by a `MemoryCache`
#[derive(Debug, Clone)]
pub struct MemoryTokenStore {
    key: String,
    cache: MemoryCache,
}

impl MemoryTokenStore {
    /// Create a store for `key` (slugified) in `cache`
    pub fn new(key: &str, cache: MemoryCache) -> Self {
        Self {
            key: slugify(key),
            cache,
        }
    }

    /// The cache this store writes to
    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    fn key(&self) -> &str {
        &self.key
    }

    async fn get(&self) -> Result<Option<String>> {
        Ok(self.cache.get(&self.key).await)
    }

    async fn set(&self, token: &str) -> Result<()> {
        self.cache.set(&self.key, token).await;
        Ok(())
    }
}
