//! Token store trait and key sanitization

use super::{FileTokenStore, MemoryCache, MemoryTokenStore};
use crate::config::FetcherConfig;
use crate::error::Result;
use crate::types::TokenStoreBackend;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Storage for a single bearer token under a sanitized key
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The sanitized key this store reads and writes
    fn key(&self) -> &str;

    /// Get the stored token, `None` if nothing was stored yet
    async fn get(&self) -> Result<Option<String>>;

    /// Store a token, replacing any previous one
    async fn set(&self, token: &str) -> Result<()>;
}

/// Turn an arbitrary string into a storage-safe identifier
///
/// Lowercases, collapses every run of non-alphanumeric characters into one
/// `-`, and trims separators from both ends.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Open the store selected by `backend` for an unsanitized cache key
pub fn open_token_store(
    backend: TokenStoreBackend,
    key: &str,
    config: &FetcherConfig,
) -> Box<dyn TokenStore> {
    match backend {
        TokenStoreBackend::File => Box::new(FileTokenStore::in_dir(key, config.token_dir())),
        TokenStoreBackend::Memory => Box::new(MemoryTokenStore::new(key, MemoryCache::global())),
    }
}
