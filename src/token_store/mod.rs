//! Token storage module
//!
//! Supports: shared in-memory cache, one-file-per-key temp directory
//!
//! # Overview
//!
//! A `TokenStore` persists exactly one opaque token string under a cache key.
//! Keys are slugified on construction so arbitrary base URL and username
//! strings become safe identifiers for every backend. Stores sharing a key
//! see each other's writes; there is no locking and the last writer wins.

mod file;
mod memory;
mod types;

pub use file::FileTokenStore;
pub use memory::{MemoryCache, MemoryTokenStore};
pub use types::{open_token_store, slugify, TokenStore};
