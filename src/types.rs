//! Common types used throughout jwt-paginator
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Token Storage
// ============================================================================

/// Which medium the fetcher persists its bearer token in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStoreBackend {
    /// One file per cache key in a temp directory
    #[default]
    File,
    /// Shared in-process cache
    Memory,
}

impl std::fmt::Display for TokenStoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStoreBackend::File => write!(f, "file"),
            TokenStoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for TokenStoreBackend {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(TokenStoreBackend::File),
            "memory" => Ok(TokenStoreBackend::Memory),
            other => Err(crate::Error::invalid_value(
                "token_store",
                format!("unknown backend '{other}' (expected 'file' or 'memory')"),
            )),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// One page of a paginated listing: `{"results": [...], "next": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records on this page
    #[serde(default)]
    pub results: Vec<JsonValue>,
    /// URL of the next page, `null` on the last one
    #[serde(default)]
    pub next: Option<String>,
}

impl Page {
    /// The cursor to follow, treating an empty string like `null`
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref().filter(|s| !s.is_empty())
    }
}

/// Body returned by the login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Access token
    #[serde(default)]
    pub access: Option<String>,
    /// Refresh token (unused)
    #[serde(default)]
    #[allow(dead_code)]
    refresh: Option<String>,
}
