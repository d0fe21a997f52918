//! # jwt-paginator
//!
//! Fetch every page of a paginated, JWT-protected JSON API and turn the
//! records into domain objects.
//!
//! ## Features
//!
//! - **Transparent pagination**: follows `next` cursors until the listing ends
//! - **Lazy login**: a token is only requested when the API answers 401
//! - **Pluggable token storage**: shared in-memory cache or one file per key
//! - **Bounded reauthentication**: a failed-login budget ends pagination with
//!   partial results instead of looping forever
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jwt_paginator::{FetcherConfig, PaginatedFetcher, Result, StaticAccess};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let access = StaticAccess::new(
//!         "https://api.example.com",
//!         "api/v1/items/",
//!         "api/token/",
//!         "joe",
//!         "secret",
//!     );
//!
//!     let mut fetcher = PaginatedFetcher::new(access, FetcherConfig::default()).await?;
//!     let records = fetcher.fetch_all_pages().await?;
//!     println!("{} records", records.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   PaginatedFetcher                       │
//! │  fetch_all_pages() → Vec<Value>   reauthenticate()       │
//! └──────────────────────────────────────────────────────────┘
//!          │                  │                    │
//! ┌────────┴───────┬──────────┴────────┬───────────┴────────┐
//! │   ApiAccess    │    TokenStore     │  RecordValidator   │
//! ├────────────────┼───────────────────┼────────────────────┤
//! │ base URL       │ MemoryTokenStore  │ closures           │
//! │ paths          │ FileTokenStore    │ SerdeValidator     │
//! │ credentials    │                   │                    │
//! └────────────────┴───────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Fetcher configuration and settings files
pub mod config;

/// HTTP client
pub mod http;

/// Token persistence backends
pub mod token_store;

/// Paginated fetcher
pub mod fetcher;

/// Record deserialization
pub mod deserialize;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientSettings, FetcherConfig};
pub use deserialize::{deserialize_records, RecordValidator, SerdeValidator};
pub use error::{Error, Result};
pub use fetcher::{ApiAccess, FetchOutcome, PaginatedFetcher, StaticAccess};
pub use token_store::{FileTokenStore, MemoryCache, MemoryTokenStore, TokenStore};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
