//! CLI module
//!
//! Command-line interface for fetching from a JWT-protected API.
//!
//! # Commands
//!
//! - `fetch` - Walk every page and print or save the records
//! - `login` - Obtain a fresh token and store it
//! - `cache-key` - Show the token cache key for the configured target

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

use tracing_subscriber::EnvFilter;

/// Log filter for the binary
///
/// A non-blank, valid `RUST_LOG` value (passed as `env`) wins; otherwise the level is
/// DEBUG with `--verbose` and INFO without.
pub fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}
