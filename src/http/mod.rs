//! HTTP client module
//!
//! Thin wrapper around `reqwest` used by the fetcher.
//!
//! # Features
//!
//! - **Per-client defaults**: timeout, user agent and default headers
//! - **Per-request config**: multi-valued query pairs, headers, form bodies
//! - **No status policy**: responses are returned as-is, callers decide what
//!   a 401 or a 404 means

mod client;

pub use client::{body_text, HttpClient, HttpClientConfig, RequestConfig};

#[cfg(test)]
mod tests;
