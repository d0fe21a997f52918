//! Paginated fetcher module
//!
//! Walks every page of a bearer-token protected listing endpoint.
//!
//! # Overview
//!
//! - `ApiAccess` - the accessors a fetcher is built from (base URL, paths,
//!   credentials, extra params)
//! - `PaginatedFetcher` - the page loop with one-shot reauthentication on 401
//! - `RequestParams` - query parameters accumulated across pages
//! - URL helpers shared by the fetcher and the CLI

mod access;
mod paginated;
mod params;
mod urls;

pub use access::{validate_access, ApiAccess, StaticAccess};
pub use paginated::{
    build_headers, derive_cache_key, FetchOutcome, FetchState, PaginatedFetcher,
    PaginatedFetcherBuilder,
};
pub use params::RequestParams;
pub use urls::{build_login_url, build_resource_url, build_url, build_url_with_args, split_cursor};
