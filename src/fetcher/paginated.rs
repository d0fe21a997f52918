//! Paginated fetcher implementation
//!
//! Follows `next` cursors until the listing is exhausted, retrying a page
//! once per reauthentication when the server answers 401.

use super::access::{validate_access, ApiAccess};
use super::params::RequestParams;
use super::urls::{build_login_url, build_resource_url, split_cursor};
use crate::config::FetcherConfig;
use crate::deserialize::{deserialize_records, RecordValidator};
use crate::error::{Error, Result};
use crate::http::{body_text, HttpClient, HttpClientConfig, RequestConfig};
use crate::token_store::{open_token_store, TokenStore};
use crate::types::{JsonValue, LoginResponse, Page, StringMap};
use reqwest::StatusCode;
use std::path::Path;
use tracing::{debug, info, warn};

const ACCEPT: &str = "Accept";
const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const APPLICATION_JSON: &str = "application/json";

/// Cache key for a target/identity pair, before sanitization
pub fn derive_cache_key(base_url: &str, username: &str) -> String {
    format!("jwt-{base_url}-{username}")
}

/// Default headers for page requests
///
/// A missing token renders as an empty bearer value; the first 401 replaces it.
pub fn build_headers(token: Option<&str>) -> StringMap {
    let mut headers = StringMap::new();
    headers.insert(ACCEPT.to_string(), APPLICATION_JSON.to_string());
    headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
    headers.insert(AUTHORIZATION.to_string(), bearer(token.unwrap_or_default()));
    headers
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Where the page loop currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Requesting the page at `cursor`
    Fetching {
        /// Page URL, possibly carrying query parameters
        cursor: String,
        /// Whether the previous step obtained a fresh token for this cursor
        after_reauth: bool,
    },
    /// Obtaining a fresh token before retrying `cursor`
    Reauthenticating {
        /// Page URL to retry
        cursor: String,
    },
    /// No more pages, or the login budget ran out
    Done,
}

/// Result of walking all pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Records from every accepted page, in page order
    pub records: Vec<JsonValue>,
    /// Number of pages answered with 200
    pub pages_fetched: usize,
    /// False when a 401 ended pagination after the login budget ran out
    pub complete: bool,
}

/// Builder for a `PaginatedFetcher`
pub struct PaginatedFetcherBuilder {
    access: Box<dyn ApiAccess>,
    config: FetcherConfig,
    params: StringMap,
    token_store: Option<Box<dyn TokenStore>>,
}

impl PaginatedFetcherBuilder {
    /// Set the fetcher config
    #[must_use]
    pub fn config(mut self, config: FetcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Set caller-supplied query parameters
    ///
    /// Parameters from the access provider win on conflicting keys.
    #[must_use]
    pub fn params(mut self, params: StringMap) -> Self {
        self.params = params;
        self
    }

    /// Use a specific token store instead of the configured backend
    #[must_use]
    pub fn token_store(mut self, store: Box<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Validate the access provider and build the fetcher
    pub async fn build(self) -> Result<PaginatedFetcher> {
        validate_access(self.access.as_ref())?;

        let base_url = self.access.base_url();
        let resource_url = build_resource_url(base_url, self.access.resource_path())?;
        let login_url = build_login_url(base_url, self.access.login_path())?;

        let token_store = match self.token_store {
            Some(store) => store,
            None => {
                let key = derive_cache_key(base_url, self.access.username());
                open_token_store(self.config.token_store_backend, &key, &self.config)
            }
        };

        let mut params = RequestParams::from_map(&self.params);
        params.merge_map(&self.access.params());

        let client = HttpClient::with_config(
            HttpClientConfig::builder()
                .timeout(self.config.timeout)
                .user_agent(&self.config.user_agent)
                .build(),
        )?;

        let cached = token_store.get().await?;
        debug!(
            "Built fetcher for {} (token store '{}', cached token: {})",
            resource_url,
            token_store.key(),
            cached.is_some()
        );

        Ok(PaginatedFetcher {
            access: self.access,
            config: self.config,
            client,
            token_store,
            resource_url,
            login_url,
            params,
            headers: build_headers(cached.as_deref()),
            fail_attempts: 0,
        })
    }
}

/// Fetches every page of a JWT-protected listing
pub struct PaginatedFetcher {
    access: Box<dyn ApiAccess>,
    config: FetcherConfig,
    client: HttpClient,
    token_store: Box<dyn TokenStore>,
    resource_url: String,
    login_url: String,
    params: RequestParams,
    headers: StringMap,
    fail_attempts: u32,
}

impl PaginatedFetcher {
    /// Start building a fetcher for `access`
    pub fn builder(access: impl ApiAccess + 'static) -> PaginatedFetcherBuilder {
        PaginatedFetcherBuilder {
            access: Box::new(access),
            config: FetcherConfig::default(),
            params: StringMap::new(),
            token_store: None,
        }
    }

    /// Build a fetcher with the configured token store backend
    pub async fn new(access: impl ApiAccess + 'static, config: FetcherConfig) -> Result<Self> {
        Self::builder(access).config(config).build().await
    }

    /// URL of the first page
    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    /// URL of the login endpoint
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Unsanitized cache key for this target and identity
    pub fn cache_key(&self) -> String {
        derive_cache_key(self.access.base_url(), self.access.username())
    }

    /// Current request headers
    pub fn headers(&self) -> &StringMap {
        &self.headers
    }

    /// Parameters accumulated so far
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Failed login attempts since this fetcher was built
    pub fn fail_attempts(&self) -> u32 {
        self.fail_attempts
    }

    /// The token store in use
    pub fn token_store(&self) -> &dyn TokenStore {
        self.token_store.as_ref()
    }

    /// The fetcher config
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch every page and return the concatenated records
    ///
    /// When the login budget runs out mid-way the records gathered so far are
    /// returned without an error; use `fetch_pages` to tell the cases apart.
    pub async fn fetch_all_pages(&mut self) -> Result<Vec<JsonValue>> {
        Ok(self.fetch_pages().await?.records)
    }

    /// Fetch every page, reporting whether the listing was read to the end
    pub async fn fetch_pages(&mut self) -> Result<FetchOutcome> {
        let mut outcome = FetchOutcome {
            complete: true,
            ..FetchOutcome::default()
        };

        let mut state = FetchState::Fetching {
            cursor: self.resource_url.clone(),
            after_reauth: false,
        };

        loop {
            state = match state {
                FetchState::Fetching {
                    cursor,
                    after_reauth,
                } => self.fetch_page(cursor, after_reauth, &mut outcome).await?,
                FetchState::Reauthenticating { cursor } => {
                    self.reauthenticate().await?;
                    FetchState::Fetching {
                        cursor,
                        after_reauth: true,
                    }
                }
                FetchState::Done => break,
            };
        }

        info!(
            "Fetched {} records from {} pages of {}",
            outcome.records.len(),
            outcome.pages_fetched,
            self.resource_url
        );
        Ok(outcome)
    }

    /// Request one page and decide the next state
    async fn fetch_page(
        &mut self,
        cursor: String,
        after_reauth: bool,
        outcome: &mut FetchOutcome,
    ) -> Result<FetchState> {
        let (url, cursor_params) = split_cursor(&cursor, &self.resource_url)?;
        self.params.merge_query(&cursor_params);

        debug!("Request url: {} with params {:?}", url, self.params);

        let request = RequestConfig::new()
            .query_pairs(self.params.to_query_pairs())
            .headers(self.headers.clone());
        let response = self.client.get_with_config(&url, request).await?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let body = response.text().await?;
                let page: Page = serde_json::from_str(&body)?;
                outcome.pages_fetched += 1;

                debug!(
                    "Page {} returned {} records",
                    outcome.pages_fetched,
                    page.results.len()
                );

                let next = page.next_cursor().map(ToString::to_string);
                outcome.records.extend(page.results);

                Ok(match next {
                    Some(cursor) => FetchState::Fetching {
                        cursor,
                        after_reauth: false,
                    },
                    None => FetchState::Done,
                })
            }
            StatusCode::UNAUTHORIZED => {
                if after_reauth {
                    // The token we just obtained was refused
                    self.fail_attempts += 1;
                    warn!(
                        "Fresh token rejected for {} ({} failed attempts)",
                        url, self.fail_attempts
                    );
                }

                if self.should_reauthenticate() {
                    info!("Unauthorized response for {}, reauthenticating", url);
                    Ok(FetchState::Reauthenticating { cursor })
                } else {
                    warn!(
                        "Login budget exhausted after {} failed attempts, returning {} records",
                        self.fail_attempts,
                        outcome.records.len()
                    );
                    outcome.complete = false;
                    Ok(FetchState::Done)
                }
            }
            _ => {
                let body = body_text(response).await;
                warn!(
                    "Wrong response status code: {}, content: {}",
                    status.as_u16(),
                    body
                );
                Err(Error::upstream(status.as_u16(), body))
            }
        }
    }

    fn should_reauthenticate(&self) -> bool {
        self.fail_attempts <= self.config.allowed_fail_attempts
    }

    /// Log in, persist the new token and put it in the Authorization header
    ///
    /// A non-200 login counts against the budget and is returned as an
    /// `Error::Auth`.
    pub async fn reauthenticate(&mut self) -> Result<()> {
        let token = self.obtain_token().await?;
        self.headers
            .insert(AUTHORIZATION.to_string(), bearer(&token));
        Ok(())
    }

    async fn obtain_token(&mut self) -> Result<String> {
        debug!("Request url: {}", self.login_url);

        let request = RequestConfig::new()
            .form_field("username", self.access.username())
            .form_field("password", self.access.password());
        let response = self.client.post_with_config(&self.login_url, request).await?;
        let status = response.status();

        if status != StatusCode::OK {
            self.fail_attempts += 1;
            let body = body_text(response).await;
            warn!(
                "Attempt to get a token failed with status {} ({} failed attempts)",
                status.as_u16(),
                self.fail_attempts
            );
            return Err(Error::auth(format!(
                "Login request failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&body)?;
        let Some(token) = login.access.filter(|token| !token.is_empty()) else {
            self.fail_attempts += 1;
            warn!("Login response carried no access token");
            return Err(Error::auth("Login response did not contain an access token"));
        };

        self.token_store.set(&token).await?;
        info!("Received a fresh token for '{}'", self.token_store.key());
        Ok(token)
    }

    /// Fetch every page and keep the records `validator` accepts
    pub async fn fetch_deserialized<T, V>(&mut self, validator: &V) -> Result<Vec<T>>
    where
        V: RecordValidator<T> + ?Sized,
    {
        let records = self.fetch_all_pages().await?;
        Ok(deserialize_records(&records, validator))
    }

    /// Fetch every page and write the records to `path` as a JSON array
    ///
    /// Returns the number of records written.
    pub async fn write_results_to_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let records = self.fetch_all_pages().await?;
        let contents = serde_json::to_string(&records)?;
        tokio::fs::write(path.as_ref(), contents).await?;
        Ok(records.len())
    }
}

impl std::fmt::Debug for PaginatedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFetcher")
            .field("resource_url", &self.resource_url)
            .field("login_url", &self.login_url)
            .field("token_store", &self.token_store.key())
            .field("params", &self.params)
            .field("fail_attempts", &self.fail_attempts)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
