//! Configuration for the paginated fetcher
//!
//! `FetcherConfig` carries the runtime knobs the fetcher is constructed with.
//! `ClientSettings` is the YAML document the CLI reads, describing the target
//! API, the credentials and the fetcher knobs in one place.

use crate::error::{Error, Result};
use crate::fetcher::StaticAccess;
use crate::types::{StringMap, TokenStoreBackend};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of failed logins tolerated before pagination gives up
pub const DEFAULT_ALLOWED_FAIL_ATTEMPTS: u32 = 3;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Fetcher Config
// ============================================================================

/// Runtime configuration for a `PaginatedFetcher`
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Failed logins tolerated before a 401 ends pagination
    pub allowed_fail_attempts: u32,
    /// Where tokens are persisted
    pub token_store_backend: TokenStoreBackend,
    /// Directory for the file backend (system temp dir when `None`)
    pub token_dir: Option<PathBuf>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            allowed_fail_attempts: DEFAULT_ALLOWED_FAIL_ATTEMPTS,
            token_store_backend: TokenStoreBackend::default(),
            token_dir: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("jwt-paginator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetcherConfig {
    /// Create a new config builder
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::default()
    }

    /// Directory used by the file token backend
    pub fn token_dir(&self) -> PathBuf {
        self.token_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Builder for fetcher config
#[derive(Default)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Set the failed-login budget
    pub fn allowed_fail_attempts(mut self, attempts: u32) -> Self {
        self.config.allowed_fail_attempts = attempts;
        self
    }

    /// Set the token store backend
    pub fn token_store_backend(mut self, backend: TokenStoreBackend) -> Self {
        self.config.token_store_backend = backend;
        self
    }

    /// Set the directory for the file backend
    pub fn token_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.token_dir = Some(dir.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> FetcherConfig {
        self.config
    }
}

// ============================================================================
// Client Settings (YAML)
// ============================================================================

/// Settings file describing one API target
///
/// ```yaml
/// base_url: https://api.example.com
/// resource_path: api/v1/items/
/// login_path: api/token/
/// username: joe
/// password_env: API_PASSWORD
/// params:
///   page_size: "100"
/// allowed_fail_attempts: 3
/// token_store: file
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the API
    pub base_url: String,

    /// Path of the paginated resource
    pub resource_path: String,

    /// Path of the login endpoint
    pub login_path: String,

    /// Login username
    pub username: String,

    /// Login password (inline)
    #[serde(default)]
    pub password: Option<String>,

    /// Environment variable holding the login password
    #[serde(default)]
    pub password_env: Option<String>,

    /// Extra query parameters sent with every page request
    #[serde(default)]
    pub params: StringMap,

    /// Failed-login budget
    #[serde(default = "default_allowed_fail_attempts")]
    pub allowed_fail_attempts: u32,

    /// Token store backend
    #[serde(default)]
    pub token_store: TokenStoreBackend,

    /// Directory for the file backend
    #[serde(default)]
    pub token_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_allowed_fail_attempts() -> u32 {
    DEFAULT_ALLOWED_FAIL_ATTEMPTS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientSettings {
    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read settings file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Resolve the password, inline value first, then the environment
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        match &self.password_env {
            Some(var) => std::env::var(var).map_err(|_| {
                Error::invalid_value(
                    "password_env",
                    format!("environment variable {var} is not set"),
                )
            }),
            None => Err(Error::missing_field("password")),
        }
    }

    /// Build the access provider described by these settings
    pub fn access(&self) -> Result<StaticAccess> {
        Ok(StaticAccess::new(
            &self.base_url,
            &self.resource_path,
            &self.login_path,
            &self.username,
            self.resolve_password()?,
        )
        .with_params(self.params.clone()))
    }

    /// Build the fetcher config described by these settings
    pub fn fetcher_config(&self) -> FetcherConfig {
        let mut builder = FetcherConfig::builder()
            .allowed_fail_attempts(self.allowed_fail_attempts)
            .token_store_backend(self.token_store)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(dir) = &self.token_dir {
            builder = builder.token_dir(dir.clone());
        }

        builder.build()
    }
}
