//! Access provider
//!
//! Everything the fetcher needs to know about the remote API comes through
//! `ApiAccess`. Accessors are plain reads; an empty required value is a
//! configuration error caught when the fetcher is built.

use crate::error::{Error, Result};
use crate::types::StringMap;
use url::Url;

/// Accessors describing one API target and identity
pub trait ApiAccess: Send + Sync {
    /// Base URL, e.g. `https://api.example.com`
    fn base_url(&self) -> &str;

    /// Path of the paginated resource, e.g. `api/v1/items/`
    fn resource_path(&self) -> &str;

    /// Path of the login endpoint, e.g. `api/token/`
    fn login_path(&self) -> &str;

    /// Login username
    fn username(&self) -> &str;

    /// Login password
    fn password(&self) -> &str;

    /// Extra query parameters for every page request
    fn params(&self) -> StringMap {
        StringMap::new()
    }
}

/// Check that every required accessor yields a usable value
pub fn validate_access(access: &dyn ApiAccess) -> Result<()> {
    let required = [
        ("base_url", access.base_url()),
        ("resource_path", access.resource_path()),
        ("login_path", access.login_path()),
        ("username", access.username()),
        ("password", access.password()),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(Error::missing_field(field));
        }
    }

    Url::parse(access.base_url())
        .map_err(|e| Error::invalid_value("base_url", format!("{}: {e}", access.base_url())))?;

    Ok(())
}

/// `ApiAccess` holding fixed values
#[derive(Clone)]
pub struct StaticAccess {
    base_url: String,
    resource_path: String,
    login_path: String,
    username: String,
    password: String,
    params: StringMap,
}

impl StaticAccess {
    /// Create an access provider from fixed values
    pub fn new(
        base_url: impl Into<String>,
        resource_path: impl Into<String>,
        login_path: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            resource_path: resource_path.into(),
            login_path: login_path.into(),
            username: username.into(),
            password: password.into(),
            params: StringMap::new(),
        }
    }

    /// Set the extra query parameters
    #[must_use]
    pub fn with_params(mut self, params: StringMap) -> Self {
        self.params = params;
        self
    }

    /// Add one extra query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl ApiAccess for StaticAccess {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_path(&self) -> &str {
        &self.resource_path
    }

    fn login_path(&self) -> &str {
        &self.login_path
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn params(&self) -> StringMap {
        self.params.clone()
    }
}

impl std::fmt::Debug for StaticAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAccess")
            .field("base_url", &self.base_url)
            .field("resource_path", &self.resource_path)
            .field("login_path", &self.login_path)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("params", &self.params)
            .finish()
    }
}
