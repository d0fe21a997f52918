//! File cache backend
//!
//! The token is the full contents of `<dir>/<sanitized-key>`, no framing.

use super::types::{slugify, TokenStore};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Token store keeping one file per cache key
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    key: String,
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store for `key` in the system temp directory
    pub fn new(key: &str) -> Self {
        Self::in_dir(key, std::env::temp_dir())
    }

    /// Create a store for `key` in `dir`
    pub fn in_dir(key: &str, dir: impl AsRef<Path>) -> Self {
        let key = slugify(key);
        let path = dir.as_ref().join(&key);
        Self { key, path }
    }

    /// Path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    fn key(&self) -> &str {
        &self.key
    }

    async fn get(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cached token at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(Error::token_store(
                &self.key,
                format!("Failed to read {}: {e}", self.path.display()),
            )),
        }
    }

    async fn set(&self, token: &str) -> Result<()> {
        let write_error = |e: std::io::Error| {
            Error::token_store(
                &self.key,
                format!("Failed to write {}: {e}", self.path.display()),
            )
        };

        if let Ok(meta) = tokio::fs::symlink_metadata(&self.path).await {
            if meta.file_type().is_symlink() {
                return Err(Error::token_store(
                    &self.key,
                    format!("Refusing to write through symlink {}", self.path.display()),
                ));
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Owner read/write only
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path).await.map_err(write_error)?;

        // `mode` only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(write_error)?;
        }

        file.write_all(token.as_bytes())
            .await
            .map_err(write_error)?;
        file.flush().await.map_err(write_error)?;
        Ok(())
    }
}
