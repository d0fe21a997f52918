//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientSettings;
use crate::error::{Error, Result, ResultExt};
use crate::fetcher::{derive_cache_key, PaginatedFetcher};
use crate::token_store::slugify;
use crate::types::{StringMap, TokenStoreBackend};
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.load_settings()?;

        match &self.cli.command {
            Commands::Fetch {
                output,
                pretty,
                params,
            } => {
                let params = params.iter().cloned().collect();
                self.fetch(&settings, output.as_deref(), *pretty, params)
                    .await
            }
            Commands::Login => self.login(&settings).await,
            Commands::CacheKey => {
                self.cache_key(&settings);
                Ok(())
            }
        }
    }

    /// Load the settings file
    fn load_settings(&self) -> Result<ClientSettings> {
        ClientSettings::from_file(&self.cli.settings)
    }

    async fn build_fetcher(
        &self,
        settings: &ClientSettings,
        params: StringMap,
    ) -> Result<PaginatedFetcher> {
        PaginatedFetcher::builder(settings.access()?)
            .config(settings.fetcher_config())
            .params(params)
            .build()
            .await
    }

    /// Fetch every page and print or save the records
    async fn fetch(
        &self,
        settings: &ClientSettings,
        output: Option<&Path>,
        pretty: bool,
        params: StringMap,
    ) -> Result<()> {
        let mut fetcher = self.build_fetcher(settings, params).await?;
        let outcome = fetcher.fetch_pages().await?;

        if !outcome.complete {
            warn!(
                "Stopped after {} pages: login budget exhausted, results are incomplete",
                outcome.pages_fetched
            );
        }

        match output {
            Some(path) => {
                let contents = serde_json::to_string(&outcome.records)?;
                std::fs::write(path, contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(
                    "Wrote {} records to {}",
                    outcome.records.len(),
                    path.display()
                );
            }
            None => {
                let rendered = if pretty {
                    serde_json::to_string_pretty(&outcome.records)?
                } else {
                    serde_json::to_string(&outcome.records)?
                };
                println!("{rendered}");
            }
        }

        Ok(())
    }

    /// Force a login and persist the token
    async fn login(&self, settings: &ClientSettings) -> Result<()> {
        if settings.token_store == TokenStoreBackend::Memory {
            return Err(Error::invalid_value(
                "token_store",
                "the memory backend is dropped when the command exits; use `file` to keep the token",
            ));
        }

        let mut fetcher = self.build_fetcher(settings, StringMap::new()).await?;
        fetcher.reauthenticate().await?;
        println!(
            "Stored a fresh token under '{}' ({} backend)",
            fetcher.token_store().key(),
            settings.token_store
        );
        Ok(())
    }

    /// Print the cache key
    fn cache_key(&self, settings: &ClientSettings) {
        let key = derive_cache_key(&settings.base_url, &settings.username);
        println!("key:       {key}");
        println!("sanitized: {}", slugify(&key));
    }
}
