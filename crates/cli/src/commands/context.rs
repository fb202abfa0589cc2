//! Shared configuration and store setup for all commands.

use anyhow::{Context, Result};
use clap::Args;
use sofr_curve_core::{AppConfig, ConfigLoader};
use sofr_curve_data::DatabaseClient;
use sofr_curve_etl::{EtlPipeline, FeedFetcher};
use std::sync::Arc;

/// Configuration flags accepted by every command.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, default_value = sofr_curve_core::config_loader::DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Database connection URL (overrides `database.url`)
    #[arg(long, env = "DATABASE_URL")]
    pub db_url: Option<String>,
}

impl ConfigArgs {
    /// Loads the configuration file and applies command-line overrides.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be parsed.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = ConfigLoader::load_from(&self.config)
            .with_context(|| format!("Failed to load config from {}", self.config))?;

        if let Some(url) = &self.db_url {
            config.database.url.clone_from(url);
        }

        Ok(config)
    }
}

/// Connects to the configured database.
///
/// # Errors
/// Returns an error if the connection or migrations fail.
pub async fn connect(config: &AppConfig) -> Result<DatabaseClient> {
    let db = DatabaseClient::new(&config.database.url, config.database.max_connections).await?;
    tracing::info!("Connected to database");
    Ok(db)
}

/// Builds the ETL pipeline over the configured feed and store.
///
/// # Errors
/// Returns an error if the HTTP client cannot be created.
pub fn pipeline(config: &AppConfig, db: &DatabaseClient) -> Result<EtlPipeline> {
    let fetcher = FeedFetcher::new(&config.feed)?;
    Ok(EtlPipeline::new(Arc::new(fetcher), Arc::new(db.forward_curve())))
}
