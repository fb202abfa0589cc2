//! Forward curve feed fetcher.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use sofr_curve_core::FeedConfig;
use std::time::Duration;

/// A source of raw forward curve documents.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Returns the raw document, or `None` if it could not be retrieved.
    async fn fetch(&self) -> Option<String>;
}

/// Downloads the forward curve XML over HTTP. No retries.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    url: String,
}

impl FeedFetcher {
    /// Creates a fetcher for the configured feed.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Fetches the document, treating any non-success status as an error.
    ///
    /// # Errors
    /// Returns an error on network failure or an HTTP error status.
    pub async fn try_fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Feed request failed with status: {}", status);
        }

        response
            .text()
            .await
            .context("Failed to read feed response body")
    }
}

#[async_trait]
impl FeedSource for FeedFetcher {
    async fn fetch(&self) -> Option<String> {
        tracing::info!("Fetching XML data from {}", self.url);

        match self.try_fetch().await {
            Ok(body) => {
                tracing::info!("XML data fetched successfully ({} bytes)", body.len());
                Some(body)
            }
            Err(e) => {
                tracing::error!("Error fetching XML data: {:#}", e);
                None
            }
        }
    }
}
