//! One-shot ETL command.
//!
//! Fetches the forward curve feed, transforms it, and replaces the stored curve.

use anyhow::Result;
use clap::Args;

use super::context::{self, ConfigArgs};

/// Arguments for the etl command.
#[derive(Args, Debug, Clone)]
pub struct EtlArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Runs the etl command.
///
/// # Errors
/// Returns an error if the database is unreachable, the feed is malformed,
/// or the load fails.
pub async fn run_etl(args: EtlArgs) -> Result<()> {
    let config = args.config.load()?;
    let db = context::connect(&config).await?;
    let pipeline = context::pipeline(&config, &db)?;

    let summary = pipeline.run().await?;

    if !summary.feed_fetched {
        tracing::warn!("Feed unavailable at {}; stored curve is now empty", config.feed.url);
    }
    for skipped in &summary.skipped {
        tracing::debug!("Row {} skipped: {}", skipped.row_index, skipped.reason);
    }

    tracing::info!(
        "ETL complete: {} records loaded, {} rows skipped",
        summary.loaded,
        summary.skipped.len()
    );

    db.close().await;
    Ok(())
}
