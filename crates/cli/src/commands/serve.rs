//! Web API command.
//!
//! Optionally refreshes the curve before binding, then serves the HTTP API
//! with an optional cron-driven ETL running alongside.

use anyhow::Result;
use clap::Args;
use sofr_curve_etl::EtlScheduler;
use sofr_curve_web_api::{ApiServer, AppState};
use std::sync::Arc;

use super::context::{self, ConfigArgs};

/// Arguments for the serve command.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Server address (overrides `server.host` and `server.port`)
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Do not run the ETL before starting the server
    #[arg(long)]
    pub skip_etl: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Runs the serve command.
///
/// # Errors
/// Returns an error if the database is unreachable, the cron schedule is
/// invalid, or the server fails to bind.
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.config.load()?;
    let db = context::connect(&config).await?;
    let pipeline = Arc::new(context::pipeline(&config, &db)?);

    if config.etl.run_on_startup && !args.skip_etl {
        match pipeline.run().await {
            Ok(summary) => tracing::info!(
                "Startup ETL loaded {} records ({} skipped)",
                summary.loaded,
                summary.skipped.len()
            ),
            Err(e) => tracing::error!("Startup ETL failed, serving existing curve: {:#}", e),
        }
    }

    let mut scheduler = match &config.etl.cron_schedule {
        Some(cron) => Some(EtlScheduler::new(pipeline.clone(), cron.as_str()).start().await?),
        None => None,
    };

    let addr = args.addr.unwrap_or_else(|| config.server.addr());
    let state = AppState::new(Arc::new(db.forward_curve()));
    let result = ApiServer::new(state).serve(&addr).await;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::error!("Error stopping ETL scheduler: {}", e);
        }
    }
    db.close().await;

    result
}
