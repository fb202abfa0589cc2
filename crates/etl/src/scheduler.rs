use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::pipeline::EtlPipeline;

/// Re-runs the ETL pipeline on a cron schedule.
pub struct EtlScheduler {
    pipeline: Arc<EtlPipeline>,
    cron_schedule: String,
}

impl EtlScheduler {
    /// Creates a new ETL scheduler.
    ///
    /// `cron_schedule` uses the six-field form with seconds, e.g. `"0 0 6 * * *"`.
    #[must_use]
    pub fn new(pipeline: Arc<EtlPipeline>, cron_schedule: impl Into<String>) -> Self {
        Self {
            pipeline,
            cron_schedule: cron_schedule.into(),
        }
    }

    /// Registers the refresh job and starts the scheduler.
    ///
    /// The returned scheduler keeps running in the background; call
    /// `shutdown` on it to stop.
    ///
    /// # Errors
    /// Returns an error if the cron expression is invalid or the scheduler fails to start.
    pub async fn start(self) -> Result<JobScheduler> {
        let pipeline = self.pipeline.clone();

        let job = Job::new_async(self.cron_schedule.as_str(), move |_uuid, _lock| {
            let pipeline = pipeline.clone();
            Box::pin(async move {
                match pipeline.run().await {
                    Ok(summary) => info!(
                        "Scheduled ETL loaded {} records ({} skipped)",
                        summary.loaded,
                        summary.skipped.len()
                    ),
                    Err(e) => error!("Scheduled ETL failed: {:#}", e),
                }
            })
        })
        .with_context(|| format!("Invalid ETL cron schedule: {}", self.cron_schedule))?;

        let scheduler = JobScheduler::new().await?;
        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("ETL scheduler started with cron: {}", self.cron_schedule);
        Ok(scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FeedSource;
    use async_trait::async_trait;
    use sofr_curve_data::DatabaseClient;

    struct EmptyFeed;

    #[async_trait]
    impl FeedSource for EmptyFeed {
        async fn fetch(&self) -> Option<String> {
            None
        }
    }

    async fn pipeline() -> Arc<EtlPipeline> {
        let repo = DatabaseClient::new_in_memory().await.unwrap().forward_curve();
        Arc::new(EtlPipeline::new(Arc::new(EmptyFeed), Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_invalid_cron_is_rejected() {
        let scheduler = EtlScheduler::new(pipeline().await, "every morning");
        assert!(scheduler.start().await.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_valid_cron_starts() {
        let scheduler = EtlScheduler::new(pipeline().await, "0 0 6 * * *");
        let mut running = scheduler.start().await.unwrap();
        running.shutdown().await.unwrap();
    }
}
