//! Fetch → transform → replace-all load.

use anyhow::Result;
use sofr_curve_data::RateStore;
use std::sync::Arc;
use tracing::{error, info};

use crate::fetch::FeedSource;
use crate::transform::{transform, SkippedRow};

/// Result of one ETL run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlSummary {
    /// Whether the feed document was retrieved
    pub feed_fetched: bool,
    /// Observations produced by the transform
    pub transformed: usize,
    /// Rows left out, with reasons
    pub skipped: Vec<SkippedRow>,
    /// Rows written to the store
    pub loaded: u64,
}

/// The ETL job populating the forward curve store.
///
/// A feed that cannot be fetched counts as an empty feed, so the load still
/// runs and the store ends up empty. A malformed document aborts the run
/// before the store is touched.
pub struct EtlPipeline {
    source: Arc<dyn FeedSource>,
    store: Arc<dyn RateStore>,
}

impl EtlPipeline {
    #[must_use]
    pub fn new(source: Arc<dyn FeedSource>, store: Arc<dyn RateStore>) -> Self {
        Self { source, store }
    }

    /// Runs the pipeline once.
    ///
    /// # Errors
    /// Returns an error if the feed is malformed or the load fails; the store
    /// keeps its previous contents in both cases.
    pub async fn run(&self) -> Result<EtlSummary> {
        info!("Starting ETL process");

        let document = self.source.fetch().await;
        let feed_fetched = document.is_some();

        let report = transform(document.as_deref()).map_err(|e| {
            error!("Error transforming feed: {}", e);
            e
        })?;

        let loaded = self.store.replace_all(&report.records).await?;

        info!("ETL process completed");
        Ok(EtlSummary {
            feed_fetched,
            transformed: report.records.len(),
            skipped: report.skipped,
            loaded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sofr_curve_core::RateObservation;
    use sofr_curve_data::DatabaseClient;

    struct StaticFeed(Option<&'static str>);

    #[async_trait]
    impl FeedSource for StaticFeed {
        async fn fetch(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_store() -> Arc<dyn RateStore> {
        let repo = DatabaseClient::new_in_memory().await.unwrap().forward_curve();
        repo.replace_all(&[RateObservation::new(date(2020, 1, 1), dec!(0.05))])
            .await
            .unwrap();
        Arc::new(repo)
    }

    #[tokio::test]
    async fn test_run_replaces_stored_curve() {
        let store = seeded_store().await;
        let feed = StaticFeed(Some(
            "<Root>\
               <Row><ResetDate>2024-10-01</ResetDate><ONEMTSOFR>0.15%</ONEMTSOFR></Row>\
               <Row><ResetDate>2024-10-02</ResetDate><ONEMTSOFR>bad</ONEMTSOFR></Row>\
             </Root>",
        ));
        let pipeline = EtlPipeline::new(Arc::new(feed), store.clone());

        let summary = pipeline.run().await.unwrap();

        assert!(summary.feed_fetched);
        assert_eq!(summary.transformed, 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.loaded, 1);
        assert_eq!(
            store.list_all().await.unwrap(),
            vec![RateObservation::new(date(2024, 10, 1), dec!(0.0015))]
        );
    }

    #[tokio::test]
    async fn test_unreachable_feed_empties_store() {
        let store = seeded_store().await;
        let pipeline = EtlPipeline::new(Arc::new(StaticFeed(None)), store.clone());

        let summary = pipeline.run().await.unwrap();

        assert!(!summary.feed_fetched);
        assert_eq!(summary.loaded, 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_feed_leaves_store_untouched() {
        let store = seeded_store().await;
        let feed = StaticFeed(Some("<Root><Row></Root>"));
        let pipeline = EtlPipeline::new(Arc::new(feed), store.clone());

        assert!(pipeline.run().await.is_err());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_error_page_wrapping_feed_leaves_store_untouched() {
        let store = seeded_store().await;
        let feed = StaticFeed(Some("Service Unavailable <Root></Root>"));
        let pipeline = EtlPipeline::new(Arc::new(feed), store.clone());

        assert!(pipeline.run().await.is_err());
        assert_eq!(
            store.list_all().await.unwrap(),
            vec![RateObservation::new(date(2020, 1, 1), dec!(0.05))]
        );
    }
}
