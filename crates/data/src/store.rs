//! Storage seam between the curve consumers and the database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sofr_curve_core::RateObservation;

use crate::models::CurveSummary;

/// Persistence operations over the forward curve.
///
/// Implemented by `ForwardCurveRepository`; handlers and the ETL pipeline
/// depend on this trait so tests can swap in fakes.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Atomically replaces the stored curve, returning the rows inserted.
    async fn replace_all(&self, records: &[RateObservation]) -> Result<u64>;

    /// All observations ordered by reset date ascending.
    async fn list_all(&self) -> Result<Vec<RateObservation>>;

    /// Observations dated on or after `from`, ordered ascending.
    async fn list_from(&self, from: NaiveDate) -> Result<Vec<RateObservation>>;

    /// Counts and date range of the stored curve relative to `today`.
    async fn summary(&self, today: NaiveDate) -> Result<CurveSummary>;
}
