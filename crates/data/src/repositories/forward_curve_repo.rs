//! Forward curve repository.
//!
//! Provides the replace-all load used by the ETL and the ordered reads used
//! by the HTTP handlers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sofr_curve_core::RateObservation;
use sqlx::SqlitePool;

use crate::models::forward_curve::RESET_DATE_FORMAT;
use crate::models::{CurveSummary, ForwardCurveRow};
use crate::store::RateStore;

/// Repository for the `forward_curve` table.
#[derive(Debug, Clone)]
pub struct ForwardCurveRepository {
    pool: SqlitePool,
}

impl ForwardCurveRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replaces the whole curve in one transaction.
    ///
    /// Existing rows are deleted and `records` inserted. On any failure the
    /// transaction is rolled back, leaving the previous curve intact.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn replace_all(&self, records: &[RateObservation]) -> Result<u64> {
        tracing::info!("Loading {} records into database", records.len());

        match self.try_replace_all(records).await {
            Ok(inserted) => {
                tracing::info!("Successfully loaded {} records into the database", inserted);
                Ok(inserted)
            }
            Err(e) => {
                tracing::error!("Error loading data into database: {:#}", e);
                Err(e)
            }
        }
    }

    async fn try_replace_all(&self, records: &[RateObservation]) -> Result<u64> {
        let rows = records
            .iter()
            .map(ForwardCurveRow::from_observation)
            .collect::<Result<Vec<_>>>()?;

        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM forward_curve")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!("Deleted {} stale forward curve rows", deleted);

        let mut inserted = 0;
        for row in &rows {
            inserted += sqlx::query(
                r"
                INSERT INTO forward_curve (reset_date, one_month_sofr)
                VALUES (?1, ?2)
                ",
            )
            .bind(&row.reset_date)
            .bind(row.one_month_sofr)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert reset date {}", row.reset_date))?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Returns every observation ordered by reset date ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored row is malformed.
    pub async fn list_all(&self) -> Result<Vec<RateObservation>> {
        let rows = sqlx::query_as::<_, ForwardCurveRow>(
            r"
            SELECT reset_date, one_month_sofr
            FROM forward_curve
            ORDER BY reset_date ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ForwardCurveRow::into_observation).collect()
    }

    /// Returns observations dated on or after `from`, ordered ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored row is malformed.
    pub async fn list_from(&self, from: NaiveDate) -> Result<Vec<RateObservation>> {
        let rows = sqlx::query_as::<_, ForwardCurveRow>(
            r"
            SELECT reset_date, one_month_sofr
            FROM forward_curve
            WHERE reset_date >= ?1
            ORDER BY reset_date ASC
            ",
        )
        .bind(from.format(RESET_DATE_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ForwardCurveRow::into_observation).collect()
    }

    /// Summarizes the stored curve relative to `today`.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored date is malformed.
    pub async fn summary(&self, today: NaiveDate) -> Result<CurveSummary> {
        let (observation_count, future_observation_count, earliest, latest): (
            i64,
            i64,
            Option<String>,
            Option<String>,
        ) = sqlx::query_as(
            r"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN reset_date >= ?1 THEN 1 ELSE 0 END), 0),
                MIN(reset_date),
                MAX(reset_date)
            FROM forward_curve
            ",
        )
        .bind(today.format(RESET_DATE_FORMAT).to_string())
        .fetch_one(&self.pool)
        .await?;

        let parse = |value: Option<String>| -> Result<Option<NaiveDate>> {
            value
                .map(|s| {
                    NaiveDate::parse_from_str(&s, RESET_DATE_FORMAT)
                        .with_context(|| format!("Malformed reset_date in store: {s}"))
                })
                .transpose()
        };

        Ok(CurveSummary {
            observation_count,
            future_observation_count,
            earliest_reset_date: parse(earliest)?,
            latest_reset_date: parse(latest)?,
        })
    }
}

#[async_trait]
impl RateStore for ForwardCurveRepository {
    async fn replace_all(&self, records: &[RateObservation]) -> Result<u64> {
        Self::replace_all(self, records).await
    }

    async fn list_all(&self) -> Result<Vec<RateObservation>> {
        Self::list_all(self).await
    }

    async fn list_from(&self, from: NaiveDate) -> Result<Vec<RateObservation>> {
        Self::list_from(self, from).await
    }

    async fn summary(&self, today: NaiveDate) -> Result<CurveSummary> {
        Self::summary(self, today).await
    }
}
