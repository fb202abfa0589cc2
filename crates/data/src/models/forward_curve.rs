//! Forward curve row model.
//!
//! The table stores the reset date as ISO-8601 text and the rate as a REAL
//! fraction. Conversions to and from the core `RateObservation` live here.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sofr_curve_core::observation::{RateObservation, STORED_RATE_DP};

/// Text format of `forward_curve.reset_date`.
pub const RESET_DATE_FORMAT: &str = "%Y-%m-%d";

/// A raw `forward_curve` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForwardCurveRow {
    /// Reset date (`YYYY-MM-DD`)
    pub reset_date: String,
    /// One-month SOFR as a fraction
    pub one_month_sofr: f64,
}

impl ForwardCurveRow {
    /// Converts a curve observation into its stored form.
    ///
    /// # Errors
    /// Returns an error if the rate cannot be represented as `f64`.
    pub fn from_observation(observation: &RateObservation) -> Result<Self> {
        let one_month_sofr = observation
            .one_month_rate
            .to_f64()
            .ok_or_else(|| anyhow!("Rate {} is not representable", observation.one_month_rate))?;

        Ok(Self {
            reset_date: observation.reset_date.format(RESET_DATE_FORMAT).to_string(),
            one_month_sofr,
        })
    }

    /// Converts the stored row back into a curve observation.
    ///
    /// # Errors
    /// Returns an error if the stored date or rate is malformed.
    pub fn into_observation(self) -> Result<RateObservation> {
        let reset_date = NaiveDate::parse_from_str(&self.reset_date, RESET_DATE_FORMAT)
            .with_context(|| format!("Malformed reset_date in store: {}", self.reset_date))?;
        let rate = Decimal::from_f64(self.one_month_sofr)
            .ok_or_else(|| anyhow!("Malformed one_month_sofr in store: {}", self.one_month_sofr))?
            .round_dp(STORED_RATE_DP);

        Ok(RateObservation::new(reset_date, rate))
    }
}

/// Aggregate view of the stored curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSummary {
    /// Total observations stored
    pub observation_count: i64,
    /// Observations dated on or after the reference date
    pub future_observation_count: i64,
    /// Earliest reset date, if any
    pub earliest_reset_date: Option<NaiveDate>,
    /// Latest reset date, if any
    pub latest_reset_date: Option<NaiveDate>,
}

impl CurveSummary {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            observation_count: 0,
            future_observation_count: 0,
            earliest_reset_date: None,
            latest_reset_date: None,
        }
    }
}
