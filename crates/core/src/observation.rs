//! Forward curve observation model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept for a stored one-month rate.
pub const STORED_RATE_DP: u32 = 4;

/// One point on the SOFR forward curve.
///
/// `one_month_rate` is a fraction (0.0015 = 0.15%), never a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateObservation {
    /// Reset date of the one-month rate; unique across the curve
    pub reset_date: NaiveDate,
    /// Expected one-month SOFR as a fraction
    #[serde(with = "rust_decimal::serde::float")]
    pub one_month_rate: Decimal,
}

impl RateObservation {
    #[must_use]
    pub fn new(reset_date: NaiveDate, one_month_rate: Decimal) -> Self {
        Self {
            reset_date,
            one_month_rate,
        }
    }

    /// Builds an observation from a quoted percentage (e.g. `0.15` for 0.15%).
    ///
    /// The fraction is rounded to four decimal places.
    #[must_use]
    pub fn from_percentage(reset_date: NaiveDate, percentage: Decimal) -> Self {
        let rate = (percentage / Decimal::ONE_HUNDRED).round_dp(STORED_RATE_DP);
        Self::new(reset_date, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_percentage_converts_to_fraction() {
        let obs = RateObservation::from_percentage(date(2024, 10, 1), dec!(0.15));
        assert_eq!(obs.one_month_rate, dec!(0.0015));
    }

    #[test]
    fn test_from_percentage_rounds_to_four_places() {
        let obs = RateObservation::from_percentage(date(2024, 10, 1), dec!(4.31237));
        assert_eq!(obs.one_month_rate, dec!(0.0431));
    }

    #[test]
    fn test_serializes_camel_case_with_numeric_rate() {
        let obs = RateObservation::new(date(2024, 10, 2), dec!(0.002));
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["resetDate"], "2024-10-02");
        assert_eq!(json["oneMonthRate"], serde_json::json!(0.002));
    }
}
