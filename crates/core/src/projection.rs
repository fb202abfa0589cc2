//! Monthly loan rate projection over the stored forward curve.
//!
//! The schedule starts today and steps forward one calendar month at a time,
//! each step taken from the previous date and clamped to the end of short
//! months (Jan 31, Feb 28, Mar 28). Step `i` is paired with the `i`-th
//! observation whose reset date is on or after today. The paired rate is offset by the spread and clamped into
//! `[floor, ceiling]`. The schedule ends at the maturity date (inclusive) or
//! when the observations run out, whichever comes first.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observation::RateObservation;

/// Accepted `maturityDate` format (`MM/DD/YYYY`).
pub const MATURITY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Decimal places kept for a projected rate.
pub const PROJECTED_RATE_DP: u32 = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("rateFloor must not exceed rateCeiling.")]
    FloorAboveCeiling,

    #[error("Invalid maturity date format, expected MM/DD/YYYY.")]
    InvalidMaturityDate(String),
}

/// Pricing terms of a floating-rate loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanTerms {
    maturity_date: NaiveDate,
    rate_floor: Decimal,
    rate_ceiling: Decimal,
    rate_spread: Decimal,
}

impl LoanTerms {
    /// Creates loan terms.
    ///
    /// # Errors
    /// Returns `ProjectionError::FloorAboveCeiling` if the floor exceeds the ceiling.
    pub fn new(
        maturity_date: NaiveDate,
        rate_floor: Decimal,
        rate_ceiling: Decimal,
        rate_spread: Decimal,
    ) -> Result<Self, ProjectionError> {
        if rate_floor > rate_ceiling {
            return Err(ProjectionError::FloorAboveCeiling);
        }

        Ok(Self {
            maturity_date,
            rate_floor,
            rate_ceiling,
            rate_spread,
        })
    }

    #[must_use]
    pub const fn maturity_date(&self) -> NaiveDate {
        self.maturity_date
    }

    #[must_use]
    pub const fn rate_floor(&self) -> Decimal {
        self.rate_floor
    }

    #[must_use]
    pub const fn rate_ceiling(&self) -> Decimal {
        self.rate_ceiling
    }

    #[must_use]
    pub const fn rate_spread(&self) -> Decimal {
        self.rate_spread
    }

    /// Applies the spread to a reference rate and clamps it into `[floor, ceiling]`.
    #[must_use]
    pub fn adjust(&self, reference_rate: Decimal) -> Decimal {
        (reference_rate + self.rate_spread)
            .max(self.rate_floor)
            .min(self.rate_ceiling)
    }
}

/// One month of a projected rate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedRate {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

/// Parses a `MM/DD/YYYY` maturity date.
///
/// # Errors
/// Returns `ProjectionError::InvalidMaturityDate` if the input does not match the format.
pub fn parse_maturity_date(input: &str) -> Result<NaiveDate, ProjectionError> {
    NaiveDate::parse_from_str(input, MATURITY_DATE_FORMAT)
        .map_err(|_| ProjectionError::InvalidMaturityDate(input.to_string()))
}

/// Number of monthly schedule dates from `start` through `end` inclusive.
///
/// Returns 0 when `end` is before `start`.
#[must_use]
pub fn schedule_length(start: NaiveDate, end: NaiveDate) -> usize {
    monthly_dates(start).take_while(|date| *date <= end).count()
}

/// Projects monthly loan rates from `today` through the maturity date.
///
/// `observations` must be sorted by reset date ascending; entries dated
/// before `today` are ignored.
#[must_use]
pub fn project_rates(
    terms: &LoanTerms,
    today: NaiveDate,
    observations: &[RateObservation],
) -> Vec<ProjectedRate> {
    let future = observations.iter().filter(|obs| obs.reset_date >= today);

    monthly_dates(today)
        .take_while(|date| *date <= terms.maturity_date)
        .zip(future)
        .map(|(date, obs)| ProjectedRate {
            date,
            rate: terms.adjust(obs.one_month_rate).round_dp(PROJECTED_RATE_DP),
        })
        .collect()
}

fn monthly_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |date| date.checked_add_months(Months::new(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn curve(start: NaiveDate, rates: &[Decimal]) -> Vec<RateObservation> {
        rates
            .iter()
            .zip(0u32..)
            .map(|(rate, i)| RateObservation::new(start + Months::new(i), *rate))
            .collect()
    }

    fn terms(maturity: NaiveDate) -> LoanTerms {
        LoanTerms::new(maturity, dec!(0.01), dec!(0.05), dec!(0.02)).unwrap()
    }

    #[test]
    fn test_spread_pushes_rate_to_ceiling() {
        let today = date(2024, 12, 1);
        let observations = curve(today, &[dec!(0.03)]);

        let schedule = project_rates(&terms(date(2025, 6, 1)), today, &observations);

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].date, today);
        assert_eq!(schedule[0].rate, dec!(0.05));
    }

    #[test]
    fn test_adjust_clamps_both_bounds() {
        let terms = terms(date(2025, 1, 1));
        assert_eq!(terms.adjust(dec!(-0.05)), dec!(0.01));
        assert_eq!(terms.adjust(dec!(0.015)), dec!(0.035));
        assert_eq!(terms.adjust(dec!(0.10)), dec!(0.05));
    }

    #[test]
    fn test_maturity_is_inclusive() {
        let today = date(2024, 12, 15);
        let observations = curve(today, &[dec!(0.01), dec!(0.02), dec!(0.025), dec!(0.03)]);

        let schedule = project_rates(&terms(date(2025, 2, 15)), today, &observations);

        let dates: Vec<_> = schedule.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 12, 15), date(2025, 1, 15), date(2025, 2, 15)]
        );
        assert_eq!(schedule[0].rate, dec!(0.03));
        assert_eq!(schedule[1].rate, dec!(0.04));
        assert_eq!(schedule[2].rate, dec!(0.045));
    }

    #[test]
    fn test_stops_when_observations_run_out() {
        let today = date(2024, 12, 1);
        let observations = curve(today, &[dec!(0.03), dec!(0.035)]);

        let schedule = project_rates(&terms(date(2030, 1, 1)), today, &observations);

        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_past_observations_are_ignored() {
        let today = date(2025, 3, 10);
        let mut observations = curve(date(2025, 1, 10), &[dec!(0.0), dec!(0.0)]);
        observations.push(RateObservation::new(date(2025, 3, 31), dec!(0.02)));

        let schedule = project_rates(&terms(date(2025, 12, 31)), today, &observations);

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].date, today);
        assert_eq!(schedule[0].rate, dec!(0.04));
    }

    #[test]
    fn test_maturity_before_today_yields_nothing() {
        let today = date(2025, 3, 10);
        let observations = curve(today, &[dec!(0.03)]);

        let schedule = project_rates(&terms(date(2025, 3, 9)), today, &observations);

        assert!(schedule.is_empty());
    }

    #[test]
    fn test_month_end_start_steps_from_previous_date() {
        let today = date(2025, 1, 31);
        let observations = curve(today, &[dec!(0.02); 6]);

        let schedule = project_rates(&terms(date(2025, 3, 30)), today, &observations);

        let dates: Vec<_> = schedule.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 31), date(2025, 2, 28), date(2025, 3, 28)]
        );
    }

    #[test]
    fn test_schedule_respects_length_and_bounds() {
        let today = date(2024, 11, 5);
        let rates: Vec<Decimal> = (0..40).map(|i| Decimal::new(i * 25, 4)).collect();
        let observations = curve(today, &rates);
        let maturity = date(2026, 8, 1);
        let terms = LoanTerms::new(maturity, dec!(0.02), dec!(0.06), dec!(0.015)).unwrap();

        let schedule = project_rates(&terms, today, &observations);

        assert!(schedule.len() <= schedule_length(today, maturity));
        assert!(schedule.len() <= observations.len());
        assert!(schedule
            .iter()
            .all(|p| p.rate >= terms.rate_floor() && p.rate <= terms.rate_ceiling()));
    }

    #[test]
    fn test_rates_rounded_to_six_places() {
        let today = date(2024, 12, 1);
        let observations = curve(today, &[dec!(0.0312345678)]);
        let terms = LoanTerms::new(date(2025, 1, 1), dec!(0), dec!(1), dec!(0)).unwrap();

        let schedule = project_rates(&terms, today, &observations);

        assert_eq!(schedule[0].rate, dec!(0.031235));
    }

    #[test]
    fn test_floor_above_ceiling_rejected() {
        let result = LoanTerms::new(date(2025, 1, 1), dec!(0.06), dec!(0.05), dec!(0.01));
        assert_eq!(result, Err(ProjectionError::FloorAboveCeiling));
    }

    #[test]
    fn test_schedule_length() {
        assert_eq!(schedule_length(date(2024, 12, 1), date(2025, 2, 1)), 3);
        assert_eq!(schedule_length(date(2024, 12, 1), date(2025, 1, 31)), 2);
        assert_eq!(schedule_length(date(2024, 12, 1), date(2024, 11, 30)), 0);
        assert_eq!(schedule_length(date(2025, 1, 31), date(2025, 3, 30)), 3);
    }

    #[test]
    fn test_parse_maturity_date() {
        assert_eq!(parse_maturity_date("02/02/2025"), Ok(date(2025, 2, 2)));
        assert!(matches!(
            parse_maturity_date("2025-02-02"),
            Err(ProjectionError::InvalidMaturityDate(_))
        ));
        assert!(parse_maturity_date("13/01/2025").is_err());
        assert!(parse_maturity_date(" 02/02/2025 ").is_err());
    }
}
