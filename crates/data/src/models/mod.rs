//! Data models for the forward curve store.
//!
//! Rows derive `sqlx::FromRow`; conversions expose the core
//! `RateObservation` with `rust_decimal::Decimal` rates.

pub mod forward_curve;

pub use forward_curve::{CurveSummary, ForwardCurveRow};
