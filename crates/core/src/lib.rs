//! Core types for the SOFR forward curve service.
//!
//! This crate provides:
//! - Application configuration and its figment-based loader
//! - The `RateObservation` curve model
//! - The monthly loan rate projection

pub mod config;
pub mod config_loader;
pub mod observation;
pub mod projection;

pub use config::{AppConfig, DatabaseConfig, EtlConfig, FeedConfig, ServerConfig, DEFAULT_FEED_URL};
pub use config_loader::ConfigLoader;
pub use observation::RateObservation;
pub use projection::{
    parse_maturity_date, project_rates, schedule_length, LoanTerms, ProjectedRate,
    ProjectionError,
};
