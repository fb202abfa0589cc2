//! Data storage for the SOFR forward curve service.
//!
//! This crate provides:
//! - `SQLite` database client with embedded migrations
//! - The forward curve row model
//! - A repository for replace-all loads and ordered reads
//! - The `RateStore` trait consumed by the ETL and the web API

pub mod database;
pub mod models;
pub mod repositories;
pub mod store;

pub use database::DatabaseClient;
pub use models::{CurveSummary, ForwardCurveRow};
pub use repositories::ForwardCurveRepository;
pub use store::RateStore;
