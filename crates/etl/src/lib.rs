//! ETL for the SOFR forward curve.
//!
//! This crate provides:
//! - `FeedFetcher` for downloading the published XML table
//! - `transform` turning feed rows into `RateObservation`s with a skip report
//! - `EtlPipeline` running fetch → transform → replace-all load
//! - `EtlScheduler` for periodic refreshes

pub mod fetch;
pub mod pipeline;
pub mod scheduler;
pub mod transform;

pub use fetch::{FeedFetcher, FeedSource};
pub use pipeline::{EtlPipeline, EtlSummary};
pub use scheduler::EtlScheduler;
pub use transform::{transform, SkipReason, SkippedRow, TransformError, TransformReport};
