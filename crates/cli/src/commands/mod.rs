//! CLI commands for the SOFR forward curve service.

pub mod context;
pub mod etl;
pub mod project;
pub mod rates;
pub mod serve;

pub use context::ConfigArgs;
pub use etl::{run_etl, EtlArgs};
pub use project::{run_project, ProjectArgs};
pub use rates::{run_rates, RatesArgs};
pub use serve::{run_serve, ServeArgs};
