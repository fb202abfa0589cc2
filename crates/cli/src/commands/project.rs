//! Project a loan rate schedule from the stored curve.

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Args;
use rust_decimal::Decimal;
use sofr_curve_core::{parse_maturity_date, project_rates, LoanTerms};

use super::context::{self, ConfigArgs};

/// Arguments for the project command.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Loan maturity date (MM/DD/YYYY)
    #[arg(long)]
    pub maturity_date: String,

    /// Minimum rate as a fraction (e.g., 0.01)
    #[arg(long)]
    pub floor: Decimal,

    /// Maximum rate as a fraction (e.g., 0.05)
    #[arg(long)]
    pub ceiling: Decimal,

    /// Spread over SOFR as a fraction (e.g., 0.02)
    #[arg(long)]
    pub spread: Decimal,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Runs the project command.
///
/// # Errors
/// Returns an error if the parameters are invalid, the store cannot be read,
/// or no rates could be projected.
pub async fn run_project(args: ProjectArgs) -> Result<()> {
    let maturity = parse_maturity_date(&args.maturity_date)?;
    let terms = LoanTerms::new(maturity, args.floor, args.ceiling, args.spread)?;

    let config = args.config.load()?;
    let db = context::connect(&config).await?;

    let today = Local::now().date_naive();
    let observations = db.forward_curve().list_from(today).await?;
    let schedule = project_rates(&terms, today, &observations);
    db.close().await;

    if schedule.is_empty() {
        return Err(anyhow!(
            "No rates projected: {} future observations, maturity {}",
            observations.len(),
            maturity
        ));
    }

    println!("{:<12} {:>10}", "Date", "Rate");
    println!("{}", "-".repeat(23));
    for point in &schedule {
        println!("{:<12} {:>10}", point.date, point.rate);
    }

    Ok(())
}
