//! Print the stored forward curve.

use anyhow::Result;
use clap::Args;

use super::context::{self, ConfigArgs};

/// Arguments for the rates command.
#[derive(Args, Debug, Clone)]
pub struct RatesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Runs the rates command.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub async fn run_rates(args: RatesArgs) -> Result<()> {
    let config = args.config.load()?;
    let db = context::connect(&config).await?;

    let rates = db.forward_curve().list_all().await?;

    if rates.is_empty() {
        println!("No SOFR rates stored. Run `sofr-curve etl` first.");
    } else {
        println!("{:<12} {:>10}", "Reset Date", "1M SOFR");
        println!("{}", "-".repeat(23));
        for obs in &rates {
            println!("{:<12} {:>10}", obs.reset_date, obs.one_month_rate);
        }
        println!("\n{} observations", rates.len());
    }

    db.close().await;
    Ok(())
}
