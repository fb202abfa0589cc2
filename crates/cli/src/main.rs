use clap::{Parser, Subcommand};

mod commands;

use commands::{EtlArgs, ProjectArgs, RatesArgs, ServeArgs};

#[derive(Parser)]
#[command(name = "sofr-curve")]
#[command(about = "SOFR forward curve ETL and loan rate projection service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web API server
    Serve(ServeArgs),
    /// Fetch the forward curve feed and replace the stored curve
    Etl(EtlArgs),
    /// Print the stored forward curve
    Rates(RatesArgs),
    /// Project monthly loan rates from the stored curve
    Project(ProjectArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Etl(args) => commands::run_etl(args).await?,
        Commands::Rates(args) => commands::run_rates(args).await?,
        Commands::Project(args) => commands::run_project(args).await?,
    }

    Ok(())
}
