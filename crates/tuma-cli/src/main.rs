mod check;
mod quote;
mod routes;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tuma_core::{Environment, Tariff};

#[derive(Debug, Parser)]
#[command(name = "tuma")]
#[command(about = "Delivery pricing over predefined transit routes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the route catalog
    Routes,
    /// Price a delivery between two stops
    Quote(quote::QuoteArgs),
    /// Audit fare coverage of the catalog
    Check,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tuma_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    if matches!(config.env, Environment::Production) {
        subscriber.with_ansi(false).init();
    } else {
        subscriber.init();
    }

    let cli = Cli::parse();
    let tariff = Tariff::from_file(&config.pricing_path)?;

    match cli.command {
        Commands::Routes => routes::run_routes(&tariff),
        Commands::Quote(args) => quote::run_quote(&tariff, &args),
        Commands::Check => check::run_check(&tariff),
    }
}
