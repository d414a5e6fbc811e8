mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bfp")]
#[command(about = "Find the cheapest nearby fuel station")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one evaluation over the configured stations
    Evaluate {
        /// Print the published values as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract the structured address from a station markup file
    Address {
        /// File holding the station's address markup
        path: PathBuf,
    },
    /// Validate an origin value (defaults to BFP_ORIGIN)
    Origin {
        /// JSON object or "lat, lng" string
        value: Option<String>,
    },
    /// Normalize a raw price string
    Price {
        /// Raw price text, e.g. "1,789 €/l"
        raw: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = bfp_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Evaluate { json }) => commands::run_evaluate(&config, json).await?,
        Some(Commands::Address { path }) => commands::run_address(&path)?,
        Some(Commands::Origin { value }) => {
            commands::run_origin(value.as_deref().or(config.origin.as_deref()))?;
        }
        Some(Commands::Price { raw }) => commands::run_price(&raw)?,
        None => commands::run_evaluate(&config, false).await?,
    }

    Ok(())
}
