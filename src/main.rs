use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use forestay::app::AppContext;
use forestay::cli::{commands, Cli, Commands};
use forestay::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::with_workers(&config, cli.workers)?;

    match cli.command {
        Commands::List => {
            commands::list_accommodations(&config)?;
        }
        Commands::Availability { id, month } => {
            commands::show_availability(&ctx, &config, &id, month.as_deref()).await?;
        }
        Commands::Check {
            id,
            check_in,
            check_out,
            json,
        } => {
            commands::check_stay(&ctx, &config, &id, &check_in, &check_out, json).await?;
        }
        Commands::Guide { query } => {
            commands::ask_guide(&ctx, &query).await?;
        }
        Commands::Tui => {
            forestay::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
    }

    Ok(())
}
