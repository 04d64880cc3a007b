//! katalog CLI - inspect and sync promo-catalog content
//!
//! Entry point: parses arguments, wires up logging and the backend
//! transport, and dispatches to the command implementations.

use anyhow::{Context, Result};
use clap::Parser;
use katalog_core::{CatalogService, Config, HttpTransport, StaticPathEnumerator};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => Config::load_with_overrides(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    let retry = config.retry.policy();
    let format = cli.format;
    let transport = HttpTransport::new(&config.backend)?;

    if let Commands::Routes = cli.command {
        let enumerator = StaticPathEnumerator::new(transport, config.backend, retry);
        return commands::routes(&enumerator, format).await;
    }

    let service = CatalogService::new(transport, config.backend, retry);
    match cli.command {
        Commands::List { category_id } => commands::list(&service, &category_id, format).await,
        Commands::Show { path } => commands::show(&service, &path, format).await,
        Commands::Site => commands::site(&service, format).await,
        Commands::Menu => commands::menu(&service, format).await,
        Commands::Slides => commands::slides(&service, format).await,
        Commands::Logos { category_name } => {
            commands::logos(&service, &category_name, format).await
        },
        Commands::Routes => Ok(()),
    }
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose || cli.debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
