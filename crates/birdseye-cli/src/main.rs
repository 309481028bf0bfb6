//! birdseye - CLI for exploring a Superset-compatible BI server.
//!
//! This is a thin wrapper over the `birdseye-client` library, intended
//! for manual API exploration and debugging against a server.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Login(args) => commands::login::run(args).await,
        Commands::Logout(args) => commands::logout::run(args).await,
        Commands::Whoami(args) => commands::whoami::run(args).await,
        Commands::Refresh(args) => commands::refresh::run(args).await,
        Commands::Health(args) => commands::health::run(args).await,
        Commands::Ls(args) => commands::ls::run(args).await,
        Commands::Sql(args) => commands::sql::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
