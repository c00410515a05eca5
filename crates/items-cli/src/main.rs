//! items - serve and explore an item store.
//!
//! `items serve` runs the REST API over the configured store; the other
//! subcommands operate on the same store directly, which may itself be a
//! remote items API.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{create, delete, get, list, serve, update};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let store = store::open(cli.store.as_deref())?;

    match cli.command {
        Commands::Serve(args) => serve::run(args, store).await,
        Commands::List(args) => list::run(args, &store).await,
        Commands::Get(args) => get::run(args, &store).await,
        Commands::Create(args) => create::run(args, &store).await,
        Commands::Update(args) => update::run(args, &store).await,
        Commands::Delete(args) => delete::run(args, &store).await,
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
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
