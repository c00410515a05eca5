//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{create, delete, get, list, serve, update};

/// Serve and explore an item store.
#[derive(Parser, Debug)]
#[command(name = "items")]
#[command(author, version = env!("ITEMS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Store URL: file:///path for a local store, https://host for a
    /// remote items API (defaults to a store in the user data directory)
    #[arg(long, env = "ITEMS_STORE", global = true)]
    pub store: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the REST API over the store
    Serve(serve::ServeArgs),

    /// List items, one page or all of them
    List(list::ListArgs),

    /// Fetch an item, or one of its properties
    Get(get::GetArgs),

    /// Create an item
    Create(create::CreateArgs),

    /// Replace an item
    Update(update::UpdateArgs),

    /// Delete an item
    Delete(delete::DeleteArgs),
}
