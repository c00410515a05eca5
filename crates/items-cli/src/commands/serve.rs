//! Serve command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;

use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "ITEMS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,
}

pub async fn run(args: ServeArgs, store: CliStore) -> Result<()> {
    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    let addr = listener.local_addr()?;
    output::field("Listening on", &format!("http://{}", addr));

    items_server::serve(listener, Arc::new(store))
        .await
        .context("Server failed")
}
