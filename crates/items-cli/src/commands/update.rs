//! Update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use items_core::{Item, ItemId, ItemStore};

use super::read_json;
use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Item id; overrides any id in the body
    pub id: String,

    /// JSON file with the full replacement body (use - for stdin)
    #[arg(long)]
    pub json: String,
}

pub async fn run(args: UpdateArgs, store: &CliStore) -> Result<()> {
    let id = ItemId::new(&args.id).context("Invalid item id")?;
    let body = read_json(&args.json)?;

    let item = Item::with_id(&id, body).context("Invalid item")?;
    store.put(&item).await.context("Failed to update item")?;

    output::json(&item, false)?;
    output::success(&format!("Updated item: {}", id));

    Ok(())
}
