//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use uuid::Uuid;

use items_core::item::ID_FIELD;
use items_core::{Item, ItemId, ItemStore};

use super::read_json;
use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Item id (defaults to the body's id, or a fresh UUID)
    #[arg(long)]
    pub id: Option<String>,

    /// JSON file with the item body (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,
}

pub async fn run(args: CreateArgs, store: &CliStore) -> Result<()> {
    let body = match &args.json {
        Some(path) => read_json(path)?,
        None => Value::Object(serde_json::Map::new()),
    };

    let item = match &args.id {
        Some(id) => Item::with_id(&ItemId::new(id)?, body),
        None if body.get(ID_FIELD).is_some() => Item::new(body),
        None => Item::with_id(&ItemId::new(Uuid::new_v4().to_string())?, body),
    }
    .context("Invalid item")?;

    store.put(&item).await.context("Failed to create item")?;

    println!("{}", item.id());
    output::success(&format!("Created item: {}", item.id()));

    Ok(())
}
