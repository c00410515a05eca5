//! Get command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::{Map, Value};

use items_core::{ItemId, ItemStore};

use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Item id
    pub id: String,

    /// Print only this property
    pub property: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, store: &CliStore) -> Result<()> {
    let id = ItemId::new(&args.id).context("Invalid item id")?;

    let Some(item) = store.get_by_key(&id).await.context("Failed to get item")? else {
        bail!("Item not found: {}", id);
    };

    match args.property {
        Some(name) => {
            let Some(value) = item.get(&name).cloned() else {
                bail!("Property '{}' not found", name);
            };
            let mut property = Map::new();
            property.insert(name, value);
            output::json(&Value::Object(property), args.pretty)
        }
        None => output::json(&item, args.pretty),
    }
}
