//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use items_core::{ItemId, ItemStore};

use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Item id
    pub id: String,
}

pub async fn run(args: DeleteArgs, store: &CliStore) -> Result<()> {
    let id = ItemId::new(&args.id).context("Invalid item id")?;

    store
        .delete_by_key(&id)
        .await
        .context("Failed to delete item")?;

    output::success(&format!("Deleted item: {}", id));

    Ok(())
}
