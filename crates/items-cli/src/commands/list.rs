//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use items_core::{PageLimit, Paginator};

use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of items to return (1-100)
    #[arg(long, conflicts_with = "all")]
    pub limit: Option<u32>,

    /// Pagination cursor from a previous listing
    #[arg(long, conflicts_with = "all")]
    pub cursor: Option<String>,

    /// Follow cursors until every item is listed
    #[arg(long)]
    pub all: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, store: &CliStore) -> Result<()> {
    let paginator = Paginator::new(store);

    let (items, next) = if args.all {
        let items = paginator.list_all().await.context("Failed to list items")?;
        (items, None)
    } else {
        let limit = args.limit.unwrap_or(PageLimit::DEFAULT.get());
        let page = paginator
            .list_page(limit, args.cursor.as_deref())
            .await
            .context("Failed to list items")?;
        (page.items, page.next)
    };

    if items.is_empty() {
        eprintln!("{}", "No items found.".dimmed());
    }

    for item in &items {
        output::json(item, args.pretty)?;
    }

    if let Some(cursor) = next {
        eprintln!();
        output::field("Next cursor", cursor.as_str());
    }

    Ok(())
}
