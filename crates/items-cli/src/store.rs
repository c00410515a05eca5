//! Store selection for the CLI.

use std::fs;

use anyhow::{Context, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::debug;

use items_core::traits::{ItemStore, ScanOutput};
use items_core::types::{ItemId, StoreUrl};
use items_core::{Item, PageLimit, ResumeKey};
use items_file::FileStore;
use items_http::HttpStore;

/// The store the CLI was pointed at.
#[derive(Debug)]
pub enum CliStore {
    File(FileStore),
    Http(HttpStore),
}

/// Open the store at `url`, or the default local store.
pub fn open(url: Option<&str>) -> Result<CliStore> {
    let url = match url {
        Some(url) => StoreUrl::new(url).context("Invalid store URL")?,
        None => default_store_url()?,
    };

    debug!(%url, "Opening store");

    if url.is_local() {
        let store = FileStore::from_url(&url).context("Invalid file store URL")?;
        Ok(CliStore::File(store))
    } else {
        let store = HttpStore::new(url).context("Failed to create HTTP store")?;
        Ok(CliStore::Http(store))
    }
}

/// A file store under the platform data directory.
fn default_store_url() -> Result<StoreUrl> {
    let dirs = ProjectDirs::from("", "", "items").context("Could not determine data directory")?;

    let path = dirs.data_dir().join("store");
    fs::create_dir_all(&path).context("Failed to create data directory")?;

    StoreUrl::from_directory_path(&path).context("Invalid data directory")
}

#[async_trait]
impl ItemStore for CliStore {
    async fn scan(
        &self,
        limit: PageLimit,
        after: Option<&ResumeKey>,
    ) -> items_core::Result<ScanOutput> {
        match self {
            CliStore::File(store) => store.scan(limit, after).await,
            CliStore::Http(store) => store.scan(limit, after).await,
        }
    }

    async fn get_by_key(&self, id: &ItemId) -> items_core::Result<Option<Item>> {
        match self {
            CliStore::File(store) => store.get_by_key(id).await,
            CliStore::Http(store) => store.get_by_key(id).await,
        }
    }

    async fn put(&self, item: &Item) -> items_core::Result<()> {
        match self {
            CliStore::File(store) => store.put(item).await,
            CliStore::Http(store) => store.put(item).await,
        }
    }

    async fn delete_by_key(&self, id: &ItemId) -> items_core::Result<()> {
        match self {
            CliStore::File(store) => store.delete_by_key(id).await,
            CliStore::Http(store) => store.delete_by_key(id).await,
        }
    }
}
