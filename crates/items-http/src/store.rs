//! Item store that forwards to a remote items API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use items_core::error::{Error, InvalidInputError, TransportError};
use items_core::traits::{ItemStore, ScanOutput};
use items_core::types::{ItemId, StoreUrl};
use items_core::{Item, PageLimit, PageToken, ResumeKey, Result};

use crate::client::ApiClient;
use crate::endpoints::{LIST_ITEMS, ListItemsQuery, ListItemsResponse, item_path};

/// A network-backed item store.
///
/// Scans go through the remote's paginated listing. The remote must be an
/// items server encoding its cursors with the same token format, so they
/// are decoded back into resume keys here and re-encoded on the way out.
/// A cursor in any other dialect (padded base64, non-canonical JSON) is
/// reported as a transport error.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: ApiClient,
}

impl HttpStore {
    /// Create a store for the API at `url`.
    pub fn new(url: StoreUrl) -> Result<Self> {
        if !url.is_network() {
            return Err(Error::InvalidInput(InvalidInputError::StoreUrl {
                value: url.to_string(),
                reason: "HTTP store requires an http(s):// URL".to_string(),
            }));
        }

        Ok(Self {
            client: ApiClient::new(url)?,
        })
    }

    /// Returns the API base URL.
    pub fn url(&self) -> &StoreUrl {
        self.client.base()
    }
}

#[async_trait]
impl ItemStore for HttpStore {
    #[instrument(skip(self), fields(url = %self.url()))]
    async fn scan(&self, limit: PageLimit, after: Option<&ResumeKey>) -> Result<ScanOutput> {
        let cursor = after.map(PageToken::encode);
        let query = ListItemsQuery {
            limit: limit.get(),
            cursor: cursor.as_ref().map(PageToken::as_str),
        };

        let response: ListItemsResponse = self.client.get(LIST_ITEMS, &query).await?;

        let next = match response.next_cursor.as_deref() {
            None | Some("") => None,
            Some(cursor) => Some(PageToken::decode(cursor).map_err(|e| {
                Error::Transport(TransportError::Http {
                    message: format!("remote returned an unreadable cursor: {}", e),
                })
            })?),
        };

        debug!(count = response.items.len(), more = next.is_some(), "Scanned remote items");

        Ok(ScanOutput {
            items: response.items,
            next,
        })
    }

    #[instrument(skip(self), fields(url = %self.url()))]
    async fn get_by_key(&self, id: &ItemId) -> Result<Option<Item>> {
        self.client.get_optional(&item_path(id)).await
    }

    #[instrument(skip(self, item), fields(url = %self.url(), id = %item.id()))]
    async fn put(&self, item: &Item) -> Result<()> {
        let _: Value = self.client.put(&item_path(item.id()), item).await?;
        debug!("Stored remote item");
        Ok(())
    }

    #[instrument(skip(self), fields(url = %self.url()))]
    async fn delete_by_key(&self, id: &ItemId) -> Result<()> {
        self.client.delete(&item_path(id)).await?;
        debug!("Deleted remote item");
        Ok(())
    }
}
