//! Item store trait.

use async_trait::async_trait;

use crate::paginate::{PageLimit, ResumeKey};
use crate::types::ItemId;
use crate::{Item, Result};

/// One bounded batch of a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Items in store scan order.
    pub items: Vec<Item>,

    /// Where the next scan should resume, if more items exist.
    ///
    /// This is the only signal of continuation; a short batch does not
    /// mean the scan is finished, and a full one does not mean it isn't.
    pub next: Option<ResumeKey>,
}

/// A key-value store of items keyed by `id`.
///
/// Implementations own consistency, retries and timeouts; callers see a
/// single attempt per operation.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Return at most `limit` items strictly after `after` (or from the
    /// start), plus a resume key if the scan is not finished.
    async fn scan(&self, limit: PageLimit, after: Option<&ResumeKey>) -> Result<ScanOutput>;

    /// Fetch a single item; `None` if no item has this id.
    async fn get_by_key(&self, id: &ItemId) -> Result<Option<Item>>;

    /// Insert or fully replace the item with the same id.
    async fn put(&self, item: &Item) -> Result<()>;

    /// Delete an item. Deleting a missing id succeeds.
    async fn delete_by_key(&self, id: &ItemId) -> Result<()>;
}
