//! Cursor-based pagination over an [`ItemStore`] scan.
//!
//! The [`Paginator`] is stateless: every bit of continuation state lives
//! in the [`PageToken`] held by the client. Pages are read with whatever
//! isolation the store gives a single scan, so items inserted or deleted
//! between two page requests may be skipped or seen twice. That is inherent
//! to cursor-over-scan pagination and is not corrected here.

mod limit;
mod token;

pub use limit::PageLimit;
pub use token::{PageToken, ResumeKey};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::traits::ItemStore;
use crate::{Item, Result};

/// One page of items.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Items in store scan order; never more than the requested limit.
    pub items: Vec<Item>,

    /// Token for the next page; `None` once the collection is exhausted.
    #[serde(rename = "next_cursor")]
    pub next: Option<PageToken>,
}

impl Page {
    /// Returns true if no page follows this one.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Turns store resume keys into client tokens and back.
#[derive(Debug)]
pub struct Paginator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> Paginator<'a, S>
where
    S: ItemStore + ?Sized,
{
    /// Paginate over `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch one page of at most `limit` items, resuming after `token`.
    ///
    /// An empty token is the same as no token.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLimit`](crate::Error::InvalidLimit) if `limit` is
    ///   outside `[1, 100]`
    /// - [`Error::InvalidToken`](crate::Error::InvalidToken) if `token`
    ///   does not decode
    /// - any store error, unchanged
    #[instrument(skip(self))]
    pub async fn list_page(&self, limit: u32, token: Option<&str>) -> Result<Page> {
        let limit = PageLimit::new(limit)?;

        let after = match token.filter(|t| !t.is_empty()) {
            Some(token) => Some(PageToken::decode(token)?),
            None => None,
        };

        let mut output = self.store.scan(limit, after.as_ref()).await?;

        if output.items.len() > limit.as_usize() {
            warn!(
                returned = output.items.len(),
                %limit,
                "store returned more items than requested; truncating"
            );
            output.items.truncate(limit.as_usize());
            // Resume after the last item kept, not the last one scanned.
            output.next = output.items.last().map(|i| ResumeKey::for_item(i.id()));
        }

        let next = output.next.as_ref().map(PageToken::encode);

        debug!(
            count = output.items.len(),
            more = next.is_some(),
            "Listed page"
        );

        Ok(Page {
            items: output.items,
            next,
        })
    }

    /// Follow tokens from the start until the last page, collecting every
    /// item.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut token: Option<PageToken> = None;

        loop {
            let page = self
                .list_page(PageLimit::MAX.get(), token.as_ref().map(PageToken::as_str))
                .await?;

            items.extend(page.items);

            match page.next {
                Some(next) if token.as_ref() == Some(&next) => {
                    warn!(token = %next, "store did not advance; stopping listing");
                    break;
                }
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(count = items.len(), "Listed all items");

        Ok(items)
    }
}
