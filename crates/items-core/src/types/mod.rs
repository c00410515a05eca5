//! Validated identifier and location types.
//!
//! These types enforce their invariants at construction time,
//! so a value that exists is a value that is valid.

mod item_id;
mod store_url;

pub use item_id::ItemId;
pub use store_url::StoreUrl;
