//! items-core - Core types and traits for the items service.

pub mod error;
pub mod item;
pub mod paginate;
pub mod traits;
pub mod types;

pub use error::Error;
pub use item::Item;
pub use paginate::{Page, PageLimit, PageToken, Paginator, ResumeKey};
pub use traits::{ItemStore, ScanOutput};
pub use types::{ItemId, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
