//! items-file - Filesystem-backed item store.

mod store;

pub use store::FileStore;
