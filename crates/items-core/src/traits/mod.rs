//! The store collaborator trait.

mod store;

pub use store::{ItemStore, ScanOutput};
