//! items-http - Item store backed by a remote items API.

mod client;
mod endpoints;
mod store;

pub use store::HttpStore;
