//! Items API endpoint paths and request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use items_core::Item;
use items_core::types::ItemId;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Paginated listing.
pub const LIST_ITEMS: &str = "v1/items";

/// Path of a single item.
pub fn item_path(id: &ItemId) -> String {
    format!("items/{}", id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the paginated listing.
#[derive(Debug, Serialize)]
pub struct ListItemsQuery<'a> {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

/// Response from the paginated listing.
#[derive(Debug, Deserialize)]
pub struct ListItemsResponse {
    pub items: Vec<Item>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned by the items API.
///
/// `detail` is usually a string, but framework validation errors can put
/// structured JSON there.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// The detail rendered as text.
    pub fn detail_text(self) -> Option<String> {
        self.detail.map(|d| match d {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}
