//! Validated item type.
//!
//! Items are schema-less: the only field with meaning is `id`, the primary
//! key. Every other field is carried through untouched, and an update
//! replaces the whole record rather than patching it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, InvalidInputError};
use crate::types::ItemId;

/// The name of the primary key field.
pub const ID_FIELD: &str = "id";

/// A single record of the items table.
///
/// This type guarantees that:
/// - The value is a JSON object
/// - The object contains an `id` field
/// - The `id` field is a string that is a valid [`ItemId`]
///
/// # Example
///
/// ```
/// use items_core::Item;
/// use serde_json::json;
///
/// let item = Item::new(json!({
///     "id": "42",
///     "name": "Widget",
///     "description": "A widget"
/// })).unwrap();
///
/// assert_eq!(item.id().as_str(), "42");
/// assert_eq!(item.get("name").unwrap(), "Widget");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    value: Value,
}

impl Item {
    /// Create a new `Item` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, or its `id` field is
    /// missing, not a string, or not a valid [`ItemId`].
    pub fn new(value: Value) -> Result<Self, Error> {
        let id = Self::validate(&value)?;
        Ok(Self { id, value })
    }

    /// Create an `Item` whose `id` is forced to `id`, whatever the body
    /// said.
    pub fn with_id(id: &ItemId, mut value: Value) -> Result<Self, Error> {
        let obj = value.as_object_mut().ok_or_else(not_an_object)?;
        obj.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        Ok(Self {
            id: id.clone(),
            value,
        })
    }

    /// Returns the item's primary key.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Get a reference to the inner JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume and return the inner JSON value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Get a field from the item.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    fn validate(value: &Value) -> Result<ItemId, Error> {
        let obj = value.as_object().ok_or_else(not_an_object)?;

        let id = obj.get(ID_FIELD).ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::Item {
                reason: "item must contain an id field".to_string(),
            })
        })?;

        let id = id.as_str().ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::Item {
                reason: "id field must be a string".to_string(),
            })
        })?;

        ItemId::new(id)
    }
}

fn not_an_object() -> Error {
    Error::InvalidInput(InvalidInputError::Item {
        reason: "item must be a JSON object".to_string(),
    })
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Item::new(value).map_err(serde::de::Error::custom)
    }
}
