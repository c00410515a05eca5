//! Item id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Maximum length of an item id, in bytes. With a `.json` suffix this
/// still fits the 255-byte file name limit of common filesystems.
const MAX_LEN: usize = 250;

/// A validated item id: the primary key of the items table.
///
/// Ids are restricted to characters that are safe both as a file name and
/// as a URL path segment, so every store backend can use them verbatim.
///
/// # Example
///
/// ```
/// use items_core::ItemId;
///
/// let id = ItemId::new("3f1c2a9e-7d4b-4c55-9a1e-0b8f6d2e4c10").unwrap();
/// assert_eq!(id.as_str(), "3f1c2a9e-7d4b-4c55-9a1e-0b8f6d2e4c10");
/// assert!(ItemId::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, too long, `.`/`..`, or
    /// contains a character outside `[A-Za-z0-9._~:-]`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: String| -> Error {
            InvalidInputError::ItemId {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        if s.is_empty() {
            return Err(invalid("cannot be empty".to_string()));
        }

        if s.len() > MAX_LEN {
            return Err(invalid(format!(
                "exceeds maximum length of {} characters",
                MAX_LEN
            )));
        }

        if s == "." || s == ".." {
            return Err(invalid("cannot be '.' or '..'".to_string()));
        }

        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '-' | '_' | '~' | ':'))
        {
            return Err(invalid(format!("contains invalid character '{}'", c)));
        }

        Ok(())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
