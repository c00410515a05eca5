//! Resume keys and the opaque page tokens that carry them.
//!
//! A token is the base64url (unpadded) encoding of the resume key's
//! canonical JSON: compact, keys in sorted order. Tokens are obfuscation,
//! not protection. They are neither signed nor encrypted, carry position
//! only, and must never be used to decide what a caller may see.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidTokenError};
use crate::item::ID_FIELD;
use crate::types::ItemId;

/// Longest token `decode` will look at.
const MAX_TOKEN_LEN: usize = 4096;

/// A store-native position: the key attributes of the last item returned.
///
/// Key attributes are scalars (strings or numbers) and there is at least
/// one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeKey(BTreeMap<String, Value>);

impl ResumeKey {
    /// Create a resume key from key attributes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTokenError::Key`] if `attrs` is empty or holds a
    /// value that is not a string or number.
    pub fn new(attrs: BTreeMap<String, Value>) -> Result<Self, Error> {
        if attrs.is_empty() {
            return Err(key_error("resume key has no attributes"));
        }

        if let Some((name, _)) = attrs
            .iter()
            .find(|(_, v)| !(v.is_string() || v.is_number()))
        {
            return Err(key_error(&format!(
                "attribute '{}' must be a string or number",
                name
            )));
        }

        Ok(Self(attrs))
    }

    /// The resume key that continues a scan after `id`.
    pub fn for_item(id: &ItemId) -> Self {
        let mut attrs = BTreeMap::new();
        attrs.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        Self(attrs)
    }

    /// Extract the item id this key resumes after.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTokenError::Key`] if the key has no valid `id`.
    pub fn item_id(&self) -> Result<ItemId, Error> {
        let id = self
            .0
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| key_error("resume key has no string id"))?;

        ItemId::new(id).map_err(|e| key_error(&e.to_string()))
    }

    /// Get a key attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterate over key attributes in canonical order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode this key as a page token.
    pub fn to_token(&self) -> PageToken {
        PageToken::encode(self)
    }

    fn canonical_bytes(&self) -> Vec<u8> {
        // A BTreeMap of scalars always serializes.
        serde_json::to_vec(&self.0).unwrap_or_default()
    }
}

fn key_error(reason: &str) -> Error {
    InvalidTokenError::Key {
        reason: reason.to_string(),
    }
    .into()
}

impl Serialize for ResumeKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResumeKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let attrs = BTreeMap::<String, Value>::deserialize(deserializer)?;
        ResumeKey::new(attrs).map_err(serde::de::Error::custom)
    }
}

/// An opaque, URL-safe continuation token handed to clients.
///
/// Tokens are capabilities, not data: they compare equal only when they
/// resume at the same place, and have no meaningful order.
///
/// # Example
///
/// ```
/// use items_core::{ItemId, PageToken, ResumeKey};
///
/// let key = ResumeKey::for_item(&ItemId::new("b").unwrap());
/// let token = PageToken::encode(&key);
/// assert_eq!(PageToken::decode(token.as_str()).unwrap(), key);
/// assert!(PageToken::decode("not-valid-base64!!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    /// Encode a resume key. Pure: the same key always yields the same
    /// token.
    pub fn encode(key: &ResumeKey) -> Self {
        Self(URL_SAFE_NO_PAD.encode(key.canonical_bytes()))
    }

    /// Decode an untrusted token string back into a resume key.
    ///
    /// Only tokens that `encode` could have produced are accepted, so
    /// `PageToken::encode(&PageToken::decode(t)?)` is always `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] for any malformed input.
    pub fn decode(token: &str) -> Result<ResumeKey, Error> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(InvalidTokenError::Encoding {
                reason: format!("longer than {} characters", MAX_TOKEN_LEN),
            }
            .into());
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| InvalidTokenError::Encoding {
                reason: e.to_string(),
            })?;

        let attrs: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|e| InvalidTokenError::Payload {
                reason: e.to_string(),
            })?;

        let key = ResumeKey::new(attrs.into_iter().collect())?;

        if PageToken::encode(&key).0 != token {
            return Err(InvalidTokenError::NonCanonical.into());
        }

        Ok(key)
    }

    /// Returns the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the token string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PageToken> for String {
    fn from(token: PageToken) -> Self {
        token.0
    }
}

impl AsRef<str> for PageToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PageToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
