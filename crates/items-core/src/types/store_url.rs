//! Store location.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, InvalidInputError};

/// Hosts allowed to be reached over plain HTTP.
const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

/// Where items live: a local directory (`file:///srv/items`) or a running
/// items API (`https://api.example.com/default`).
///
/// ```
/// use items_core::StoreUrl;
///
/// let api = StoreUrl::new("https://api.example.com/default").unwrap();
/// assert_eq!(api.endpoint("v1/items"), "https://api.example.com/default/v1/items");
/// assert!(StoreUrl::new("file:///tmp/items").unwrap().is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Parse a store location. Remote stores must use HTTPS unless they
    /// are on the loopback interface.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let reject = |reason: &str| -> Error {
            InvalidInputError::StoreUrl {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let url = Url::parse(s).map_err(|e| reject(&e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(reject("must be an absolute URL"));
        }

        match (url.scheme(), url.host_str()) {
            ("file", _) => Ok(Self(url)),
            ("https", Some(_)) => Ok(Self(url)),
            ("http", Some(host)) if LOOPBACK_HOSTS.contains(&host) => Ok(Self(url)),
            ("http" | "https", None) => Err(reject("must have a host")),
            _ => Err(reject(
                "must use file://, or HTTPS (HTTP allowed only for localhost)",
            )),
        }
    }

    /// A `file://` location for an absolute directory.
    pub fn from_directory_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        Url::from_directory_path(path).map(Self).map_err(|_| {
            InvalidInputError::StoreUrl {
                value: path.display().to_string(),
                reason: "must be an absolute path".to_string(),
            }
            .into()
        })
    }

    /// Join an API path onto this location, keeping any path prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    pub fn is_network(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// The directory of a `file://` location; `None` for remote stores.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.is_local().then(|| self.0.to_file_path().ok()).flatten()
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_locations() {
        assert!(StoreUrl::new("https://api.example.com").unwrap().is_network());
        assert!(StoreUrl::new("http://localhost:8000").is_ok());
        assert!(StoreUrl::new("http://127.0.0.1:8000").is_ok());
        assert!(StoreUrl::new("http://api.example.com").is_err());
        assert!(StoreUrl::new("ftp://example.com/items").is_err());
        assert!(StoreUrl::new("/items").is_err());
    }

    #[test]
    fn endpoint_joins_with_one_slash() {
        for base in ["https://api.example.com/default", "https://api.example.com/default/"] {
            let url = StoreUrl::new(base).unwrap();
            assert_eq!(
                url.endpoint("/v1/items"),
                "https://api.example.com/default/v1/items"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn file_locations() {
        let url = StoreUrl::new("file:///tmp/items").unwrap();
        assert!(url.is_local() && !url.is_network());
        assert_eq!(url.to_file_path(), Some(PathBuf::from("/tmp/items")));

        let url = StoreUrl::from_directory_path("/var/lib/items").unwrap();
        assert_eq!(url.to_file_path(), Some(PathBuf::from("/var/lib/items/")));
        assert!(StoreUrl::from_directory_path("relative/dir").is_err());

        let remote = StoreUrl::new("https://api.example.com").unwrap();
        assert!(remote.to_file_path().is_none());
    }
}
