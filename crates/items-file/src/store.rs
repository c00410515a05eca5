//! Filesystem storage for items.
//!
//! Layout:
//!
//! ```text
//! <root>/items.lock        writer lock
//! <root>/items/<id>.json   one pretty-printed JSON object per item
//! ```
//!
//! Scans walk ids in ascending byte order, so the resume key of a page is
//! simply the id of its last item.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};

use items_core::error::{Error, InvalidInputError, TransportError};
use items_core::traits::{ItemStore, ScanOutput};
use items_core::types::{ItemId, StoreUrl};
use items_core::{Item, PageLimit, ResumeKey, Result};

/// Extension of item files.
const ITEM_EXT: &str = "json";

fn malformed(path: &Path, reason: impl std::fmt::Display) -> Error {
    Error::Transport(TransportError::Io {
        message: format!("malformed item file {}: {}", path.display(), reason),
    })
}

/// Filesystem-backed item store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    ///
    /// The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Open the store a `file://` URL points at.
    pub fn from_url(url: &StoreUrl) -> Result<Self> {
        let path = url.to_file_path().ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::StoreUrl {
                value: url.to_string(),
                reason: "file store requires a file:// URL".to_string(),
            })
        })?;
        Ok(Self::new(path))
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the items directory.
    fn items_dir(&self) -> PathBuf {
        self.root.join("items")
    }

    /// Get the writer lock path.
    fn lock_path(&self) -> PathBuf {
        self.root.join("items.lock")
    }

    /// Get the path for a specific item.
    fn item_path(&self, id: &ItemId) -> PathBuf {
        self.items_dir().join(format!("{}.{}", id, ITEM_EXT))
    }

    /// Run `f` while holding the exclusive writer lock.
    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(self.items_dir())?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        lock_file.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&lock_file)?;

        result
    }

    /// All item ids in scan order.
    fn sorted_ids(&self) -> Result<Vec<ItemId>> {
        let dir = self.items_dir();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();

        for entry in entries {
            let path = entry?.path();

            if path.extension().is_none_or(|ext| ext != ITEM_EXT) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "Skipping non-UTF-8 item file name");
                continue;
            };

            match ItemId::new(stem) {
                Ok(id) => ids.push(id),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping item file"),
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Read one item file. `None` if the file does not exist.
    fn read_item(&self, id: &ItemId) -> Result<Option<Item>> {
        let path = self.item_path(id);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let item: Item = serde_json::from_str(&content).map_err(|e| malformed(&path, e))?;

        if item.id() != id {
            return Err(malformed(
                &path,
                format!("contains id '{}'", item.id()),
            ));
        }

        Ok(Some(item))
    }

    fn write_item(&self, item: &Item) -> Result<()> {
        let path = self.item_path(item.id());

        let content = serde_json::to_string_pretty(item.as_value()).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        write_synced(&temp_path, content.as_bytes())?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::io::Write;

    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_data()
}

#[async_trait]
impl ItemStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn scan(&self, limit: PageLimit, after: Option<&ResumeKey>) -> Result<ScanOutput> {
        let after = after.map(ResumeKey::item_id).transpose()?;
        let ids = self.sorted_ids()?;

        let start = match &after {
            Some(after) => ids.partition_point(|id| id <= after),
            None => 0,
        };

        let mut items = Vec::with_capacity(limit.as_usize());
        let mut cursor = start;

        while items.len() < limit.as_usize() && cursor < ids.len() {
            let id = &ids[cursor];
            cursor += 1;

            match self.read_item(id) {
                Ok(Some(item)) => items.push(item),
                // Deleted since the directory was listed.
                Ok(None) => continue,
                Err(e) => warn!(id = %id, error = %e, "Skipping unreadable item"),
            }
        }

        // Resume after the last id examined, even if it was skipped.
        let next = if cursor > start && cursor < ids.len() {
            Some(ResumeKey::for_item(&ids[cursor - 1]))
        } else {
            None
        };

        debug!(count = items.len(), more = next.is_some(), "Scanned items");

        Ok(ScanOutput { items, next })
    }

    #[instrument(skip(self))]
    async fn get_by_key(&self, id: &ItemId) -> Result<Option<Item>> {
        self.read_item(id)
    }

    #[instrument(skip(self, item), fields(id = %item.id()))]
    async fn put(&self, item: &Item) -> Result<()> {
        self.with_lock(|| self.write_item(item))?;

        debug!("Stored item");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_key(&self, id: &ItemId) -> Result<()> {
        let path = self.item_path(id);

        self.with_lock(|| match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted item");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        })
    }
}
