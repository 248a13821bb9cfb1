// File: src/persistence.rs
use crate::core::types::TopicId;
use crate::error::PersistenceError;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Namespace key the bookmark document is stored under.
pub const BOOKMARKS_KEY: &str = "electroviz_saved";

/// Durable string storage addressed by key. Values are overwritten wholesale.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        save_to_disk(value, &self.path_for(key))
    }
}

/// Writes `contents` to `path` through a temp file in the same directory,
/// so readers never observe a half-written document.
pub fn save_to_disk(contents: &str, path: &Path) -> Result<(), PersistenceError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path)?;
    Ok(())
}

/// In-process storage. Writes can be switched off to simulate a full disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.read_only {
            return Err(PersistenceError::ReadOnly);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Saved topic ids in the order they were saved. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    ids: Vec<TopicId>,
}

impl BookmarkSet {
    pub fn from_ids<I: IntoIterator<Item = TopicId>>(ids: I) -> Self {
        let mut set = Self::default();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|saved| saved == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|saved| saved == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ids)
    }
}

/// The user's bookmarks, loaded once and written back on every toggle.
pub struct BookmarkStore<S: Storage> {
    storage: S,
    saved: BookmarkSet,
    last_write_error: Option<String>,
}

impl<S: Storage> BookmarkStore<S> {
    /// Reads the persisted set. Missing, unreadable or malformed storage
    /// yields an empty set.
    pub fn load(storage: S) -> Self {
        let saved = load_bookmarks(&storage);
        debug!("loaded {} bookmark(s)", saved.len());
        Self { storage, saved, last_write_error: None }
    }

    pub fn saved(&self) -> &BookmarkSet {
        &self.saved
    }

    pub fn contains(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    /// Inserts `id` if absent, removes it if present, and persists the whole
    /// set. The returned set is the intended state even if the write failed;
    /// check [`last_write_error`](Self::last_write_error) for that.
    pub fn toggle(&mut self, id: &str) -> BookmarkSet {
        self.saved.toggle(id);
        self.last_write_error = match self.persist() {
            Ok(()) => None,
            Err(e) => {
                warn!("could not save bookmarks: {e}");
                Some(e.to_string())
            }
        };
        self.saved.clone()
    }

    /// The error from the most recent write, cleared by the next successful one.
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let json = self.saved.to_json()?;
        self.storage.write(BOOKMARKS_KEY, &json)
    }
}

fn load_bookmarks<S: Storage>(storage: &S) -> BookmarkSet {
    let raw = match storage.read(BOOKMARKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BookmarkSet::default(),
        Err(e) => {
            warn!("bookmark storage unreadable, starting empty: {e}");
            return BookmarkSet::default();
        }
    };
    match serde_json::from_str::<Vec<TopicId>>(&raw) {
        Ok(ids) => BookmarkSet::from_ids(ids),
        Err(e) => {
            warn!("bookmark storage is corrupt, starting empty: {e}");
            BookmarkSet::default()
        }
    }
}
