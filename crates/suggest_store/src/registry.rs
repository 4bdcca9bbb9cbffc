use std::collections::hash_map::{Entry, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use suggest_core::{ModelRegistry, TableStore};
use suggest_logging::{suggest_info, suggest_warn};

use crate::{ensure_dir, load_tables, model_filename, save_tables, PersistError};

/// One JSON snapshot per model id inside a directory.
///
/// Tables are loaded on first access and cached; changes are written only by
/// [`flush`](DirectoryRegistry::flush) and
/// [`flush_all`](DirectoryRegistry::flush_all).
#[derive(Debug)]
pub struct DirectoryRegistry {
    dir: PathBuf,
    models: HashMap<String, TableStore>,
}

impl DirectoryRegistry {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self {
            dir,
            models: HashMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(model_filename(id))
    }

    /// Like [`ModelRegistry::always_get`], but reports an unreadable snapshot
    /// instead of starting over with empty tables.
    pub fn try_get(&mut self, id: &str) -> Result<&mut TableStore, PersistError> {
        let path = self.path_for(id);
        match self.models.entry(id.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(load_or_empty(&path)?)),
        }
    }

    /// Writes the cached tables for `id`. Ids never accessed are skipped.
    pub fn flush(&self, id: &str) -> Result<(), PersistError> {
        match self.models.get(id) {
            Some(store) => save_tables(&self.path_for(id), store),
            None => Ok(()),
        }
    }

    pub fn flush_all(&self) -> Result<(), PersistError> {
        for (id, store) in &self.models {
            save_tables(&self.path_for(id), store)?;
        }
        suggest_info!("Flushed {} models to {:?}", self.models.len(), self.dir);
        Ok(())
    }
}

impl ModelRegistry for DirectoryRegistry {
    type Store = TableStore;

    /// An unreadable snapshot is logged and replaced by empty tables; the next
    /// flush overwrites it.
    fn always_get(&mut self, id: &str) -> &mut TableStore {
        let path = self.path_for(id);
        match self.models.entry(id.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let store = load_or_empty(&path).unwrap_or_else(|err| {
                    suggest_warn!("Failed to load model {:?} from {:?}: {}", id, path, err);
                    TableStore::new()
                });
                entry.insert(store)
            }
        }
    }

    fn put(&mut self, id: &str, store: TableStore) {
        self.models.insert(id.to_owned(), store);
    }
}

fn load_or_empty(path: &Path) -> Result<TableStore, PersistError> {
    match load_tables(path) {
        Err(PersistError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            Ok(TableStore::new())
        }
        result => result,
    }
}
