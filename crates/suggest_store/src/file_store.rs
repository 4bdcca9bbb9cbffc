use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use suggest_core::{CountStore, Outcome, TableStore};
use suggest_logging::suggest_info;

use crate::{load_tables, save_tables, PersistError};

/// Counting tables kept in memory and persisted to a single JSON file.
///
/// Increments only touch memory; nothing reaches disk until [`flush`].
///
/// [`flush`]: FileBackedStore::flush
#[derive(Debug)]
pub struct FileBackedStore {
    path: PathBuf,
    tables: TableStore,
    dirty: bool,
}

impl FileBackedStore {
    /// Loads the tables at `path`, or starts empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let tables = match load_tables(&path) {
            Ok(tables) => tables,
            Err(PersistError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                suggest_info!("No counting tables at {:?}; starting empty", path);
                TableStore::new()
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            path,
            tables,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tables(&self) -> &TableStore {
        &self.tables
    }

    /// True when there are increments not yet flushed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the tables if anything changed since the last flush.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        if self.dirty {
            save_tables(&self.path, &self.tables)?;
            self.dirty = false;
        }
        Ok(())
    }
}

impl CountStore for FileBackedStore {
    fn classes(&self) -> Vec<Outcome> {
        self.tables.classes()
    }

    fn prior_count(&self, class: &str) -> u64 {
        self.tables.prior_count(class)
    }

    fn total_observation_count(&self) -> u64 {
        self.tables.total_observation_count()
    }

    fn known_words(&self, feature_name: &str) -> &HashSet<String> {
        self.tables.known_words(feature_name)
    }

    fn word_count_in_class(&self, feature_name: &str, class: &str, word: &str) -> u64 {
        self.tables.word_count_in_class(feature_name, class, word)
    }

    fn total_word_count_in_class(&self, feature_name: &str, class: &str) -> u64 {
        self.tables.total_word_count_in_class(feature_name, class)
    }

    fn increment_prior(&mut self, class: &str, amount: u64) {
        self.tables.increment_prior(class, amount);
        self.dirty = true;
    }

    fn increment_total_observations(&mut self, amount: u64) {
        self.tables.increment_total_observations(amount);
        self.dirty = true;
    }

    fn increment_word_count(&mut self, feature_name: &str, class: &str, word: &str, amount: u64) {
        self.tables
            .increment_word_count(feature_name, class, word, amount);
        self.dirty = true;
    }

    fn increment_total_word_count(&mut self, feature_name: &str, class: &str, amount: u64) {
        self.tables
            .increment_total_word_count(feature_name, class, amount);
        self.dirty = true;
    }
}
