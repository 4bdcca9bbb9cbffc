use std::collections::HashMap;

use crate::{CountStore, TableStore};

/// Keeps one set of counting tables per model id.
pub trait ModelRegistry {
    type Store: CountStore;

    /// Returns the tables for `id`, creating empty ones on first use.
    fn always_get(&mut self, id: &str) -> &mut Self::Store;

    /// Stores `store` under `id`, replacing whatever was there.
    fn put(&mut self, id: &str, store: Self::Store);
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryModelRegistry {
    models: HashMap<String, TableStore>,
}

impl InMemoryModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelRegistry for InMemoryModelRegistry {
    type Store = TableStore;

    fn always_get(&mut self, id: &str) -> &mut TableStore {
        self.models.entry(id.to_owned()).or_default()
    }

    fn put(&mut self, id: &str, store: TableStore) {
        self.models.insert(id.to_owned(), store);
    }
}
