use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use suggest_core::{FeatureSnapshot, TableSnapshot, TableStore};
use suggest_logging::suggest_debug;

use crate::{write_atomically, PersistError};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedTables {
    version: u32,
    total_observations: u64,
    priors: BTreeMap<String, u64>,
    #[serde(default)]
    features: BTreeMap<String, PersistedFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedFeature {
    #[serde(default)]
    word_counts: BTreeMap<String, BTreeMap<String, u64>>,
    #[serde(default)]
    total_word_counts: BTreeMap<String, u64>,
    #[serde(default)]
    known_words: BTreeSet<String>,
}

impl From<TableSnapshot> for PersistedTables {
    fn from(snapshot: TableSnapshot) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            total_observations: snapshot.total_observations,
            priors: snapshot.priors,
            features: snapshot
                .features
                .into_iter()
                .map(|(name, feature)| {
                    let feature = PersistedFeature {
                        word_counts: feature.word_counts,
                        total_word_counts: feature.total_word_counts,
                        known_words: feature.known_words,
                    };
                    (name, feature)
                })
                .collect(),
        }
    }
}

impl From<PersistedTables> for TableSnapshot {
    fn from(persisted: PersistedTables) -> Self {
        Self {
            priors: persisted.priors,
            total_observations: persisted.total_observations,
            features: persisted
                .features
                .into_iter()
                .map(|(name, feature)| {
                    let feature = FeatureSnapshot {
                        word_counts: feature.word_counts,
                        total_word_counts: feature.total_word_counts,
                        known_words: feature.known_words,
                    };
                    (name, feature)
                })
                .collect(),
        }
    }
}

/// Serializes the counting tables as pretty-printed JSON.
pub fn encode_tables(store: &TableStore) -> Result<String, PersistError> {
    let persisted = PersistedTables::from(store.snapshot());
    Ok(serde_json::to_string_pretty(&persisted)?)
}

pub fn decode_tables(json: &str) -> Result<TableStore, PersistError> {
    let persisted: PersistedTables = serde_json::from_str(json)?;
    if persisted.version != SNAPSHOT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: persisted.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(TableStore::from_snapshot(persisted.into()))
}

pub fn save_tables(path: &Path, store: &TableStore) -> Result<(), PersistError> {
    let json = encode_tables(store)?;
    write_atomically(path, json.as_bytes())?;
    suggest_debug!("Saved counting tables to {:?} ({} bytes)", path, json.len());
    Ok(())
}

pub fn load_tables(path: &Path) -> Result<TableStore, PersistError> {
    let json = fs::read_to_string(path)?;
    let store = decode_tables(&json)?;
    suggest_debug!("Loaded counting tables from {:?}", path);
    Ok(store)
}
