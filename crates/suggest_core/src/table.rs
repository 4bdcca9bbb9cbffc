use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use crate::{CountStore, FeatureName, Outcome};

static EMPTY_VOCABULARY: LazyLock<HashSet<String>> = LazyLock::new(HashSet::new);

/// Counts for a single feature name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FeatureTable {
    /// class -> word -> count
    word_counts: HashMap<Outcome, HashMap<String, u64>>,
    total_word_counts: HashMap<Outcome, u64>,
    known_words: HashSet<String>,
}

/// In-memory [`CountStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStore {
    priors: HashMap<Outcome, u64>,
    total_observations: u64,
    features: HashMap<FeatureName, FeatureTable>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feature names with at least one recorded count, sorted.
    pub fn feature_names(&self) -> Vec<FeatureName> {
        let mut names: Vec<FeatureName> = self.features.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.priors.is_empty() && self.total_observations == 0 && self.features.is_empty()
    }

    /// Plain, ordered copy of every table for persistence.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            priors: self
                .priors
                .iter()
                .map(|(class, count)| (class.clone(), *count))
                .collect(),
            total_observations: self.total_observations,
            features: self
                .features
                .iter()
                .map(|(name, table)| (name.clone(), table.snapshot()))
                .collect(),
        }
    }

    /// Rebuilds a store from a snapshot.
    ///
    /// Words present in a class's counts are added to the vocabulary even if the
    /// snapshot's `known_words` omits them.
    pub fn from_snapshot(snapshot: TableSnapshot) -> Self {
        Self {
            priors: snapshot.priors.into_iter().collect(),
            total_observations: snapshot.total_observations,
            features: snapshot
                .features
                .into_iter()
                .map(|(name, feature)| (name, FeatureTable::from_snapshot(feature)))
                .collect(),
        }
    }

    fn feature_mut(&mut self, feature_name: &str) -> &mut FeatureTable {
        self.features.entry(feature_name.to_owned()).or_default()
    }
}

impl FeatureTable {
    fn snapshot(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            word_counts: self
                .word_counts
                .iter()
                .map(|(class, words)| {
                    let words: BTreeMap<String, u64> = words
                        .iter()
                        .map(|(word, count)| (word.clone(), *count))
                        .collect();
                    (class.clone(), words)
                })
                .collect(),
            total_word_counts: self
                .total_word_counts
                .iter()
                .map(|(class, count)| (class.clone(), *count))
                .collect(),
            known_words: self.known_words.iter().cloned().collect(),
        }
    }

    fn from_snapshot(snapshot: FeatureSnapshot) -> Self {
        let mut known_words: HashSet<String> = snapshot.known_words.into_iter().collect();
        let word_counts: HashMap<Outcome, HashMap<String, u64>> = snapshot
            .word_counts
            .into_iter()
            .map(|(class, words)| {
                known_words.extend(words.keys().cloned());
                (class, words.into_iter().collect())
            })
            .collect();
        Self {
            word_counts,
            total_word_counts: snapshot.total_word_counts.into_iter().collect(),
            known_words,
        }
    }
}

fn add_to(counts: &mut HashMap<String, u64>, key: &str, amount: u64) {
    match counts.get_mut(key) {
        Some(count) => *count = count.saturating_add(amount),
        None => {
            counts.insert(key.to_owned(), amount);
        }
    }
}

impl CountStore for TableStore {
    fn classes(&self) -> Vec<Outcome> {
        let mut classes: Vec<Outcome> = self.priors.keys().cloned().collect();
        classes.sort();
        classes
    }

    fn prior_count(&self, class: &str) -> u64 {
        self.priors.get(class).copied().unwrap_or(0)
    }

    fn total_observation_count(&self) -> u64 {
        self.total_observations
    }

    fn known_words(&self, feature_name: &str) -> &HashSet<String> {
        self.features
            .get(feature_name)
            .map(|table| &table.known_words)
            .unwrap_or(&*EMPTY_VOCABULARY)
    }

    fn word_count_in_class(&self, feature_name: &str, class: &str, word: &str) -> u64 {
        self.features
            .get(feature_name)
            .and_then(|table| table.word_counts.get(class))
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0)
    }

    fn total_word_count_in_class(&self, feature_name: &str, class: &str) -> u64 {
        self.features
            .get(feature_name)
            .and_then(|table| table.total_word_counts.get(class))
            .copied()
            .unwrap_or(0)
    }

    fn increment_prior(&mut self, class: &str, amount: u64) {
        add_to(&mut self.priors, class, amount);
    }

    fn increment_total_observations(&mut self, amount: u64) {
        self.total_observations = self.total_observations.saturating_add(amount);
    }

    fn increment_word_count(&mut self, feature_name: &str, class: &str, word: &str, amount: u64) {
        let table = self.feature_mut(feature_name);
        match table.word_counts.get_mut(class) {
            Some(words) => add_to(words, word, amount),
            None => {
                let words = HashMap::from([(word.to_owned(), amount)]);
                table.word_counts.insert(class.to_owned(), words);
            }
        }
        if !table.known_words.contains(word) {
            table.known_words.insert(word.to_owned());
        }
    }

    fn increment_total_word_count(&mut self, feature_name: &str, class: &str, amount: u64) {
        add_to(
            &mut self.feature_mut(feature_name).total_word_counts,
            class,
            amount,
        );
    }
}

/// Ordered, plain-data copy of a [`TableStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub priors: BTreeMap<Outcome, u64>,
    pub total_observations: u64,
    pub features: BTreeMap<FeatureName, FeatureSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSnapshot {
    /// class -> word -> count
    pub word_counts: BTreeMap<Outcome, BTreeMap<String, u64>>,
    pub total_word_counts: BTreeMap<Outcome, u64>,
    pub known_words: BTreeSet<String>,
}
