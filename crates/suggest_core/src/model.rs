use std::borrow::Borrow;
use std::collections::btree_map::{self, BTreeMap};

use suggest_logging::{suggest_debug, suggest_trace, suggest_warn};

use crate::{
    CountStore, FeatureValue, Features, ModelError, ModelSettings, Outcome, StopWordCounter,
    TableStore, Update, WordCounter,
};

/// Online Naive Bayes classifier over a [`CountStore`].
///
/// Text features are scored as a multinomial over their words, categorical
/// features as a single smoothed draw. Both use the same additive smoothing
/// constant from [`ModelSettings`].
pub struct Model<S = TableStore> {
    store: S,
    settings: ModelSettings,
    word_counter: Box<dyn WordCounter>,
}

impl<S: CountStore + Default> Default for Model<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: CountStore> Model<S> {
    /// Wraps `store` with the default pseudo count and stop-word tokenizer.
    pub fn new(store: S) -> Self {
        Self {
            store,
            settings: ModelSettings::default(),
            word_counter: Box::new(StopWordCounter::default()),
        }
    }

    pub fn with_settings(store: S, settings: ModelSettings) -> Result<Self, ModelError> {
        if let Err(err) = settings.validate() {
            suggest_warn!("Rejecting model settings {:?}: {}", settings, err);
            return Err(err);
        }
        let mut model = Self::new(store);
        model.settings = settings;
        Ok(model)
    }

    /// Replaces the tokenizer used for text features, in both training and
    /// prediction. Swapping it on a trained model changes which stored words
    /// can ever match.
    pub fn with_word_counter(mut self, word_counter: impl WordCounter + 'static) -> Self {
        self.word_counter = Box::new(word_counter);
        self
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Folds a single labeled observation into the counts.
    pub fn update(&mut self, outcome: &str, features: &Features) {
        self.fold(outcome, features);
    }

    /// Folds every update in order. Equivalent to calling [`Model::update`] on
    /// each one.
    pub fn batch_update<I, U>(&mut self, updates: I)
    where
        I: IntoIterator<Item = U>,
        U: Borrow<Update>,
    {
        let mut observations = 0usize;
        let mut occurrences = 0usize;
        for update in updates {
            let update = update.borrow();
            occurrences += self.fold(&update.outcome, &update.features);
            observations += 1;
        }
        suggest_debug!(
            "Folded {} observations ({} feature occurrences) into the model",
            observations,
            occurrences
        );
    }

    /// Every feature occurrence counts toward the class prior, so an
    /// observation with three features adds three to it.
    fn fold(&mut self, outcome: &str, features: &Features) -> usize {
        for (name, value) in features {
            self.store.increment_prior(outcome, 1);
            self.store.increment_total_observations(1);

            match value {
                FeatureValue::Text(text) => {
                    for (word, count) in self.word_counter.count_words(text) {
                        self.store.increment_word_count(name, outcome, &word, count);
                        self.store.increment_total_word_count(name, outcome, count);
                    }
                }
                FeatureValue::Categorical(token) => {
                    self.store.increment_word_count(name, outcome, token, 1);
                    self.store.increment_total_word_count(name, outcome, 1);
                }
            }
        }
        features.len()
    }

    /// Posterior distribution over every known class.
    ///
    /// Words and tokens that were never seen for a feature (under any class)
    /// are skipped, as are feature names the store has never seen. With no
    /// usable features the result is the normalized class priors. With no
    /// known classes the result is empty.
    pub fn predict(&self, features: &Features) -> Prediction {
        let classes = self.store.classes();
        if classes.is_empty() {
            return Prediction::default();
        }

        let observed = self.observe(features);
        let alpha = self.settings.pseudo_count;
        let log_total = (self.store.total_observation_count() as f64).ln();

        let mut log_scores = BTreeMap::new();
        for class in classes {
            let mut log_p = (self.store.prior_count(&class) as f64).ln() - log_total;
            for feature in &observed {
                let class_total = self.store.total_word_count_in_class(feature.name, &class);
                let log_denominator =
                    (class_total as f64 + feature.vocabulary_size as f64 * alpha).ln();
                for (word, count) in &feature.words {
                    let in_class = self.store.word_count_in_class(feature.name, &class, word);
                    log_p += *count as f64 * ((in_class as f64 + alpha).ln() - log_denominator);
                }
            }
            log_scores.insert(class, log_p);
        }

        suggest_trace!(
            "Scored {} classes against {} known features",
            log_scores.len(),
            observed.len()
        );
        Prediction::from_log_scores(log_scores)
    }

    /// Tokenizes once and keeps only the words the store has seen.
    fn observe<'f>(&self, features: &'f Features) -> Vec<ObservedFeature<'f>> {
        features
            .iter()
            .filter_map(|(name, value)| {
                let known = self.store.known_words(name);
                let words: Vec<(String, u64)> = match value {
                    FeatureValue::Text(text) => {
                        let mut words: Vec<(String, u64)> = self
                            .word_counter
                            .count_words(text)
                            .into_iter()
                            .filter(|(word, _)| known.contains(word))
                            .collect();
                        // Fixed summation order keeps repeated predictions bit-identical.
                        words.sort_unstable();
                        words
                    }
                    FeatureValue::Categorical(token) if known.contains(token) => {
                        vec![(token.clone(), 1)]
                    }
                    FeatureValue::Categorical(_) => Vec::new(),
                };
                if words.is_empty() {
                    None
                } else {
                    Some(ObservedFeature {
                        name,
                        vocabulary_size: known.len(),
                        words,
                    })
                }
            })
            .collect()
    }
}

struct ObservedFeature<'f> {
    name: &'f str,
    vocabulary_size: usize,
    words: Vec<(String, u64)>,
}

/// Normalized class probabilities, ordered by class label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    probabilities: BTreeMap<Outcome, f64>,
}

impl Prediction {
    /// Log-sum-exp normalization: shift by the maximum before exponentiating so
    /// large negative log scores do not underflow to zero.
    fn from_log_scores(log_scores: BTreeMap<Outcome, f64>) -> Self {
        let max = log_scores
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let mut probabilities: BTreeMap<Outcome, f64> = log_scores
            .into_iter()
            .map(|(class, log_p)| (class, (log_p - max).exp()))
            .collect();
        let norm: f64 = probabilities.values().sum();
        for probability in probabilities.values_mut() {
            *probability /= norm;
        }
        Self { probabilities }
    }

    pub fn get(&self, class: &str) -> Option<f64> {
        self.probabilities.get(class).copied()
    }

    /// The most probable class. Ties go to the label that sorts first.
    pub fn best(&self) -> Option<(&str, f64)> {
        self.probabilities
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (class, &p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((class.as_str(), p)),
            })
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.probabilities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Outcome, f64> {
        self.probabilities.iter()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<Outcome, f64> {
        self.probabilities
    }
}

impl<'a> IntoIterator for &'a Prediction {
    type Item = (&'a Outcome, &'a f64);
    type IntoIter = btree_map::Iter<'a, Outcome, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.probabilities.iter()
    }
}
