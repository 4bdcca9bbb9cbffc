use std::collections::HashSet;

use crate::Outcome;

/// Sufficient statistics for Naive Bayes, keyed by feature name, class and word.
///
/// Lookups on keys that were never incremented return zero or an empty set;
/// "never observed" is a valid state, not an error. Counts only grow: there is
/// no decrement and no removal.
///
/// Any backing (memory, file, database) that implements this trait can drive a
/// [`Model`](crate::Model).
pub trait CountStore {
    /// Labels that have a prior entry.
    fn classes(&self) -> Vec<Outcome>;

    fn prior_count(&self, class: &str) -> u64;

    fn total_observation_count(&self) -> u64;

    /// Every word ever observed for `feature_name`, across all classes.
    ///
    /// This is a borrowed view of the live vocabulary. Prediction calls it once
    /// per class per feature, so implementations must not copy here.
    fn known_words(&self, feature_name: &str) -> &HashSet<String>;

    fn word_count_in_class(&self, feature_name: &str, class: &str, word: &str) -> u64;

    fn total_word_count_in_class(&self, feature_name: &str, class: &str) -> u64;

    fn increment_prior(&mut self, class: &str, amount: u64);

    fn increment_total_observations(&mut self, amount: u64);

    /// Adds `amount` to the class-specific count and records `word` in the
    /// feature's vocabulary whatever the class.
    fn increment_word_count(&mut self, feature_name: &str, class: &str, word: &str, amount: u64);

    /// Adds `amount` to the per-class word total.
    ///
    /// This total is its own accumulator and is not derived from the per-word
    /// counts. Callers that increment one without the other will skew the
    /// smoothing denominator.
    fn increment_total_word_count(&mut self, feature_name: &str, class: &str, amount: u64);

    fn vocabulary_size(&self, feature_name: &str) -> usize {
        self.known_words(feature_name).len()
    }

    fn is_known_word(&self, feature_name: &str, word: &str) -> bool {
        self.known_words(feature_name).contains(word)
    }
}

impl<S: CountStore + ?Sized> CountStore for &mut S {
    fn classes(&self) -> Vec<Outcome> {
        (**self).classes()
    }

    fn prior_count(&self, class: &str) -> u64 {
        (**self).prior_count(class)
    }

    fn total_observation_count(&self) -> u64 {
        (**self).total_observation_count()
    }

    fn known_words(&self, feature_name: &str) -> &HashSet<String> {
        (**self).known_words(feature_name)
    }

    fn word_count_in_class(&self, feature_name: &str, class: &str, word: &str) -> u64 {
        (**self).word_count_in_class(feature_name, class, word)
    }

    fn total_word_count_in_class(&self, feature_name: &str, class: &str) -> u64 {
        (**self).total_word_count_in_class(feature_name, class)
    }

    fn increment_prior(&mut self, class: &str, amount: u64) {
        (**self).increment_prior(class, amount)
    }

    fn increment_total_observations(&mut self, amount: u64) {
        (**self).increment_total_observations(amount)
    }

    fn increment_word_count(&mut self, feature_name: &str, class: &str, word: &str, amount: u64) {
        (**self).increment_word_count(feature_name, class, word, amount)
    }

    fn increment_total_word_count(&mut self, feature_name: &str, class: &str, amount: u64) {
        (**self).increment_total_word_count(feature_name, class, amount)
    }
}
