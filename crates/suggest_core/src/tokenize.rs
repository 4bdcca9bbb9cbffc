use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Distinct word to number of occurrences in one piece of text.
pub type WordCounts = HashMap<String, u64>;

pub trait WordCounter: Send + Sync {
    fn count_words(&self, text: &str) -> WordCounts;
}

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\P{L}+").expect("letter class regex"));

static ENGLISH_STOP_WORDS: LazyLock<Arc<HashSet<String>>> = LazyLock::new(|| {
    Arc::new(parse_stop_words(include_str!(
        "../data/english-stop-words.txt"
    )))
});

/// The built-in English stop-word list, parsed once per process.
pub fn default_stop_words() -> &'static HashSet<String> {
    &**ENGLISH_STOP_WORDS
}

fn parse_stop_words(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Letter-run tokenizer that lowercases and drops stop words.
///
/// Every maximal run of characters outside the Unicode letter category
/// becomes a single separator, so digits, punctuation and whitespace all
/// split words and never appear in them.
#[derive(Debug, Clone)]
pub struct StopWordCounter {
    stop_words: Arc<HashSet<String>>,
}

impl Default for StopWordCounter {
    fn default() -> Self {
        Self {
            stop_words: Arc::clone(&*ENGLISH_STOP_WORDS),
        }
    }
}

impl StopWordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `stop_words` instead of the built-in list. Entries are matched
    /// against lowercased tokens, so they are lowercased here.
    pub fn with_stop_words<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: Arc::new(
                stop_words
                    .into_iter()
                    .map(|word| word.as_ref().to_lowercase())
                    .collect(),
            ),
        }
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }
}

impl WordCounter for StopWordCounter {
    fn count_words(&self, text: &str) -> WordCounts {
        let spaced = NON_LETTERS.replace_all(text, " ");
        let lowered = spaced.trim().to_lowercase();

        let mut counts = WordCounts::new();
        for word in lowered
            .split(' ')
            .filter(|word| !word.is_empty() && !self.stop_words.contains(*word))
        {
            *counts.entry(word.to_owned()).or_insert(0) += 1;
        }
        counts
    }
}
