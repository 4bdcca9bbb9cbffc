use std::collections::btree_map::{self, BTreeMap};

/// Class label being predicted.
pub type Outcome = String;
pub type FeatureName = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureValue {
    /// Free text, tokenized into a bag of words.
    Text(String),
    /// A single token, counted as-is.
    Categorical(String),
}

impl FeatureValue {
    pub fn as_str(&self) -> &str {
        match self {
            FeatureValue::Text(text) => text,
            FeatureValue::Categorical(token) => token,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FeatureValue::Text(_))
    }
}

/// One observation: feature name to value, at most one value per name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Features {
    map: BTreeMap<FeatureName, FeatureValue>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text feature, replacing any earlier value under `name`.
    pub fn text(mut self, name: impl Into<FeatureName>, text: impl Into<String>) -> Self {
        self.insert(name, FeatureValue::Text(text.into()));
        self
    }

    /// Adds a categorical feature, replacing any earlier value under `name`.
    pub fn categorical(mut self, name: impl Into<FeatureName>, token: impl Into<String>) -> Self {
        self.insert(name, FeatureValue::Categorical(token.into()));
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<FeatureName>,
        value: FeatureValue,
    ) -> Option<FeatureValue> {
        self.map.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.map.get(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FeatureName, FeatureValue> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<N: Into<FeatureName>> FromIterator<(N, FeatureValue)> for Features {
    fn from_iter<I: IntoIterator<Item = (N, FeatureValue)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Features {
    type Item = (&'a FeatureName, &'a FeatureValue);
    type IntoIter = btree_map::Iter<'a, FeatureName, FeatureValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// A labeled observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub outcome: Outcome,
    pub features: Features,
}

impl Update {
    pub fn new(outcome: impl Into<Outcome>, features: Features) -> Self {
        Self {
            outcome: outcome.into(),
            features,
        }
    }
}
