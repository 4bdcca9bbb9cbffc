//! Suggest core: online Naive Bayes over named text and categorical features.
//!
//! The crate is pure in-memory arithmetic. Persistence lives in
//! `suggest_store`; everything here works against the [`CountStore`] trait.
mod error;
mod features;
mod model;
mod registry;
mod settings;
mod store;
mod table;
mod tokenize;

pub use error::ModelError;
pub use features::{FeatureName, FeatureValue, Features, Outcome, Update};
pub use model::{Model, Prediction};
pub use registry::{InMemoryModelRegistry, ModelRegistry};
pub use settings::{ModelSettings, DEFAULT_PSEUDO_COUNT};
pub use store::CountStore;
pub use table::{FeatureSnapshot, TableSnapshot, TableStore};
pub use tokenize::{default_stop_words, StopWordCounter, WordCounter, WordCounts};
