use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Additive smoothing used when no settings are given.
pub const DEFAULT_PSEUDO_COUNT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Pseudo-count added to every word/class count (Laplace smoothing at 1.0).
    pub pseudo_count: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            pseudo_count: DEFAULT_PSEUDO_COUNT,
        }
    }
}

impl ModelSettings {
    pub fn with_pseudo_count(pseudo_count: f64) -> Result<Self, ModelError> {
        let settings = Self { pseudo_count };
        settings.validate()?;
        Ok(settings)
    }

    /// The pseudo count must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.pseudo_count.is_finite() && self.pseudo_count > 0.0 {
            Ok(())
        } else {
            Err(ModelError::InvalidPseudoCount(self.pseudo_count))
        }
    }
}
