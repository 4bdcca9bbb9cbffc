use std::fs;
use std::path::Path;

use suggest_core::ModelSettings;
use suggest_logging::suggest_info;

use crate::{write_atomically, PersistError};

/// Parses and validates settings written in RON, e.g. `(pseudo_count: 0.01)`.
/// Missing fields take their defaults.
pub fn parse_settings(text: &str) -> Result<ModelSettings, PersistError> {
    let settings: ModelSettings = ron::from_str(text)?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_settings(path: &Path) -> Result<ModelSettings, PersistError> {
    let text = fs::read_to_string(path)?;
    let settings = parse_settings(&text)?;
    suggest_info!("Loaded model settings from {:?}: {:?}", path, settings);
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &ModelSettings) -> Result<(), PersistError> {
    settings.validate()?;
    let pretty = ron::ser::PrettyConfig::new();
    let text = ron::ser::to_string_pretty(settings, pretty)?;
    write_atomically(path, text.as_bytes())
}
