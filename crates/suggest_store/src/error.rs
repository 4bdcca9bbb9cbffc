use std::io;

use suggest_core::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("directory missing or not writable: {0}")]
    Dir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed table snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("unsupported table snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("malformed settings: {0}")]
    SettingsSyntax(#[from] ron::error::SpannedError),
    #[error("settings could not be written: {0}")]
    SettingsEncode(#[from] ron::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] ModelError),
}
